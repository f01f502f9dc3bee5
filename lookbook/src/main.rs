mod content;
mod pages;
mod settings;

use std::fs;

use anyhow::{Context, Result};
use lookbook_core::{PageLayoutEngine, PageSize};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::content::Lookbook;

pub(crate) const CONTENT: &str = include_str!("../content/lookbook.json");

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let book = Lookbook::from_json(CONTENT).context("parsing look book content")?;
    let settings = &book.settings;
    let output = &settings.output_path;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    info!(title = %book.title, path = %output.display(), "generating look book");
    let mut engine = PageLayoutEngine::create(output, PageSize::LETTER.landscape())
        .with_context(|| format!("opening {}", output.display()))?
        .with_theme(settings.theme());
    engine.set_compression(settings.compress)?;
    engine.set_info("Title", &book.title)?;
    engine.set_info("Creator", "lookbook")?;

    // Finalize even when a page fails so the file is released with a
    // trailer; the rendering error still wins.
    let rendered = pages::render(&mut engine, &book);
    let finalized = engine.finalize();
    let plan = rendered.context("rendering pages")?;
    finalized.with_context(|| format!("writing {}", output.display()))?;

    info!(
        path = %output.display(),
        pages = plan.total_pages,
        sections = book.sections.len(),
        "look book saved"
    );
    Ok(())
}
