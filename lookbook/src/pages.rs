//! Page routines. Each one opens exactly one page on the engine it is
//! handed and lays out one piece of the look book on it.

use std::io::Write;

use lookbook_core::{
    Align, BuiltinFont, Color, LogoSource, PageLayoutEngine, Result, TextStyle, INCH,
};
use tracing::debug;

use crate::content::{Benefit, Lookbook, Pricing, Section, Service};

const MARGIN: f64 = 0.75 * INCH;
const FOOTER_Y: f64 = 0.4 * INCH;

const COVER_PAGES: u32 = 1;
const CONTENTS_PAGES: u32 = 1;
const STORY_PAGES: u32 = 3;
const BACK_COVER_PAGES: u32 = 1;

/// Titles longer than this many characters break onto two lines.
const DIVIDER_TITLE_MAX_CHARS: usize = 25;
const SERVICE_NAME_MAX_CHARS: usize = 30;

const BENEFIT_COLUMNS: usize = 2;
const BENEFIT_ROWS: usize = 2;

/// One line on the contents page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentsEntry {
    pub category: String,
    pub title: String,
    pub first_page: u32,
    pub last_page: u32,
}

impl ContentsEntry {
    fn page_range(&self) -> String {
        if self.first_page == self.last_page {
            format!("Page {}", self.first_page)
        } else {
            format!("Pages {}\u{2013}{}", self.first_page, self.last_page)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pub entries: Vec<ContentsEntry>,
    pub total_pages: u32,
}

/// Walk the content in render order and work out which pages each
/// contents entry will occupy.
pub fn plan_pages(book: &Lookbook) -> PagePlan {
    let mut next = COVER_PAGES + CONTENTS_PAGES + 1;
    let mut entries = Vec::with_capacity(book.sections.len() + 1);

    entries.push(ContentsEntry {
        category: book.story.category.clone(),
        title: book.story.title.clone(),
        first_page: next,
        last_page: next + STORY_PAGES - 1,
    });
    next += STORY_PAGES;

    for section in &book.sections {
        let pages = section_pages(section);
        if pages == 0 {
            continue;
        }
        entries.push(ContentsEntry {
            category: section.category.clone(),
            title: section.title.clone(),
            first_page: next,
            last_page: next + pages - 1,
        });
        next += pages;
    }

    PagePlan {
        entries,
        total_pages: next - 1 + BACK_COVER_PAGES,
    }
}

fn section_pages(section: &Section) -> u32 {
    section.divider_photo.is_some() as u32
        + section.feature_photo.is_some() as u32
        + section.services.len() as u32
}

/// Break a title at its middle word when it is longer than `max_chars`.
/// Single-word titles are never split.
pub fn split_title(title: &str, max_chars: usize) -> Option<(String, String)> {
    if title.chars().count() <= max_chars {
        return None;
    }
    let words: Vec<&str> = title.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }
    let mid = words.len() / 2;
    Some((words[..mid].join(" "), words[mid..].join(" ")))
}

/// A text column: left edge, wrap width and line advance.
#[derive(Debug, Clone, Copy)]
struct Column {
    x: f64,
    width: f64,
    leading: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Render the whole look book onto `engine`, one `new_page` per page.
/// Returns the plan the contents page was built from.
pub fn render<W: Write>(engine: &mut PageLayoutEngine<W>, book: &Lookbook) -> Result<PagePlan> {
    let plan = plan_pages(book);
    let pages = Pages::new(engine, book);

    pages.cover(engine)?;
    pages.contents(engine, &plan)?;
    pages.story_opener(engine)?;
    pages.story_text(engine)?;
    pages.story_logo(engine)?;
    for section in &book.sections {
        pages.section(engine, section)?;
    }
    pages.back_cover(engine)?;

    debug_assert_eq!(
        engine.page_number(),
        plan.total_pages,
        "contents page ranges disagree with the rendered pages"
    );
    Ok(plan)
}

/// Shared geometry and palette for the page routines.
struct Pages<'a> {
    book: &'a Lookbook,
    width: f64,
    height: f64,
    half: f64,
    background: Color,
    ink: Color,
    accent: Color,
    logo: LogoSource,
}

impl<'a> Pages<'a> {
    fn new<W: Write>(engine: &PageLayoutEngine<W>, book: &'a Lookbook) -> Self {
        let size = engine.page_size();
        let settings = &book.settings;
        Pages {
            book,
            width: size.width,
            height: size.height,
            half: size.width / 2.0,
            background: settings.background.0,
            ink: settings.ink.0,
            accent: settings.accent.0,
            logo: LogoSource {
                path: settings.logo_path.clone(),
                fallback_label: book.brand.logo_label.clone(),
            },
        }
    }

    fn ink(&self, font: BuiltinFont, size: f64) -> TextStyle {
        TextStyle::new(font, size, self.ink)
    }

    fn accent(&self, font: BuiltinFont, size: f64) -> TextStyle {
        TextStyle::new(font, size, self.accent)
    }

    fn begin<W: Write>(&self, engine: &mut PageLayoutEngine<W>, what: &str) -> Result<()> {
        let page = engine.new_page(Some(self.background))?;
        debug!(page, what, "laying out page");
        Ok(())
    }

    fn page_label<W: Write>(&self, engine: &mut PageLayoutEngine<W>, side: Side) -> Result<()> {
        let label = format!("PG | {:02}", engine.page_number());
        let style = self.accent(BuiltinFont::Helvetica, 8.0);
        match side {
            Side::Left => engine.draw_text(0.5 * INCH, FOOTER_Y, &label, &style, Align::Left),
            Side::Right => engine.draw_text(
                self.width - 0.5 * INCH,
                FOOTER_Y,
                &label,
                &style,
                Align::Right,
            ),
        }
    }

    fn footer<W: Write>(&self, engine: &mut PageLayoutEngine<W>) -> Result<()> {
        let style = self.accent(BuiltinFont::Helvetica, 7.0);
        engine.draw_text(
            self.width / 2.0,
            FOOTER_Y,
            &self.book.brand.tagline,
            &style,
            Align::Center,
        )
    }

    /// Placeholder filling the right half of a spread.
    fn photo_half<W: Write>(&self, engine: &mut PageLayoutEngine<W>, caption: &str) -> Result<()> {
        engine.draw_placeholder_box(
            self.half + 0.25 * INCH,
            0.75 * INCH,
            self.half - 0.5 * INCH,
            self.height - 1.5 * INCH,
            caption,
        )
    }

    /// Small bold kicker over a large light headline.
    fn heading<W: Write>(
        &self,
        engine: &mut PageLayoutEngine<W>,
        kicker: &str,
        headline: &str,
    ) -> Result<()> {
        engine.draw_text(
            MARGIN,
            self.height - 1.5 * INCH,
            kicker,
            &self.ink(BuiltinFont::HelveticaBold, 14.0),
            Align::Left,
        )?;
        engine.draw_text(
            MARGIN,
            self.height - 2.2 * INCH,
            headline,
            &self.ink(BuiltinFont::Helvetica, 36.0),
            Align::Left,
        )
    }

    /// Draw wrapped lines from `y` downward; returns the y below the
    /// last line.
    fn paragraph<W: Write>(
        &self,
        engine: &mut PageLayoutEngine<W>,
        column: Column,
        mut y: f64,
        text: &str,
        style: &TextStyle,
    ) -> Result<f64> {
        for line in engine.wrap_text(text, style, column.width) {
            engine.draw_text(column.x, y, &line, style, Align::Left)?;
            y -= column.leading;
        }
        Ok(y)
    }

    fn cover<W: Write>(&self, engine: &mut PageLayoutEngine<W>) -> Result<()> {
        self.begin(engine, "cover")?;
        engine.draw_logo(self.width / 2.0, self.height / 2.0 + 0.5 * INCH, 2.0 * INCH, &self.logo)?;
        engine.draw_text(
            self.width / 2.0,
            self.height / 2.0 - 1.2 * INCH,
            &self.book.cover.subtitle,
            &self.ink(BuiltinFont::Helvetica, 12.0),
            Align::Center,
        )
    }

    fn contents<W: Write>(&self, engine: &mut PageLayoutEngine<W>, plan: &PagePlan) -> Result<()> {
        self.begin(engine, "contents")?;
        let contents = &self.book.contents;
        engine.draw_text(
            MARGIN,
            self.height - 1.2 * INCH,
            &contents.heading,
            &self.ink(BuiltinFont::HelveticaBold, 24.0),
            Align::Left,
        )?;

        let category_style = self.ink(BuiltinFont::HelveticaBold, 9.0);
        let title_style = self.accent(BuiltinFont::Helvetica, 9.0);
        let mut y = self.height - 2.0 * INCH;
        for entry in &plan.entries {
            engine.draw_text(MARGIN, y, &entry.category, &category_style, Align::Left)?;
            let title_x = MARGIN + category_style.measure(&format!("{} ", entry.category));
            engine.draw_text(title_x, y, &entry.title, &title_style, Align::Left)?;
            engine.draw_text(
                self.half - 0.5 * INCH,
                y,
                &entry.page_range(),
                &title_style,
                Align::Right,
            )?;
            y -= 0.35 * INCH;
        }

        self.photo_half(engine, &contents.photo)?;
        self.page_label(engine, Side::Left)
    }

    fn story_opener<W: Write>(&self, engine: &mut PageLayoutEngine<W>) -> Result<()> {
        let story = &self.book.story;
        self.begin(engine, "story")?;
        self.heading(engine, &story.category, &story.title)?;
        self.photo_half(engine, &story.photo)?;
        self.page_label(engine, Side::Left)?;
        self.footer(engine)
    }

    fn story_text<W: Write>(&self, engine: &mut PageLayoutEngine<W>) -> Result<()> {
        let story = &self.book.story;
        self.begin(engine, "story text")?;

        let left = 1.0 * INCH;
        let column = Column {
            x: left,
            width: self.width - 2.0 * INCH,
            leading: 16.0,
        };
        let body = self.ink(BuiltinFont::Helvetica, 11.0);
        let mut y = self.height - 1.5 * INCH;
        for paragraph in &story.paragraphs {
            y = self.paragraph(engine, column, y, paragraph, &body)?;
            y -= 10.0;
        }

        y -= 20.0;
        engine.draw_text(
            left,
            y,
            &story.signature.name,
            &self.ink(BuiltinFont::HelveticaBold, 11.0),
            Align::Left,
        )?;
        y -= 18.0;
        let detail = self.accent(BuiltinFont::Helvetica, 10.0);
        for line in &story.signature.lines {
            engine.draw_text(left, y, line, &detail, Align::Left)?;
            y -= 14.0;
        }

        self.page_label(engine, Side::Right)?;
        self.footer(engine)
    }

    fn story_logo<W: Write>(&self, engine: &mut PageLayoutEngine<W>) -> Result<()> {
        let story = &self.book.story;
        self.begin(engine, "logo")?;
        self.heading(engine, &story.category, &story.logo_title)?;
        engine.draw_logo(MARGIN + 1.5 * INCH, self.height - 4.0 * INCH, 2.0 * INCH, &self.logo)?;

        let x = self.half + 0.5 * INCH;
        let column = Column {
            x,
            width: self.half - 1.0 * INCH,
            leading: 14.0,
        };
        let title_style = self.ink(BuiltinFont::HelveticaBold, 12.0);
        let body = self.accent(BuiltinFont::Helvetica, 10.0);
        let mut y = self.height - 2.0 * INCH;
        for Benefit { title, description } in &story.logo_meanings {
            engine.draw_text(x, y, title, &title_style, Align::Left)?;
            y -= 20.0;
            y = self.paragraph(engine, column, y, description, &body)?;
            y -= 26.0;
        }

        self.page_label(engine, Side::Left)?;
        self.footer(engine)
    }

    fn section<W: Write>(&self, engine: &mut PageLayoutEngine<W>, section: &Section) -> Result<()> {
        if let Some(photo) = &section.divider_photo {
            self.divider(engine, section, photo)?;
        }
        if let Some(photo) = &section.feature_photo {
            self.full_bleed(engine, photo)?;
        }
        for service in &section.services {
            self.service(engine, service)?;
        }
        Ok(())
    }

    fn divider<W: Write>(
        &self,
        engine: &mut PageLayoutEngine<W>,
        section: &Section,
        photo: &str,
    ) -> Result<()> {
        self.begin(engine, "divider")?;
        let mid = self.height / 2.0;
        engine.draw_text(
            MARGIN,
            mid + 0.5 * INCH,
            &section.category,
            &self.ink(BuiltinFont::HelveticaBold, 14.0),
            Align::Left,
        )?;

        let title_style = self.ink(BuiltinFont::Helvetica, 32.0);
        match split_title(&section.title, DIVIDER_TITLE_MAX_CHARS) {
            Some((first, second)) => {
                engine.draw_text(MARGIN, mid - 0.2 * INCH, &first, &title_style, Align::Left)?;
                engine.draw_text(MARGIN, mid - 0.7 * INCH, &second, &title_style, Align::Left)?;
            }
            None => {
                engine.draw_text(MARGIN, mid - 0.2 * INCH, &section.title, &title_style, Align::Left)?;
            }
        }

        self.photo_half(engine, photo)?;
        self.page_label(engine, Side::Left)?;
        self.footer(engine)
    }

    fn full_bleed<W: Write>(&self, engine: &mut PageLayoutEngine<W>, photo: &str) -> Result<()> {
        self.begin(engine, "photo")?;
        engine.draw_placeholder_box(
            0.5 * INCH,
            0.75 * INCH,
            self.width - 1.0 * INCH,
            self.height - 1.5 * INCH,
            photo,
        )?;
        self.page_label(engine, Side::Right)?;
        self.footer(engine)
    }

    fn service<W: Write>(&self, engine: &mut PageLayoutEngine<W>, service: &Service) -> Result<()> {
        self.begin(engine, "service")?;

        let name_style = self.ink(BuiltinFont::HelveticaBold, 22.0);
        let name_bottom = match split_title(&service.name, SERVICE_NAME_MAX_CHARS) {
            Some((first, second)) => {
                engine.draw_text(MARGIN, self.height - 1.3 * INCH, &first, &name_style, Align::Left)?;
                engine.draw_text(MARGIN, self.height - 1.7 * INCH, &second, &name_style, Align::Left)?;
                self.height - 1.9 * INCH
            }
            None => {
                engine.draw_text(
                    MARGIN,
                    self.height - 1.5 * INCH,
                    &service.name,
                    &name_style,
                    Align::Left,
                )?;
                self.height - 1.7 * INCH
            }
        };
        engine.draw_text(
            MARGIN,
            name_bottom,
            &service.subtitle,
            &self.accent(BuiltinFont::HelveticaOblique, 11.0),
            Align::Left,
        )?;

        let column = Column {
            x: MARGIN,
            width: self.half - 1.25 * INCH,
            leading: 14.0,
        };
        let body = self.ink(BuiltinFont::Helvetica, 10.0);
        let mut y =
            self.paragraph(engine, column, name_bottom - 0.5 * INCH, &service.description, &body)?;
        y -= 0.3 * INCH;

        let rows = self.benefit_grid(engine, y, column.width, &service.benefits)?;
        let mut pricing_y = y - rows as f64 * 0.9 * INCH - 0.4 * INCH;

        engine.draw_text(
            MARGIN,
            pricing_y,
            "Pricing:",
            &self.ink(BuiltinFont::HelveticaBold, 10.0),
            Align::Left,
        )?;
        match &service.pricing {
            Pricing::Single(price) => {
                engine.draw_text(MARGIN + 0.6 * INCH, pricing_y, price, &body, Align::Left)?;
            }
            Pricing::Tiers(tiers) => {
                for tier in tiers {
                    pricing_y -= 16.0;
                    engine.draw_text(MARGIN + 0.5 * INCH, pricing_y, tier, &body, Align::Left)?;
                }
            }
        }

        if !service.extra_info.is_empty() {
            pricing_y -= 25.0;
            let small = self.accent(BuiltinFont::Helvetica, 9.0);
            for info in &service.extra_info {
                engine.draw_text(MARGIN, pricing_y, info, &small, Align::Left)?;
                pricing_y -= 12.0;
            }
        }

        self.photo_half(engine, &service.photo)?;
        self.page_label(engine, Side::Left)?;
        self.footer(engine)
    }

    fn back_cover<W: Write>(&self, engine: &mut PageLayoutEngine<W>) -> Result<()> {
        self.begin(engine, "back cover")?;
        let center = self.width / 2.0;
        let mid = self.height / 2.0;
        engine.draw_logo(center, mid + 1.0 * INCH, 1.5 * INCH, &self.logo)?;
        engine.draw_text(
            center,
            mid - 0.5 * INCH,
            &self.book.brand.tagline,
            &self.ink(BuiltinFont::Helvetica, 14.0),
            Align::Center,
        )?;

        let contact = self.accent(BuiltinFont::Helvetica, 11.0);
        let mut y = mid - 1.5 * INCH;
        for line in &self.book.brand.contact {
            engine.draw_text(center, y, line, &contact, Align::Center)?;
            y -= 20.0;
        }
        Ok(())
    }

    /// Two columns of callouts hanging below `top`, at most
    /// [`BENEFIT_ROWS`] rows; further benefits are dropped. Returns the
    /// number of rows drawn.
    fn benefit_grid<W: Write>(
        &self,
        engine: &mut PageLayoutEngine<W>,
        top: f64,
        column_width: f64,
        benefits: &[Benefit],
    ) -> Result<usize> {
        let capacity = BENEFIT_COLUMNS * BENEFIT_ROWS;
        if benefits.len() > capacity {
            debug!(
                dropped = benefits.len() - capacity,
                "benefit grid full, dropping extra benefits"
            );
        }

        let box_width = column_width / 2.0 - 0.1 * INCH;
        let box_height = engine.theme().callout_height;
        let shown = &benefits[..benefits.len().min(capacity)];
        for (i, benefit) in shown.iter().enumerate() {
            let row = i / BENEFIT_COLUMNS;
            let col = i % BENEFIT_COLUMNS;
            let x = MARGIN + col as f64 * (box_width + 0.2 * INCH);
            let y = top - box_height - row as f64 * 0.9 * INCH;
            engine.draw_callout_box(x, y, box_width, &benefit.title, &benefit.description)?;
        }
        Ok(shown.len().div_ceil(BENEFIT_COLUMNS))
    }
}

#[cfg(test)]
mod tests {
    use lookbook_core::{LayoutError, PageSize};

    use super::*;
    use crate::CONTENT;

    fn book() -> Lookbook {
        Lookbook::from_json(CONTENT).unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    fn render_to_bytes(book: &Lookbook) -> (PagePlan, Vec<u8>) {
        let mut engine = PageLayoutEngine::new(Vec::new(), PageSize::LETTER.landscape())
            .unwrap()
            .with_theme(book.settings.theme());
        engine.set_compression(false).unwrap();
        let plan = render(&mut engine, book).unwrap();
        assert_eq!(engine.page_number(), plan.total_pages);
        (plan, engine.finalize().unwrap())
    }

    #[test]
    fn split_title_breaks_at_the_middle_word() {
        assert_eq!(split_title("Lab Panels & Blood Work", 25), None);
        assert_eq!(
            split_title("Hyperbaric Oxygen Therapy Spread", 25),
            Some(("Hyperbaric Oxygen".into(), "Therapy Spread".into()))
        );
        assert_eq!(
            split_title("HYPERBARIC OXYGEN THERAPY (HBOT)", 30),
            Some(("HYPERBARIC OXYGEN".into(), "THERAPY (HBOT)".into()))
        );
        assert_eq!(split_title("Supercalifragilisticexpialidocious", 10), None);
    }

    #[test]
    fn plan_ranges_are_contiguous() {
        let plan = plan_pages(&book());
        let first = &plan.entries[0];
        assert_eq!((first.category.as_str(), first.title.as_str()), ("OUR", "Story"));
        assert_eq!((first.first_page, first.last_page), (3, 5));
        for pair in plan.entries.windows(2) {
            assert_eq!(pair[1].first_page, pair[0].last_page + 1);
            assert!(pair[1].first_page <= pair[1].last_page);
        }
        let last = plan.entries.last().unwrap();
        assert_eq!(plan.total_pages, last.last_page + 1);
    }

    #[test]
    fn section_without_divider_is_only_its_services() {
        let plan = plan_pages(&book());
        let blue = plan
            .entries
            .iter()
            .find(|e| e.title == "Methylene Blue IV")
            .unwrap();
        assert_eq!(blue.first_page, blue.last_page);
        assert_eq!(blue.page_range(), format!("Page {}", blue.first_page));
    }

    #[test]
    fn renders_every_planned_page() {
        let book = book();
        let (plan, bytes) = render_to_bytes(&book);
        assert!(contains(&bytes, format!("/Count {}", plan.total_pages).as_bytes()));
        // No logo configured, so the cover, logo page and back cover
        // all carry the fallback mark.
        assert_eq!(count(&bytes, b"(RANGE) Tj"), 3);
        assert!(contains(&bytes, b"(PG | 02) Tj"));
        assert!(contains(&bytes, b"(Pages 3\x965) Tj"));
        assert!(contains(&bytes, b"(Pricing:) Tj"));
    }

    #[test]
    fn benefit_grid_holds_four() {
        let mut book = book();
        let service = &mut book.sections[0].services[0];
        service.benefits = (0..6)
            .map(|i| Benefit {
                title: format!("BENEFIT{i}"),
                description: "short".into(),
            })
            .collect();
        let (_, bytes) = render_to_bytes(&book);
        for i in 0..4 {
            assert!(contains(&bytes, format!("(BENEFIT{i}) Tj").as_bytes()));
        }
        assert!(!contains(&bytes, b"(BENEFIT4) Tj"));
        assert!(!contains(&bytes, b"(BENEFIT5) Tj"));
    }

    #[test]
    fn renders_into_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookbook.pdf");
        let mut engine = PageLayoutEngine::create(&path, PageSize::LETTER.landscape()).unwrap();
        let plan = render(&mut engine, &book()).unwrap();
        engine.finalize().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(contains(&bytes, format!("/Count {}", plan.total_pages).as_bytes()));
    }

    #[test]
    fn rendering_after_finalize_is_rejected() {
        let book = book();
        let mut engine =
            PageLayoutEngine::new(Vec::new(), PageSize::LETTER.landscape()).unwrap();
        engine.finalize().unwrap();
        let err = render(&mut engine, &book).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidState { operation: "new_page", .. }));
    }
}
