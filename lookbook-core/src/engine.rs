use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::document::PdfDocument;
use crate::error::{LayoutError, Result};
use crate::fonts::BuiltinFont;
use crate::graphics::Color;
use crate::images::{load_image_file, ImageId, ImagePlacement};
use crate::text::{wrap_text, Align, TextStyle, WrapLines};

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// The same sheet turned on its side.
    pub fn landscape(self) -> Self {
        PageSize {
            width: self.width.max(self.height),
            height: self.width.min(self.height),
        }
    }
}

/// Points per inch.
pub const INCH: f64 = 72.0;

/// Maximum number of body lines a callout box shows.
pub const CALLOUT_BODY_LINES: usize = 2;

/// Fixed styling for the engine's composite primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTheme {
    pub placeholder_fill: Color,
    pub placeholder_caption: TextStyle,
    pub callout_fill: Color,
    pub callout_border: Color,
    pub callout_border_width: f64,
    pub callout_height: f64,
    pub callout_padding: f64,
    pub callout_title: TextStyle,
    pub callout_body: TextStyle,
    pub callout_body_leading: f64,
    pub logo_mark_fill: Color,
    pub logo_mark_label: TextStyle,
}

impl Default for LayoutTheme {
    fn default() -> Self {
        let ink = Color::rgb8(0x17, 0x17, 0x17);
        let accent = Color::rgb8(0x73, 0x73, 0x73);
        LayoutTheme {
            placeholder_fill: Color::rgb8(0xc0, 0xc0, 0xc0),
            placeholder_caption: TextStyle::new(BuiltinFont::HelveticaOblique, 10.0, accent),
            callout_fill: Color::WHITE,
            callout_border: Color::rgb8(0xe5, 0xe5, 0xe5),
            callout_border_width: 1.0,
            callout_height: 0.8 * INCH,
            callout_padding: 10.0,
            callout_title: TextStyle::new(BuiltinFont::HelveticaBold, 8.0, ink),
            callout_body: TextStyle::new(BuiltinFont::Helvetica, 7.0, accent),
            callout_body_leading: 10.0,
            logo_mark_fill: ink,
            logo_mark_label: TextStyle::new(BuiltinFont::HelveticaBold, 12.0, Color::WHITE),
        }
    }
}

/// An optional logo image plus the label of the mark drawn in its
/// place when the image cannot be used.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoSource {
    pub path: Option<PathBuf>,
    pub fallback_label: String,
}

/// What `draw_logo` ended up drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoMark {
    Image,
    Fallback,
}

enum Lifecycle<W: Write> {
    Open(PdfDocument<W>),
    Finalized,
}

/// Paginated layout engine.
///
/// Owns the drawing surface and the page cursor. A document moves
/// through `Open` (any number of `new_page` calls) to `Finalized`; the
/// unopened state has no value, since the only ways to get an engine
/// are [`PageLayoutEngine::create`] and [`PageLayoutEngine::new`].
///
/// Every drawing primitive takes its style explicitly; nothing a call
/// sets leaks into the next one.
pub struct PageLayoutEngine<W: Write> {
    state: Lifecycle<W>,
    size: PageSize,
    theme: LayoutTheme,
    page_number: u32,
    pages_committed: u32,
    images: HashMap<PathBuf, Option<(ImageId, u32, u32)>>,
}

impl PageLayoutEngine<BufWriter<File>> {
    /// Open a document backed by the file at `path`, truncating it if
    /// it exists. Fails before any drawing if the path is not writable.
    pub fn create<P: AsRef<Path>>(path: P, size: PageSize) -> Result<Self> {
        let path = path.as_ref();
        let doc = PdfDocument::create(path)?;
        debug!(path = %path.display(), "opened output file");
        Ok(Self::from_document(doc, size))
    }
}

impl<W: Write> PageLayoutEngine<W> {
    /// Open a document over an arbitrary writer.
    pub fn new(writer: W, size: PageSize) -> Result<Self> {
        Ok(Self::from_document(PdfDocument::new(writer)?, size))
    }

    fn from_document(doc: PdfDocument<W>, size: PageSize) -> Self {
        PageLayoutEngine {
            state: Lifecycle::Open(doc),
            size,
            theme: LayoutTheme::default(),
            page_number: 0,
            pages_committed: 0,
            images: HashMap::new(),
        }
    }

    /// Replace the styling used by placeholders, callouts and the
    /// fallback logo mark.
    pub fn with_theme(mut self, theme: LayoutTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &LayoutTheme {
        &self.theme
    }

    pub fn page_size(&self) -> PageSize {
        self.size
    }

    /// Number of the current page; 0 before the first `new_page`.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Pages committed to the output so far.
    pub fn pages_committed(&self) -> u32 {
        self.pages_committed
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, Lifecycle::Finalized)
    }

    fn document(&mut self, operation: &'static str) -> Result<&mut PdfDocument<W>> {
        match &mut self.state {
            Lifecycle::Open(doc) => Ok(doc),
            Lifecycle::Finalized => Err(LayoutError::InvalidState {
                operation,
                state: "finalized",
            }),
        }
    }

    /// The surface, provided a page is open to draw on.
    fn surface(&mut self, operation: &'static str) -> Result<&mut PdfDocument<W>> {
        let doc = self.document(operation)?;
        if !doc.has_open_page() {
            return Err(LayoutError::InvalidState {
                operation,
                state: "open but has no page yet",
            });
        }
        Ok(doc)
    }

    pub fn set_compression(&mut self, enabled: bool) -> Result<()> {
        self.document("set_compression")?.set_compression(enabled);
        Ok(())
    }

    pub fn set_info(&mut self, key: &str, value: &str) -> Result<()> {
        self.document("set_info")?.set_info(key, value);
        Ok(())
    }

    /// Commit the previous page, if any, and start the next one. A
    /// background color fills the whole page before anything else.
    pub fn new_page(&mut self, background: Option<Color>) -> Result<u32> {
        let size = self.size;
        let doc = self.document("new_page")?;
        let committing = doc.has_open_page();
        doc.begin_page(size.width, size.height)?;
        if let Some(color) = background {
            doc.save_state()
                .set_fill_color(color)
                .rect(0.0, 0.0, size.width, size.height)
                .fill()
                .restore_state();
        }
        if committing {
            self.pages_committed += 1;
            debug!(page = self.page_number, "committed page");
        }
        self.page_number += 1;
        Ok(self.page_number)
    }

    /// Width of `text` in points under `style`.
    pub fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        style.measure(text)
    }

    /// Greedy word-wrap; see [`crate::text::wrap_text`].
    pub fn wrap_text<'a>(
        &self,
        text: &'a str,
        style: &TextStyle,
        max_width: f64,
    ) -> WrapLines<'a> {
        wrap_text(text, style, max_width)
    }

    /// Draw one line of text anchored at (x, y). Alignment moves the
    /// effective x by the measured width; y is always the baseline.
    pub fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
        align: Align,
    ) -> Result<()> {
        let start = align.start_x(x, style.measure(text));
        self.surface("draw_text")?
            .place_text_styled(text, start, y, style);
        Ok(())
    }

    /// Filled rectangle with its lower-left corner at (x, y).
    pub fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> Result<()> {
        self.surface("fill_rect")?
            .save_state()
            .set_fill_color(color)
            .rect(x, y, width, height)
            .fill()
            .restore_state();
        Ok(())
    }

    /// Rectangle outline with its lower-left corner at (x, y).
    pub fn stroke_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        line_width: f64,
    ) -> Result<()> {
        self.surface("stroke_rect")?
            .save_state()
            .set_stroke_color(color)
            .set_line_width(line_width)
            .rect(x, y, width, height)
            .stroke()
            .restore_state();
        Ok(())
    }

    /// Filled circle centered on (cx, cy).
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> Result<()> {
        self.surface("fill_circle")?
            .save_state()
            .set_fill_color(color)
            .circle(cx, cy, radius)
            .fill()
            .restore_state();
        Ok(())
    }

    /// Stand-in for an image: a filled rectangle with the label
    /// centered across it, just below the vertical middle.
    pub fn draw_placeholder_box(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        label: &str,
    ) -> Result<()> {
        let fill = self.theme.placeholder_fill;
        let caption = self.theme.placeholder_caption;
        self.fill_rect(x, y, width, height, fill)?;
        self.draw_text(x + width / 2.0, y + height / 2.0 - 5.0, label, &caption, Align::Center)
    }

    /// Fixed-height bordered panel with a bold title and at most
    /// [`CALLOUT_BODY_LINES`] wrapped lines of body text; further lines
    /// are dropped. Returns the number of body lines drawn.
    pub fn draw_callout_box(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        title: &str,
        body: &str,
    ) -> Result<usize> {
        let t = self.theme.clone();
        let height = t.callout_height;
        let text_x = x + t.callout_padding;

        self.fill_rect(x, y, width, height, t.callout_fill)?;
        self.stroke_rect(x, y, width, height, t.callout_border, t.callout_border_width)?;
        self.draw_text(text_x, y + height - 20.0, title, &t.callout_title, Align::Left)?;

        let wrap_width = width - 2.0 * t.callout_padding;
        let mut line_y = y + height - 35.0;
        let mut drawn = 0;
        for line in wrap_text(body, &t.callout_body, wrap_width).take(CALLOUT_BODY_LINES) {
            self.draw_text(text_x, line_y, &line, &t.callout_body, Align::Left)?;
            line_y -= t.callout_body_leading;
            drawn += 1;
        }
        Ok(drawn)
    }

    /// Draw the logo image scaled into a `size` square centered on
    /// (cx, cy). A missing or undecodable image is replaced by a filled
    /// circle carrying the fallback label; that failure never surfaces.
    pub fn draw_logo(
        &mut self,
        cx: f64,
        cy: f64,
        size: f64,
        source: &LogoSource,
    ) -> Result<LogoMark> {
        self.surface("draw_logo")?;
        let image = match &source.path {
            Some(path) => self.resolve_image(path)?,
            None => None,
        };

        match image {
            Some((id, w, h)) => {
                let placement = ImagePlacement::centered_square(w, h, cx, cy, size);
                self.surface("draw_logo")?.place_image(id, &placement);
                Ok(LogoMark::Image)
            }
            None => {
                let fill = self.theme.logo_mark_fill;
                let label = self.theme.logo_mark_label;
                self.fill_circle(cx, cy, size / 2.0, fill)?;
                self.draw_text(cx, cy - 5.0, &source.fallback_label, &label, Align::Center)?;
                Ok(LogoMark::Fallback)
            }
        }
    }

    /// Load and embed an image once per path. Decode failures are
    /// remembered so the warning is logged once.
    fn resolve_image(&mut self, path: &Path) -> Result<Option<(ImageId, u32, u32)>> {
        if let Some(cached) = self.images.get(path) {
            return Ok(*cached);
        }
        let resolved = match load_image_file(path) {
            Ok(image) => {
                let id = self.document("draw_logo")?.add_image(&image)?;
                Some((id, image.width, image.height))
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "logo unavailable, drawing fallback mark");
                None
            }
        };
        self.images.insert(path.to_path_buf(), resolved);
        Ok(resolved)
    }

    /// Commit the last page, write the document trailer and flush.
    /// Valid exactly once; any later call fails with `InvalidState`.
    pub fn finalize(&mut self) -> Result<W> {
        match std::mem::replace(&mut self.state, Lifecycle::Finalized) {
            Lifecycle::Open(doc) => {
                let committing = doc.has_open_page();
                let writer = doc.end_document()?;
                if committing {
                    self.pages_committed += 1;
                }
                info!(pages = self.page_number, "document finalized");
                Ok(writer)
            }
            Lifecycle::Finalized => Err(LayoutError::InvalidState {
                operation: "finalize",
                state: "finalized",
            }),
        }
    }
}
