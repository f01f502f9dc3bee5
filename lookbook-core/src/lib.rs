pub mod document;
pub mod engine;
pub mod error;
pub mod fonts;
pub mod graphics;
pub mod images;
pub mod objects;
pub mod text;
pub mod writer;

pub use document::PdfDocument;
pub use engine::{
    LayoutTheme, LogoMark, LogoSource, PageLayoutEngine, PageSize, CALLOUT_BODY_LINES, INCH,
};
pub use error::{LayoutError, Result};
pub use fonts::{BuiltinFont, FontMetrics};
pub use graphics::Color;
pub use text::{wrap_text, Align, TextStyle, WrapLines};
