use std::fmt;
use std::path::PathBuf;

use lookbook_core::{Color, LayoutTheme, TextStyle};
use serde::Deserialize;

/// The `settings` block of the content file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub output_path: PathBuf,
    /// Logo image (PNG or JPEG). Absent or unreadable means the
    /// fallback mark is drawn instead.
    pub logo_path: Option<PathBuf>,
    pub compress: bool,
    pub background: HexColor,
    pub ink: HexColor,
    pub accent: HexColor,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            output_path: PathBuf::from("output/lookbook.pdf"),
            logo_path: None,
            compress: true,
            background: HexColor(Color::rgb8(0xe0, 0xe0, 0xe0)),
            ink: HexColor(Color::rgb8(0x17, 0x17, 0x17)),
            accent: HexColor(Color::rgb8(0x73, 0x73, 0x73)),
        }
    }
}

impl RenderSettings {
    /// Engine theme with the placeholder, callout and logo mark text
    /// recolored to this palette.
    pub fn theme(&self) -> LayoutTheme {
        let base = LayoutTheme::default();
        let (ink, accent) = (self.ink.0, self.accent.0);
        LayoutTheme {
            placeholder_caption: TextStyle {
                color: accent,
                ..base.placeholder_caption
            },
            callout_title: TextStyle {
                color: ink,
                ..base.callout_title
            },
            callout_body: TextStyle {
                color: accent,
                ..base.callout_body
            },
            logo_mark_fill: ink,
            ..base
        }
    }
}

/// A color written as `#rrggbb` in the content file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(pub Color);

#[derive(Debug)]
pub struct BadColor(String);

impl fmt::Display for BadColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a #rrggbb color, got {:?}", self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = BadColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).map(HexColor).ok_or(BadColor(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_takes_defaults() {
        let settings: RenderSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, RenderSettings::default());
        assert_eq!(settings.output_path, PathBuf::from("output/lookbook.pdf"));
        assert!(settings.compress);
    }

    #[test]
    fn colors_parse_from_hex() {
        let settings: RenderSettings =
            serde_json::from_str(r##"{ "background": "#ffffff", "compress": false }"##).unwrap();
        assert_eq!(settings.background.0, Color::WHITE);
        assert!(!settings.compress);
    }

    #[test]
    fn default_palette_matches_default_theme() {
        assert_eq!(RenderSettings::default().theme(), LayoutTheme::default());
    }

    #[test]
    fn palette_recolors_the_theme() {
        let settings: RenderSettings =
            serde_json::from_str(r##"{ "ink": "#000000", "accent": "#ff0000" }"##).unwrap();
        let theme = settings.theme();
        assert_eq!(theme.callout_title.color, Color::BLACK);
        assert_eq!(theme.logo_mark_fill, Color::BLACK);
        assert_eq!(theme.callout_body.color, Color::rgb8(0xff, 0, 0));
        assert_eq!(theme.placeholder_caption.color, Color::rgb8(0xff, 0, 0));
        assert_eq!(theme.callout_body.font_size, 7.0);
    }

    #[test]
    fn malformed_color_is_rejected() {
        let err = serde_json::from_str::<RenderSettings>(r#"{ "ink": "black" }"#).unwrap_err();
        assert!(err.to_string().contains("#rrggbb"));
    }
}
