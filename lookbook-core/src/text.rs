use std::iter::Peekable;
use std::str::SplitWhitespace;

use crate::fonts::{BuiltinFont, FontMetrics};
use crate::graphics::Color;

/// Immutable text style: font, size and fill color travel together
/// into every text drawing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: BuiltinFont,
    pub font_size: f64,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font: BuiltinFont::Helvetica,
            font_size: 12.0,
            color: Color::BLACK,
        }
    }
}

impl TextStyle {
    pub fn new(font: BuiltinFont, font_size: f64, color: Color) -> Self {
        TextStyle {
            font,
            font_size,
            color,
        }
    }

    /// Width of `text` in points under this style.
    pub fn measure(&self, text: &str) -> f64 {
        FontMetrics::measure_text(text, self.font, self.font_size)
    }
}

/// Horizontal alignment of a text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Effective left edge for text of the given width anchored at `x`.
    pub fn start_x(self, x: f64, width: f64) -> f64 {
        match self {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        }
    }
}

/// Lazy greedy word-wrap over a paragraph.
///
/// Cloning yields an independent iterator from the same position, so a
/// fresh `wrap_text` call (or a clone taken before iterating) replays
/// the same lines.
#[derive(Debug, Clone)]
pub struct WrapLines<'a> {
    words: Peekable<SplitWhitespace<'a>>,
    font: BuiltinFont,
    font_size: f64,
    max_width: f64,
}

/// Break `text` into lines no wider than `max_width` points.
///
/// Words are packed greedily: a word joins the current line when the
/// line plus a space plus the word still measures within `max_width`.
/// A word wider than `max_width` on its own is emitted alone and may
/// overflow. Whitespace-only text yields no lines.
pub fn wrap_text<'a>(
    text: &'a str,
    style: &TextStyle,
    max_width: f64,
) -> WrapLines<'a> {
    WrapLines {
        words: text.split_whitespace().peekable(),
        font: style.font,
        font_size: style.font_size,
        max_width,
    }
}

impl<'a> Iterator for WrapLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.words.next()?;
        let space = FontMetrics::char_width(self.font, ' ') as u32;
        let mut line = first.to_string();
        let mut units = FontMetrics::text_units(first, self.font);

        while let Some(&word) = self.words.peek() {
            let candidate =
                units + space + FontMetrics::text_units(word, self.font);
            if FontMetrics::units_to_points(candidate, self.font_size)
                > self.max_width
            {
                break;
            }
            line.push(' ');
            line.push_str(word);
            units = candidate;
            self.words.next();
        }
        Some(line)
    }
}
