/// Standard 14 fonts available to layouts. Only the Helvetica and
/// Courier families are carried; they are guaranteed present in every
/// PDF viewer without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl BuiltinFont {
    pub const ALL: [BuiltinFont; 8] = [
        BuiltinFont::Helvetica,
        BuiltinFont::HelveticaBold,
        BuiltinFont::HelveticaOblique,
        BuiltinFont::HelveticaBoldOblique,
        BuiltinFont::Courier,
        BuiltinFont::CourierBold,
        BuiltinFont::CourierOblique,
        BuiltinFont::CourierBoldOblique,
    ];

    /// Resource name used in content streams (e.g. "F1").
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
            BuiltinFont::HelveticaOblique => "F3",
            BuiltinFont::HelveticaBoldOblique => "F4",
            BuiltinFont::Courier => "F5",
            BuiltinFont::CourierBold => "F6",
            BuiltinFont::CourierOblique => "F7",
            BuiltinFont::CourierBoldOblique => "F8",
        }
    }

    /// The PDF BaseFont name.
    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::CourierBold => "Courier-Bold",
            BuiltinFont::CourierOblique => "Courier-Oblique",
            BuiltinFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            BuiltinFont::HelveticaBold
                | BuiltinFont::HelveticaBoldOblique
                | BuiltinFont::CourierBold
                | BuiltinFont::CourierBoldOblique
        )
    }

    fn is_courier(&self) -> bool {
        matches!(
            self,
            BuiltinFont::Courier
                | BuiltinFont::CourierBold
                | BuiltinFont::CourierOblique
                | BuiltinFont::CourierBoldOblique
        )
    }
}

/// Character widths for Helvetica (ASCII 32..=126) in units of 1/1000 em.
/// Source: Adobe Helvetica AFM data.
const HELVETICA_WIDTHS: [u16; 95] = [
    278,  // 32 space
    278,  // 33 !
    355,  // 34 "
    556,  // 35 #
    556,  // 36 $
    889,  // 37 %
    667,  // 38 &
    191,  // 39 '
    333,  // 40 (
    333,  // 41 )
    389,  // 42 *
    584,  // 43 +
    278,  // 44 ,
    333,  // 45 -
    278,  // 46 .
    278,  // 47 /
    556,  // 48 0
    556,  // 49 1
    556,  // 50 2
    556,  // 51 3
    556,  // 52 4
    556,  // 53 5
    556,  // 54 6
    556,  // 55 7
    556,  // 56 8
    556,  // 57 9
    278,  // 58 :
    278,  // 59 ;
    584,  // 60 <
    584,  // 61 =
    584,  // 62 >
    556,  // 63 ?
    1015, // 64 @
    667,  // 65 A
    667,  // 66 B
    722,  // 67 C
    722,  // 68 D
    667,  // 69 E
    611,  // 70 F
    778,  // 71 G
    722,  // 72 H
    278,  // 73 I
    500,  // 74 J
    667,  // 75 K
    556,  // 76 L
    833,  // 77 M
    722,  // 78 N
    778,  // 79 O
    667,  // 80 P
    778,  // 81 Q
    722,  // 82 R
    667,  // 83 S
    611,  // 84 T
    722,  // 85 U
    667,  // 86 V
    944,  // 87 W
    667,  // 88 X
    667,  // 89 Y
    611,  // 90 Z
    278,  // 91 [
    278,  // 92 backslash
    278,  // 93 ]
    469,  // 94 ^
    556,  // 95 _
    333,  // 96 `
    556,  // 97 a
    556,  // 98 b
    500,  // 99 c
    556,  // 100 d
    556,  // 101 e
    278,  // 102 f
    556,  // 103 g
    556,  // 104 h
    222,  // 105 i
    222,  // 106 j
    500,  // 107 k
    222,  // 108 l
    833,  // 109 m
    556,  // 110 n
    556,  // 111 o
    556,  // 112 p
    556,  // 113 q
    333,  // 114 r
    500,  // 115 s
    278,  // 116 t
    556,  // 117 u
    500,  // 118 v
    722,  // 119 w
    500,  // 120 x
    500,  // 121 y
    500,  // 122 z
    334,  // 123 {
    260,  // 124 |
    334,  // 125 }
    584,  // 126 ~
];

/// Character widths for Helvetica-Bold (ASCII 32..=126) in 1/1000 em.
/// Source: Adobe Helvetica-Bold AFM data.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, // 32 space
    333, // 33 !
    474, // 34 "
    556, // 35 #
    556, // 36 $
    889, // 37 %
    722, // 38 &
    238, // 39 '
    333, // 40 (
    333, // 41 )
    389, // 42 *
    584, // 43 +
    278, // 44 ,
    333, // 45 -
    278, // 46 .
    278, // 47 /
    556, // 48 0
    556, // 49 1
    556, // 50 2
    556, // 51 3
    556, // 52 4
    556, // 53 5
    556, // 54 6
    556, // 55 7
    556, // 56 8
    556, // 57 9
    333, // 58 :
    333, // 59 ;
    584, // 60 <
    584, // 61 =
    584, // 62 >
    611, // 63 ?
    975, // 64 @
    722, // 65 A
    722, // 66 B
    722, // 67 C
    722, // 68 D
    667, // 69 E
    611, // 70 F
    778, // 71 G
    722, // 72 H
    278, // 73 I
    556, // 74 J
    722, // 75 K
    611, // 76 L
    833, // 77 M
    722, // 78 N
    778, // 79 O
    667, // 80 P
    778, // 81 Q
    722, // 82 R
    667, // 83 S
    611, // 84 T
    722, // 85 U
    667, // 86 V
    944, // 87 W
    667, // 88 X
    667, // 89 Y
    611, // 90 Z
    333, // 91 [
    278, // 92 backslash
    333, // 93 ]
    584, // 94 ^
    556, // 95 _
    333, // 96 `
    556, // 97 a
    611, // 98 b
    556, // 99 c
    611, // 100 d
    556, // 101 e
    333, // 102 f
    611, // 103 g
    611, // 104 h
    278, // 105 i
    278, // 106 j
    556, // 107 k
    278, // 108 l
    889, // 109 m
    611, // 110 n
    611, // 111 o
    611, // 112 p
    611, // 113 q
    389, // 114 r
    556, // 115 s
    333, // 116 t
    611, // 117 u
    556, // 118 v
    778, // 119 w
    556, // 120 x
    556, // 121 y
    500, // 122 z
    389, // 123 {
    280, // 124 |
    389, // 125 }
    584, // 126 ~
];

/// Courier is monospaced at 600 units for every glyph.
const COURIER_WIDTH: u16 = 600;

/// Helvetica widths for WinAnsi codes 0x80..=0xFF, indexed from 0x80.
/// Codes the encoding leaves undefined are 0; nothing encodes to them.
const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    556,  // 0x80 Euro
    0,    // 0x81 undefined
    222,  // 0x82 quotesinglbase
    556,  // 0x83 florin
    333,  // 0x84 quotedblbase
    1000, // 0x85 ellipsis
    556,  // 0x86 dagger
    556,  // 0x87 daggerdbl
    333,  // 0x88 circumflex
    1000, // 0x89 perthousand
    667,  // 0x8A Scaron
    333,  // 0x8B guilsinglleft
    1000, // 0x8C OE
    0,    // 0x8D undefined
    611,  // 0x8E Zcaron
    0,    // 0x8F undefined
    0,    // 0x90 undefined
    222,  // 0x91 quoteleft
    222,  // 0x92 quoteright
    333,  // 0x93 quotedblleft
    333,  // 0x94 quotedblright
    350,  // 0x95 bullet
    556,  // 0x96 endash
    1000, // 0x97 emdash
    333,  // 0x98 tilde
    1000, // 0x99 trademark
    500,  // 0x9A scaron
    333,  // 0x9B guilsinglright
    944,  // 0x9C oe
    0,    // 0x9D undefined
    500,  // 0x9E zcaron
    667,  // 0x9F Ydieresis
    278,  // 0xA0 nbspace
    333,  // 0xA1 exclamdown
    556,  // 0xA2 cent
    556,  // 0xA3 sterling
    556,  // 0xA4 currency
    556,  // 0xA5 yen
    260,  // 0xA6 brokenbar
    556,  // 0xA7 section
    333,  // 0xA8 dieresis
    737,  // 0xA9 copyright
    370,  // 0xAA ordfeminine
    556,  // 0xAB guillemotleft
    584,  // 0xAC logicalnot
    333,  // 0xAD hyphen
    737,  // 0xAE registered
    333,  // 0xAF macron
    400,  // 0xB0 degree
    584,  // 0xB1 plusminus
    333,  // 0xB2 twosuperior
    333,  // 0xB3 threesuperior
    333,  // 0xB4 acute
    556,  // 0xB5 mu
    537,  // 0xB6 paragraph
    278,  // 0xB7 periodcentered
    333,  // 0xB8 cedilla
    333,  // 0xB9 onesuperior
    365,  // 0xBA ordmasculine
    556,  // 0xBB guillemotright
    834,  // 0xBC onequarter
    834,  // 0xBD onehalf
    834,  // 0xBE threequarters
    611,  // 0xBF questiondown
    667,  // 0xC0 Agrave
    667,  // 0xC1 Aacute
    667,  // 0xC2 Acircumflex
    667,  // 0xC3 Atilde
    667,  // 0xC4 Adieresis
    667,  // 0xC5 Aring
    1000, // 0xC6 AE
    722,  // 0xC7 Ccedilla
    667,  // 0xC8 Egrave
    667,  // 0xC9 Eacute
    667,  // 0xCA Ecircumflex
    667,  // 0xCB Edieresis
    278,  // 0xCC Igrave
    278,  // 0xCD Iacute
    278,  // 0xCE Icircumflex
    278,  // 0xCF Idieresis
    722,  // 0xD0 Eth
    722,  // 0xD1 Ntilde
    778,  // 0xD2 Ograve
    778,  // 0xD3 Oacute
    778,  // 0xD4 Ocircumflex
    778,  // 0xD5 Otilde
    778,  // 0xD6 Odieresis
    584,  // 0xD7 multiply
    778,  // 0xD8 Oslash
    722,  // 0xD9 Ugrave
    722,  // 0xDA Uacute
    722,  // 0xDB Ucircumflex
    722,  // 0xDC Udieresis
    667,  // 0xDD Yacute
    667,  // 0xDE Thorn
    611,  // 0xDF germandbls
    556,  // 0xE0 agrave
    556,  // 0xE1 aacute
    556,  // 0xE2 acircumflex
    556,  // 0xE3 atilde
    556,  // 0xE4 adieresis
    556,  // 0xE5 aring
    889,  // 0xE6 ae
    500,  // 0xE7 ccedilla
    556,  // 0xE8 egrave
    556,  // 0xE9 eacute
    556,  // 0xEA ecircumflex
    556,  // 0xEB edieresis
    278,  // 0xEC igrave
    278,  // 0xED iacute
    278,  // 0xEE icircumflex
    278,  // 0xEF idieresis
    556,  // 0xF0 eth
    556,  // 0xF1 ntilde
    556,  // 0xF2 ograve
    556,  // 0xF3 oacute
    556,  // 0xF4 ocircumflex
    556,  // 0xF5 otilde
    556,  // 0xF6 odieresis
    584,  // 0xF7 divide
    611,  // 0xF8 oslash
    556,  // 0xF9 ugrave
    556,  // 0xFA uacute
    556,  // 0xFB ucircumflex
    556,  // 0xFC udieresis
    500,  // 0xFD yacute
    556,  // 0xFE thorn
    500,  // 0xFF ydieresis
];

/// Helvetica-Bold widths for WinAnsi codes 0x80..=0xFF.
const HELVETICA_BOLD_HIGH_WIDTHS: [u16; 128] = [
    556,  // 0x80 Euro
    0,    // 0x81 undefined
    278,  // 0x82 quotesinglbase
    556,  // 0x83 florin
    500,  // 0x84 quotedblbase
    1000, // 0x85 ellipsis
    556,  // 0x86 dagger
    556,  // 0x87 daggerdbl
    333,  // 0x88 circumflex
    1000, // 0x89 perthousand
    667,  // 0x8A Scaron
    333,  // 0x8B guilsinglleft
    1000, // 0x8C OE
    0,    // 0x8D undefined
    611,  // 0x8E Zcaron
    0,    // 0x8F undefined
    0,    // 0x90 undefined
    278,  // 0x91 quoteleft
    278,  // 0x92 quoteright
    500,  // 0x93 quotedblleft
    500,  // 0x94 quotedblright
    350,  // 0x95 bullet
    556,  // 0x96 endash
    1000, // 0x97 emdash
    333,  // 0x98 tilde
    1000, // 0x99 trademark
    556,  // 0x9A scaron
    333,  // 0x9B guilsinglright
    944,  // 0x9C oe
    0,    // 0x9D undefined
    500,  // 0x9E zcaron
    667,  // 0x9F Ydieresis
    278,  // 0xA0 nbspace
    333,  // 0xA1 exclamdown
    556,  // 0xA2 cent
    556,  // 0xA3 sterling
    556,  // 0xA4 currency
    556,  // 0xA5 yen
    280,  // 0xA6 brokenbar
    556,  // 0xA7 section
    333,  // 0xA8 dieresis
    737,  // 0xA9 copyright
    370,  // 0xAA ordfeminine
    556,  // 0xAB guillemotleft
    584,  // 0xAC logicalnot
    333,  // 0xAD hyphen
    737,  // 0xAE registered
    333,  // 0xAF macron
    400,  // 0xB0 degree
    584,  // 0xB1 plusminus
    333,  // 0xB2 twosuperior
    333,  // 0xB3 threesuperior
    333,  // 0xB4 acute
    611,  // 0xB5 mu
    556,  // 0xB6 paragraph
    278,  // 0xB7 periodcentered
    333,  // 0xB8 cedilla
    333,  // 0xB9 onesuperior
    365,  // 0xBA ordmasculine
    556,  // 0xBB guillemotright
    834,  // 0xBC onequarter
    834,  // 0xBD onehalf
    834,  // 0xBE threequarters
    611,  // 0xBF questiondown
    722,  // 0xC0 Agrave
    722,  // 0xC1 Aacute
    722,  // 0xC2 Acircumflex
    722,  // 0xC3 Atilde
    722,  // 0xC4 Adieresis
    722,  // 0xC5 Aring
    1000, // 0xC6 AE
    722,  // 0xC7 Ccedilla
    667,  // 0xC8 Egrave
    667,  // 0xC9 Eacute
    667,  // 0xCA Ecircumflex
    667,  // 0xCB Edieresis
    278,  // 0xCC Igrave
    278,  // 0xCD Iacute
    278,  // 0xCE Icircumflex
    278,  // 0xCF Idieresis
    722,  // 0xD0 Eth
    722,  // 0xD1 Ntilde
    778,  // 0xD2 Ograve
    778,  // 0xD3 Oacute
    778,  // 0xD4 Ocircumflex
    778,  // 0xD5 Otilde
    778,  // 0xD6 Odieresis
    584,  // 0xD7 multiply
    778,  // 0xD8 Oslash
    722,  // 0xD9 Ugrave
    722,  // 0xDA Uacute
    722,  // 0xDB Ucircumflex
    722,  // 0xDC Udieresis
    667,  // 0xDD Yacute
    667,  // 0xDE Thorn
    611,  // 0xDF germandbls
    556,  // 0xE0 agrave
    556,  // 0xE1 aacute
    556,  // 0xE2 acircumflex
    556,  // 0xE3 atilde
    556,  // 0xE4 adieresis
    556,  // 0xE5 aring
    889,  // 0xE6 ae
    556,  // 0xE7 ccedilla
    556,  // 0xE8 egrave
    556,  // 0xE9 eacute
    556,  // 0xEA ecircumflex
    556,  // 0xEB edieresis
    278,  // 0xEC igrave
    278,  // 0xED iacute
    278,  // 0xEE icircumflex
    278,  // 0xEF idieresis
    611,  // 0xF0 eth
    611,  // 0xF1 ntilde
    611,  // 0xF2 ograve
    611,  // 0xF3 oacute
    611,  // 0xF4 ocircumflex
    611,  // 0xF5 otilde
    611,  // 0xF6 odieresis
    584,  // 0xF7 divide
    611,  // 0xF8 oslash
    611,  // 0xF9 ugrave
    611,  // 0xFA uacute
    611,  // 0xFB ucircumflex
    611,  // 0xFC udieresis
    556,  // 0xFD yacute
    611,  // 0xFE thorn
    556,  // 0xFF ydieresis
];

/// Map a character to its WinAnsiEncoding byte, if it has one.
///
/// Latin-1 code points map to themselves; the 0x80..=0x9F block holds
/// the typographic punctuation (dashes, quotes, bullet, euro).
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

/// Byte written for `ch`: its WinAnsi code, or `?` when it has none.
fn encoded_byte(ch: char) -> u8 {
    win_ansi_byte(ch).unwrap_or(b'?')
}

/// Encode text for a simple font declared with WinAnsiEncoding.
/// Characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(encoded_byte).collect()
}

/// Font metrics for the builtin fonts.
pub struct FontMetrics;

impl FontMetrics {
    /// Width of the glyph at WinAnsi code `byte`, in 1/1000 em units.
    pub fn glyph_width(font: BuiltinFont, byte: u8) -> u16 {
        if font.is_courier() {
            return COURIER_WIDTH;
        }
        let (low, high) = if font.is_bold() {
            (&HELVETICA_BOLD_WIDTHS, &HELVETICA_BOLD_HIGH_WIDTHS)
        } else {
            (&HELVETICA_WIDTHS, &HELVETICA_HIGH_WIDTHS)
        };
        match byte {
            0x20..=0x7E => low[(byte - 0x20) as usize],
            0x80..=0xFF => high[(byte - 0x80) as usize],
            _ => low[(b'?' - 0x20) as usize],
        }
    }

    /// Width of a character in 1/1000 em units, as drawn: characters
    /// outside WinAnsi measure as the `?` they are written as.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        Self::glyph_width(font, encoded_byte(ch))
    }

    /// Total advance of `text` in 1/1000 em units. Integer so that
    /// comparisons against a width limit are exact.
    pub fn text_units(text: &str, font: BuiltinFont) -> u32 {
        text.chars()
            .map(|ch| Self::char_width(font, ch) as u32)
            .sum()
    }

    /// Convert font units to points at the given size.
    pub fn units_to_points(units: u32, font_size: f64) -> f64 {
        units as f64 * font_size / 1000.0
    }

    /// Width of `text` in points.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        Self::units_to_points(Self::text_units(text, font), font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_ascii_widths() {
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, ' '), 278);
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, 'A'), 667);
        assert_eq!(FontMetrics::char_width(BuiltinFont::HelveticaBold, 'A'), 722);
    }

    #[test]
    fn oblique_shares_upright_metrics() {
        for ch in "Photo: IV lounge".chars() {
            assert_eq!(
                FontMetrics::char_width(BuiltinFont::HelveticaOblique, ch),
                FontMetrics::char_width(BuiltinFont::Helvetica, ch),
            );
        }
    }

    #[test]
    fn accented_letters_use_base_width() {
        assert_eq!(
            FontMetrics::char_width(BuiltinFont::Helvetica, '\u{e9}'),
            FontMetrics::char_width(BuiltinFont::Helvetica, 'e'),
        );
    }

    #[test]
    fn em_dash_is_full_em() {
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, '\u{2014}'), 1000);
    }

    #[test]
    fn unencodable_char_measures_as_question_mark() {
        for font in [BuiltinFont::Helvetica, BuiltinFont::HelveticaBold] {
            let question = FontMetrics::char_width(font, '?');
            assert_eq!(FontMetrics::char_width(font, '\u{4e2d}'), question);
            assert_eq!(FontMetrics::char_width(font, '\n'), question);
        }
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, '\u{4e2d}'), 556);
    }

    #[test]
    fn latin1_letters_use_their_own_metrics() {
        let w = |ch| FontMetrics::char_width(BuiltinFont::Helvetica, ch);
        assert_eq!(w('\u{e6}'), 889); // ae
        assert_eq!(w('\u{df}'), 611); // germandbls
        assert_eq!(w('\u{d8}'), 778); // Oslash
        assert_eq!(w('\u{bd}'), 834); // onehalf
        assert_eq!(w('\u{bf}'), 611); // questiondown
        assert_eq!(FontMetrics::char_width(BuiltinFont::HelveticaBold, '\u{e7}'), 556);
    }

    #[test]
    fn every_encodable_char_has_a_width() {
        let encodable = (0x20u32..=0x7E)
            .chain(0xA0..=0xFF)
            .filter_map(char::from_u32)
            .chain("\u{20ac}\u{2026}\u{2018}\u{201d}\u{2022}\u{2122}\u{0153}\u{0178}".chars());
        for ch in encodable {
            let byte = win_ansi_byte(ch).unwrap();
            for font in BuiltinFont::ALL {
                let width = FontMetrics::char_width(font, ch);
                assert!(width > 0, "{:?} has no width in {:?}", ch, font);
                assert_eq!(width, FontMetrics::glyph_width(font, byte));
            }
        }
    }

    #[test]
    fn measured_width_follows_encoded_bytes() {
        let text = "\u{e6}\u{e6}\u{e6}\u{e6} \u{e6}\u{e6}\u{e6}\u{e6} \u{4e2d}";
        let from_bytes: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|b| FontMetrics::glyph_width(BuiltinFont::Helvetica, b) as u32)
            .sum();
        assert_eq!(FontMetrics::text_units(text, BuiltinFont::Helvetica), from_bytes);
    }

    #[test]
    fn courier_is_monospaced() {
        assert_eq!(FontMetrics::measure_text("iiii", BuiltinFont::Courier, 10.0), 24.0);
        assert_eq!(FontMetrics::measure_text("MMMM", BuiltinFont::CourierBold, 10.0), 24.0);
    }

    #[test]
    fn measure_text_hello() {
        // H=722, e=556, l=222, l=222, o=556 => 2278 units
        let w = FontMetrics::measure_text("Hello", BuiltinFont::Helvetica, 10.0);
        assert!((w - 22.78).abs() < 1e-9);
    }

    #[test]
    fn win_ansi_encoding() {
        assert_eq!(encode_win_ansi("A\u{b7}\u{2013}\u{2014}"), vec![b'A', 0xB7, 0x96, 0x97]);
        assert_eq!(encode_win_ansi("\u{4e2d}"), vec![b'?']);
    }

    #[test]
    fn resource_names_are_unique() {
        let mut names: Vec<&str> = BuiltinFont::ALL.iter().map(|f| f.pdf_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), BuiltinFont::ALL.len());
    }
}
