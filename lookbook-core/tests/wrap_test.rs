use lookbook_core::fonts::encode_win_ansi;
use lookbook_core::{wrap_text, BuiltinFont, Color, FontMetrics, TextStyle};
use proptest::prelude::*;

/// Width of the bytes actually written for `line`, in points.
fn drawn_width(line: &str, style: &TextStyle) -> f64 {
    let units: u32 = encode_win_ansi(line)
        .into_iter()
        .map(|b| FontMetrics::glyph_width(style.font, b) as u32)
        .sum();
    FontMetrics::units_to_points(units, style.font_size)
}

fn body() -> TextStyle {
    TextStyle::new(BuiltinFont::Helvetica, 10.0, Color::BLACK)
}

#[test]
fn four_words_per_line() {
    let style = body();
    let width = style.measure("Range Medical was built");
    let lines: Vec<String> =
        wrap_text("Range Medical was built on a simple idea", &style, width).collect();
    assert_eq!(lines, ["Range Medical was built", "on a simple idea"]);
}

#[test]
fn narrower_than_any_pair_gives_one_word_per_line() {
    let lines: Vec<String> = wrap_text("peak line circle", &body(), 5.0).collect();
    assert_eq!(lines, ["peak", "line", "circle"]);
}

#[test]
fn width_depends_on_font_and_size() {
    let text = "Restore your hormones to optimal levels";
    let regular = wrap_text(text, &body(), 120.0).count();
    let bold_large = wrap_text(
        text,
        &TextStyle::new(BuiltinFont::HelveticaBold, 14.0, Color::BLACK),
        120.0,
    )
    .count();
    assert!(bold_large > regular);
}

#[test]
fn restarting_replays_the_same_lines() {
    let style = body();
    let text = "Our mission is simple: help you optimize, perform, and live beyond your limits.";
    let first: Vec<String> = wrap_text(text, &style, 150.0).collect();
    let second: Vec<String> = wrap_text(text, &style, 150.0).collect();
    assert_eq!(first, second);
    assert!(first.len() > 1);
}

#[test]
fn wide_latin1_letters_are_not_undercounted() {
    let style = body();
    let word = "\u{e6}\u{e6}\u{e6}\u{e6}";
    let text = format!("{word} {word}");
    let max_width = style.measure(word) + 5.0;
    let lines: Vec<String> = wrap_text(&text, &style, max_width).collect();
    assert_eq!(lines, [word, word]);
    assert!((style.measure(&text) - 73.9).abs() < 1e-9);
}

#[test]
fn unencodable_chars_measure_as_their_replacement() {
    let style = body();
    assert_eq!(style.measure("\u{4e2d}"), style.measure("?"));
}

proptest! {
    #[test]
    fn latin1_lines_fit_as_drawn(
        words in prop::collection::vec(
            "[a-zA-Z\u{e0}-\u{ff}\u{c0}-\u{df}\u{a1}-\u{bf}\u{2013}\u{2014}\u{2019}\u{201c}\u{20ac}\u{4e2d}]{1,12}",
            0..40,
        ),
        max_width in 1.0f64..300.0,
        font in prop::sample::select(vec![BuiltinFont::Helvetica, BuiltinFont::HelveticaBold]),
    ) {
        let style = TextStyle::new(font, 10.0, Color::BLACK);
        let text = words.join(" ");
        for line in wrap_text(&text, &style, max_width) {
            let drawn = drawn_width(&line, &style);
            prop_assert_eq!(style.measure(&line), drawn);
            prop_assert!(
                !line.contains(' ') || drawn <= max_width,
                "line {:?} draws {} > {}", line, drawn, max_width
            );
        }
    }

    #[test]
    fn lines_fit_unless_single_word(
        words in prop::collection::vec("[a-zA-Z0-9,.$]{1,14}", 0..60),
        max_width in 1.0f64..400.0,
        size in prop::sample::select(vec![7.0f64, 10.0, 11.0, 22.0]),
    ) {
        let style = TextStyle::new(BuiltinFont::Helvetica, size, Color::BLACK);
        let text = words.join(" ");
        for line in wrap_text(&text, &style, max_width) {
            let single_word = !line.contains(' ');
            prop_assert!(
                single_word || style.measure(&line) <= max_width,
                "line {:?} measures {} > {}", line, style.measure(&line), max_width
            );
        }
    }

    #[test]
    fn words_are_preserved_in_order(
        words in prop::collection::vec("[a-zA-Z]{1,10}", 0..60),
        separators in prop::collection::vec(" {1,3}|\n", 60),
        max_width in 1.0f64..300.0,
    ) {
        let mut text = String::new();
        for (word, sep) in words.iter().zip(&separators) {
            text.push_str(word);
            text.push_str(sep);
        }
        let lines: Vec<String> = wrap_text(&text, &body(), max_width).collect();
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn greedy_lines_cannot_take_the_next_word(
        words in prop::collection::vec("[a-z]{1,8}", 2..40),
        max_width in 20.0f64..200.0,
    ) {
        let style = body();
        let text = words.join(" ");
        let lines: Vec<String> = wrap_text(&text, &style, max_width).collect();
        for pair in lines.windows(2) {
            let next_word = pair[1].split(' ').next().unwrap();
            let extended = format!("{} {}", pair[0], next_word);
            prop_assert!(style.measure(&extended) > max_width);
        }
    }
}
