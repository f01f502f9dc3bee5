use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use lookbook_core::images::load_image;
use lookbook_core::images::ImagePlacement;
use lookbook_core::{BuiltinFont, Color, PdfDocument, TextStyle};

/// Helper: check that a byte pattern exists in the buffer.
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn full_workflow_produces_valid_pdf() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.set_info("Creator", "lookbook");
    doc.set_info("Title", "Services Look Book");
    doc.begin_page(792.0, 612.0).unwrap();
    doc.place_text_styled("Hello", 20.0, 20.0, &TextStyle::default());
    doc.end_page().unwrap();
    let bytes = doc.end_document().unwrap();

    assert!(bytes.starts_with(b"%PDF-1.7\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(contains(&bytes, b"/Type /Catalog"));
    assert!(contains(&bytes, b"/Type /Pages"));
    assert!(contains(&bytes, b"/Count 1"));
    assert!(contains(&bytes, b"/MediaBox [0 0 792.0 612.0]"));
    assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
    assert!(contains(&bytes, b"/Encoding /WinAnsiEncoding"));
    assert!(contains(&bytes, b"/F1 12 Tf"));
    assert!(contains(&bytes, b"20 20 Td"));
    assert!(contains(&bytes, b"(Hello) Tj"));
    assert!(contains(&bytes, b"(Services Look Book)"));
    assert!(contains(&bytes, b"/Info "));
}

/// A committed page is written out at `end_page`, not held until
/// `end_document`.
#[test]
fn end_page_flushes_to_writer() {
    struct TrackingWriter {
        byte_count: Rc<RefCell<usize>>,
        inner: Vec<u8>,
    }

    impl Write for TrackingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = self.inner.write(buf)?;
            *self.byte_count.borrow_mut() += n;
            Ok(n)
        }
        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    let counter = Rc::new(RefCell::new(0usize));
    let writer = TrackingWriter {
        byte_count: counter.clone(),
        inner: Vec::new(),
    };

    let mut doc = PdfDocument::new(writer).unwrap();
    let after_init = *counter.borrow();

    doc.begin_page(792.0, 612.0).unwrap();
    doc.place_text_styled("Hello", 20.0, 20.0, &TextStyle::default());
    assert_eq!(*counter.borrow(), after_init);

    doc.end_page().unwrap();
    assert!(*counter.borrow() > after_init);
}

#[test]
fn begin_page_commits_the_open_page() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(792.0, 612.0).unwrap();
    doc.begin_page(792.0, 612.0).unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"/Count 2"));
}

#[test]
fn styled_text_scopes_its_color() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(792.0, 612.0).unwrap();
    let style = TextStyle::new(BuiltinFont::HelveticaBold, 8.0, Color::rgb(1.0, 0.0, 0.0));
    doc.place_text_styled("Title", 10.0, 30.5, &style);
    let bytes = doc.end_document().unwrap();
    assert!(contains(
        &bytes,
        b"q\n1 0 0 rg\nBT\n/F2 8 Tf\n10 30.5 Td\n(Title) Tj\nET\nQ\n"
    ));
}

#[test]
fn non_ascii_text_is_win_ansi_encoded() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(792.0, 612.0).unwrap();
    doc.place_text_styled("Th\u{e9}rapie \u{2014} (NAD+)", 0.0, 0.0, &TextStyle::default());
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"(Th\xe9rapie \x97 \\(NAD+\\)) Tj"));
}

#[test]
fn circle_is_four_bezier_segments() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(792.0, 612.0).unwrap();
    doc.circle(100.0, 100.0, 50.0).fill();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"150 100 m\n"));
    assert_eq!(count(&bytes, b" c\n"), 4);
    assert!(contains(&bytes, b"h\nf\n"));
}

#[test]
fn graphics_operators() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(792.0, 612.0).unwrap();
    doc.save_state()
        .set_stroke_color(Color::rgb(0.0, 0.0, 1.0))
        .set_line_width(2.5)
        .rect(72.0, 700.0, 100.0, 20.0)
        .stroke()
        .restore_state();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"q\n0 0 1 RG\n2.5 w\n72 700 100 20 re\nS\nQ\n"));
}

#[test]
fn compression_shrinks_and_marks_streams() {
    let make_pdf = |compress: bool| -> Vec<u8> {
        let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
        doc.set_compression(compress);
        for page in 0..5 {
            doc.begin_page(792.0, 612.0).unwrap();
            for line in 0..30 {
                doc.place_text_styled(
                    &format!("Page {} line {} of repetitive copy", page, line),
                    72.0,
                    540.0 - line as f64 * 16.0,
                    &TextStyle::default(),
                );
            }
            doc.end_page().unwrap();
        }
        doc.end_document().unwrap()
    };

    let plain = make_pdf(false);
    let packed = make_pdf(true);
    assert!(!contains(&plain, b"FlateDecode"));
    assert!(contains(&packed, b"/Filter /FlateDecode"));
    assert!(packed.len() < plain.len());
}

#[test]
fn embedded_image_is_referenced_from_page_resources() {
    // SOI, SOF0 for a 1-component 8x8 frame, EOI.
    let jpeg = vec![
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x08, 0x00, 0x08, 0x01, 0xFF, 0xD9,
    ];
    let image = load_image(jpeg).unwrap();

    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    let id = doc.add_image(&image).unwrap();
    doc.begin_page(792.0, 612.0).unwrap();
    doc.place_image(id, &ImagePlacement::centered_square(8, 8, 100.0, 100.0, 40.0));
    let bytes = doc.end_document().unwrap();

    assert!(contains(&bytes, b"/Subtype /Image"));
    assert!(contains(&bytes, b"/Filter /DCTDecode"));
    assert!(contains(&bytes, b"/ColorSpace /DeviceGray"));
    assert!(contains(&bytes, b"/XObject << /Im1 "));
    assert!(contains(&bytes, b"40 0 0 40 80 80 cm\n/Im1 Do\n"));
}
