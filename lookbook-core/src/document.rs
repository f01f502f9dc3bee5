use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::fonts::{encode_win_ansi, BuiltinFont};
use crate::graphics::Color;
use crate::images::{ColorSpace, ImageData, ImageFormat, ImageId, ImagePlacement};
use crate::objects::{ObjId, PdfObject};
use crate::text::TextStyle;
use crate::writer::{escape_pdf_bytes, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FONT_OBJ_NUM: u32 = 3;
const FIRST_FREE_OBJ_NUM: u32 =
    FIRST_FONT_OBJ_NUM + BuiltinFont::ALL.len() as u32;

/// Control-point distance for approximating a quarter circle with
/// one cubic Bezier segment.
const KAPPA: f64 = 0.552_284_749_8;

/// Streaming PDF drawing surface.
///
/// Generic over `Write` so it works with files (`BufWriter<File>`),
/// in-memory buffers (`Vec<u8>`), or any other writer.
///
/// Pages are written incrementally: `end_page()` flushes the page's
/// content stream and dictionary to the writer and drops the page from
/// memory, so a committed page can no longer change.
///
/// Drawing methods require an open page and panic otherwise; the
/// layout engine checks its lifecycle before it reaches them.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_obj_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    next_obj_num: u32,
    compress: bool,
    image_obj_ids: Vec<ObjId>,
}

struct PageBuilder {
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
    images_used: BTreeSet<usize>,
}

impl PdfDocument<BufWriter<File>> {
    /// Create a document that writes to a file, truncating it if it
    /// exists.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PdfDocument<W> {
    /// Create a document over the given writer. Writes the header and
    /// the shared font dictionaries immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        for font in BuiltinFont::ALL {
            let dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.pdf_base_name())),
                ("Encoding", PdfObject::name("WinAnsiEncoding")),
            ]);
            pdf_writer.write_object(font_obj_id(font), &dict)?;
        }

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            page_obj_ids: Vec::new(),
            current_page: None,
            next_obj_num: FIRST_FREE_OBJ_NUM,
            compress: false,
            image_obj_ids: Vec::new(),
        })
    }

    /// Enable FlateDecode compression for content streams and raw
    /// image samples written from now on.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Number of pages written plus the open one, if any.
    pub fn page_count(&self) -> usize {
        self.page_obj_ids.len() + usize::from(self.current_page.is_some())
    }

    pub fn has_open_page(&self) -> bool {
        self.current_page.is_some()
    }

    /// Begin a new page with the given dimensions in points.
    /// Any page still open is committed first.
    pub fn begin_page(&mut self, width: f64, height: f64) -> io::Result<()> {
        if self.current_page.is_some() {
            self.end_page()?;
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            content_ops: Vec::new(),
            images_used: BTreeSet::new(),
        });
        Ok(())
    }

    fn alloc_obj_id(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    fn page(&mut self) -> &mut PageBuilder {
        self.current_page
            .as_mut()
            .expect("drawing operation called with no open page")
    }

    fn push_op(&mut self, op: &str) -> &mut Self {
        self.page().content_ops.extend_from_slice(op.as_bytes());
        self
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.push_op(&format!(
            "{} {} {} rg\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b),
        ))
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.push_op(&format!(
            "{} {} {} RG\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b),
        ))
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.push_op(&format!("{} w\n", format_coord(width)))
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.push_op("q\n")
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.push_op("Q\n")
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(&format!("{} {} m\n", format_coord(x), format_coord(y)))
    }

    pub fn curve_to(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
    ) -> &mut Self {
        let args = [x1, y1, x2, y2, x3, y3].map(format_coord).join(" ");
        self.push_op(&format!("{} c\n", args))
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.push_op("h\n")
    }

    /// Append a rectangle with its lower-left corner at (x, y).
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let args = [x, y, width, height].map(format_coord).join(" ");
        self.push_op(&format!("{} re\n", args))
    }

    /// Append a closed circle path built from four Bezier quarters.
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64) -> &mut Self {
        let k = r * KAPPA;
        self.move_to(cx + r, cy)
            .curve_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r)
            .curve_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy)
            .curve_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r)
            .curve_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy)
            .close_path()
    }

    pub fn fill(&mut self) -> &mut Self {
        self.push_op("f\n")
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.push_op("S\n")
    }

    /// Place a single line of text with its baseline starting at
    /// (x, y). The style's color is scoped to this call.
    pub fn place_text_styled(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
    ) -> &mut Self {
        let c = style.color;
        let mut ops = format!(
            "q\n{} {} {} rg\nBT\n/{} {} Tf\n{} {} Td\n(",
            format_coord(c.r),
            format_coord(c.g),
            format_coord(c.b),
            style.font.pdf_name(),
            format_coord(style.font_size),
            format_coord(x),
            format_coord(y),
        )
        .into_bytes();
        ops.extend_from_slice(&escape_pdf_bytes(&encode_win_ansi(text)));
        ops.extend_from_slice(b") Tj\nET\nQ\n");
        self.page().content_ops.extend_from_slice(&ops);
        self
    }

    /// Embed an image as an XObject. The object is written at once
    /// and can be placed on any later page.
    pub fn add_image(&mut self, image: &ImageData) -> io::Result<ImageId> {
        let smask_id = match &image.smask_data {
            Some(alpha) => {
                let id = self.alloc_obj_id();
                let obj = self.image_stream(
                    image.width,
                    image.height,
                    ColorSpace::DeviceGray,
                    None,
                    alpha.clone(),
                )?;
                self.writer.write_object(id, &obj)?;
                Some(id)
            }
            None => None,
        };

        let obj = match image.format {
            ImageFormat::Jpeg => PdfObject::stream(
                vec![
                    ("Type", PdfObject::name("XObject")),
                    ("Subtype", PdfObject::name("Image")),
                    ("Width", PdfObject::Integer(image.width as i64)),
                    ("Height", PdfObject::Integer(image.height as i64)),
                    ("ColorSpace", PdfObject::name(image.color_space.pdf_name())),
                    ("BitsPerComponent", PdfObject::Integer(8)),
                    ("Filter", PdfObject::name("DCTDecode")),
                ],
                image.data.clone(),
            ),
            ImageFormat::Png => self.image_stream(
                image.width,
                image.height,
                image.color_space,
                smask_id,
                image.data.clone(),
            )?,
        };
        let id = self.alloc_obj_id();
        self.writer.write_object(id, &obj)?;
        self.image_obj_ids.push(id);
        tracing::debug!(
            width = image.width,
            height = image.height,
            "embedded image XObject {}",
            id.0
        );
        Ok(ImageId(self.image_obj_ids.len() - 1))
    }

    fn image_stream(
        &self,
        width: u32,
        height: u32,
        color_space: ColorSpace,
        smask: Option<ObjId>,
        samples: Vec<u8>,
    ) -> io::Result<PdfObject> {
        let mut dict = vec![
            ("Type", PdfObject::name("XObject")),
            ("Subtype", PdfObject::name("Image")),
            ("Width", PdfObject::Integer(width as i64)),
            ("Height", PdfObject::Integer(height as i64)),
            ("ColorSpace", PdfObject::name(color_space.pdf_name())),
            ("BitsPerComponent", PdfObject::Integer(8)),
        ];
        if let Some(id) = smask {
            dict.push(("SMask", PdfObject::Reference(id)));
        }
        let data = if self.compress {
            dict.push(("Filter", PdfObject::name("FlateDecode")));
            deflate(&samples)?
        } else {
            samples
        };
        Ok(PdfObject::stream(dict, data))
    }

    /// Draw a previously embedded image.
    pub fn place_image(
        &mut self,
        image: ImageId,
        placement: &ImagePlacement,
    ) -> &mut Self {
        let op = format!(
            "q\n{} 0 0 {} {} {} cm\n/Im{} Do\nQ\n",
            format_coord(placement.width),
            format_coord(placement.height),
            format_coord(placement.x),
            format_coord(placement.y),
            image.0 + 1,
        );
        self.page().images_used.insert(image.0);
        self.push_op(&op)
    }

    /// Commit the open page: write its content stream and page
    /// dictionary and drop it from memory.
    pub fn end_page(&mut self) -> io::Result<()> {
        let page = self
            .current_page
            .take()
            .expect("end_page called with no open page");

        let content_id = self.alloc_obj_id();
        let page_id = self.alloc_obj_id();

        let stream = if self.compress {
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                deflate(&page.content_ops)?,
            )
        } else {
            PdfObject::stream(vec![], page.content_ops)
        };
        self.writer.write_object(content_id, &stream)?;

        let fonts: Vec<(&str, PdfObject)> = BuiltinFont::ALL
            .iter()
            .map(|&font| {
                (font.pdf_name(), PdfObject::Reference(font_obj_id(font)))
            })
            .collect();
        let mut resources = vec![("Font", PdfObject::dict(fonts))];
        if !page.images_used.is_empty() {
            let names: Vec<String> = page
                .images_used
                .iter()
                .map(|idx| format!("Im{}", idx + 1))
                .collect();
            let xobjects: Vec<(&str, PdfObject)> = names
                .iter()
                .zip(&page.images_used)
                .map(|(name, &idx)| {
                    (name.as_str(), PdfObject::Reference(self.image_obj_ids[idx]))
                })
                .collect();
            resources.push(("XObject", PdfObject::dict(xobjects)));
        }

        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(PAGES_OBJ)),
            ("MediaBox", PdfObject::rect(page.width, page.height)),
            ("Contents", PdfObject::Reference(content_id)),
            ("Resources", PdfObject::dict(resources)),
        ]);
        self.writer.write_object(page_id, &page_dict)?;

        self.page_obj_ids.push(page_id);
        Ok(())
    }

    /// Finish the document: commit any open page, then write the info
    /// dictionary, page tree, catalog, xref table and trailer.
    /// Consumes self and hands back the flushed writer.
    pub fn end_document(mut self) -> io::Result<W> {
        if self.current_page.is_some() {
            self.end_page()?;
        }

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = self.alloc_obj_id();
            let entries: Vec<(&str, PdfObject)> = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let kids: Vec<PdfObject> = self
            .page_obj_ids
            .iter()
            .map(|id| PdfObject::Reference(*id))
            .collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            ("Count", PdfObject::Integer(self.page_obj_ids.len() as i64)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        Ok(self.writer.into_inner())
    }
}

fn font_obj_id(font: BuiltinFont) -> ObjId {
    let index = BuiltinFont::ALL
        .iter()
        .position(|&f| f == font)
        .unwrap_or(0);
    ObjId(FIRST_FONT_OBJ_NUM + index as u32, 0)
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Format a coordinate for content streams: integers without a
/// decimal point, fractions with at most four places.
pub(crate) fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
