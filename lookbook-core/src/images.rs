use std::path::Path;

use crate::error::{LayoutError, Result};

/// Handle to an image XObject already written to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// PDF color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }
}

/// Decoded image ready for embedding.
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub color_space: ColorSpace,
    /// Raw 8-bit samples for PNG, the untouched file for JPEG.
    pub data: Vec<u8>,
    /// Separate alpha channel (8-bit grayscale), if present.
    pub smask_data: Option<Vec<u8>>,
}

/// Where an image lands on the page, in PDF coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImagePlacement {
    /// Scale an image to fit a `size × size` square centered on
    /// (cx, cy), preserving aspect ratio.
    pub fn centered_square(
        img_w: u32,
        img_h: u32,
        cx: f64,
        cy: f64,
        size: f64,
    ) -> Self {
        let (iw, ih) = (img_w as f64, img_h as f64);
        let scale = (size / iw).min(size / ih);
        let (width, height) = (iw * scale, ih * scale);
        ImagePlacement {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }
}

/// Detect image format from magic bytes.
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    match data {
        [0xFF, 0xD8, ..] => Ok(ImageFormat::Jpeg),
        [0x89, b'P', b'N', b'G', ..] => Ok(ImageFormat::Png),
        _ => Err(LayoutError::Image(
            "unsupported image format (expected JPEG or PNG)".to_string(),
        )),
    }
}

/// Decode image bytes.
pub fn load_image(data: Vec<u8>) -> Result<ImageData> {
    match detect_format(&data)? {
        ImageFormat::Jpeg => parse_jpeg(data),
        ImageFormat::Png => parse_png(data),
    }
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> Result<ImageData> {
    load_image(std::fs::read(path)?)
}

/// JPEG is embedded as-is (DCTDecode); only the frame header is read.
fn parse_jpeg(data: Vec<u8>) -> Result<ImageData> {
    let (width, height, components) = jpeg_dimensions(&data)?;
    check_dimensions(width, height)?;
    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        n => {
            return Err(LayoutError::Image(format!(
                "unsupported JPEG component count: {}",
                n
            )))
        }
    };
    Ok(ImageData {
        width,
        height,
        format: ImageFormat::Jpeg,
        color_space,
        data,
        smask_data: None,
    })
}

/// An image with no pixels cannot be scaled into a placement.
fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(LayoutError::Image(format!(
            "image has empty dimensions {}x{}",
            width, height
        )));
    }
    Ok(())
}

/// Walk the JPEG marker segments up to the first SOF0..SOF3 marker.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8)> {
    let mut i = 2;
    while i + 3 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        match marker {
            0xC0..=0xC3 => {
                let sof = data.get(i + 5..i + 10).ok_or_else(|| {
                    LayoutError::Image("JPEG frame header truncated".to_string())
                })?;
                let height = u16::from_be_bytes([sof[0], sof[1]]) as u32;
                let width = u16::from_be_bytes([sof[2], sof[3]]) as u32;
                return Ok((width, height, sof[4]));
            }
            0xFF | 0x00 => i += 1,
            0xD0..=0xD9 => i += 2,
            _ => {
                let seg_len =
                    u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
                i += 2 + seg_len;
            }
        }
    }
    Err(LayoutError::Image("no frame header in JPEG data".to_string()))
}

/// Decode a PNG to 8-bit samples, splitting off any alpha channel.
fn parse_png(data: Vec<u8>) -> Result<ImageData> {
    let mut decoder = png::Decoder::new(data.as_slice());
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| LayoutError::Image(format!("PNG decode error: {}", e)))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| LayoutError::Image(format!("PNG frame error: {}", e)))?;
    buf.truncate(info.buffer_size());
    check_dimensions(info.width, info.height)?;

    let (color_space, channels) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, 3),
        png::ColorType::Rgba => (ColorSpace::DeviceRGB, 4),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, 1),
        png::ColorType::GrayscaleAlpha => (ColorSpace::DeviceGray, 2),
        png::ColorType::Indexed => {
            return Err(LayoutError::Image(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    let (data, smask_data) = if channels == 2 || channels == 4 {
        let color_channels = channels - 1;
        let mut color = Vec::with_capacity(buf.len() / channels * color_channels);
        let mut alpha = Vec::with_capacity(buf.len() / channels);
        for px in buf.chunks_exact(channels) {
            color.extend_from_slice(&px[..color_channels]);
            alpha.push(px[color_channels]);
        }
        (color, Some(alpha))
    } else {
        (buf, None)
    };

    Ok(ImageData {
        width: info.width,
        height: info.height,
        format: ImageFormat::Png,
        color_space,
        data,
        smask_data,
    })
}
