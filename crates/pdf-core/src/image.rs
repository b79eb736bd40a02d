//! Image handling for PDF documents

use crate::{PdfError, Result};
use image::DynamicImage;
use lopdf::{Dictionary, Object, Stream};
use std::io::Write;

impl From<image::ImageError> for PdfError {
    fn from(err: image::ImageError) -> Self {
        PdfError::ImageError(err.to_string())
    }
}

/// Detected image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Image scaling mode for insert_image_scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageScaleMode {
    /// Stretch to exact dimensions
    #[default]
    Stretch,
    /// Scale proportionally based on width, auto-calculate height
    FitWidth,
    /// Scale proportionally based on height, auto-calculate width
    FitHeight,
    /// Fit within bounding box, preserving aspect ratio
    FitBox,
}

/// Calculate display dimensions based on scaling mode
///
/// # Arguments
/// * `original_width` - Original image width in pixels
/// * `original_height` - Original image height in pixels
/// * `target_width` - Target width in points
/// * `target_height` - Target height in points (ignored by `FitWidth`)
/// * `mode` - Scaling mode
///
/// # Returns
/// (actual_width, actual_height) in points
pub fn calculate_scaled_dimensions(
    original_width: u32,
    original_height: u32,
    target_width: f64,
    target_height: f64,
    mode: ImageScaleMode,
) -> (f64, f64) {
    if original_width == 0 || original_height == 0 {
        return (0.0, 0.0);
    }

    let (w, h) = (original_width as f64, original_height as f64);
    match mode {
        ImageScaleMode::Stretch => (target_width, target_height),
        ImageScaleMode::FitWidth => (target_width, target_width * h / w),
        ImageScaleMode::FitHeight => (target_height * w / h, target_height),
        ImageScaleMode::FitBox => {
            let scale = (target_width / w).min(target_height / h);
            (w * scale, h * scale)
        }
    }
}

/// Detect image format from magic bytes
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Ok(ImageFormat::Jpeg);
    }
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Ok(ImageFormat::Png);
    }

    Err(PdfError::ImageError("Unknown image format".to_string()))
}

/// Image XObject for PDF embedding
#[derive(Debug, Clone)]
pub struct ImageXObject {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Color space ("DeviceRGB", "DeviceGray")
    pub color_space: &'static str,
    /// Zlib-compressed samples, 8 bits per component
    pub data: Vec<u8>,
}

impl ImageXObject {
    /// Decode PNG or JPEG bytes into a FlateDecode XObject
    ///
    /// Transparent pixels are blended onto white. Images without color
    /// stay grayscale.
    pub fn decode(data: &[u8]) -> Result<Self> {
        detect_format(data)?;
        let image = image::load_from_memory(data)?;
        Self::from_image(&image)
    }

    /// Build an XObject from an already decoded image
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let (raw, color_space) = if image.color().has_color() {
            (flatten_rgb(image), "DeviceRGB")
        } else {
            (flatten_gray(image), "DeviceGray")
        };

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&raw)?;
        let data = encoder.finish()?;

        Ok(Self {
            width: image.width(),
            height: image.height(),
            color_space,
            data,
        })
    }

    /// Convert to lopdf Stream object
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set(
            "ColorSpace",
            Object::Name(self.color_space.as_bytes().to_vec()),
        );
        dict.set("BitsPerComponent", 8i64);
        dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));

        Stream::new(dict, self.data.clone())
    }
}

fn blend_on_white(value: u8, alpha: u8) -> u8 {
    let a = alpha as f32 / 255.0;
    (value as f32 * a + 255.0 * (1.0 - a)).round() as u8
}

fn flatten_rgb(image: &DynamicImage) -> Vec<u8> {
    let rgba = image.to_rgba8();
    let mut out = Vec::with_capacity(rgba.len() / 4 * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        out.extend_from_slice(&[
            blend_on_white(r, a),
            blend_on_white(g, a),
            blend_on_white(b, a),
        ]);
    }
    out
}

fn flatten_gray(image: &DynamicImage) -> Vec<u8> {
    image
        .to_luma_alpha8()
        .pixels()
        .map(|p| blend_on_white(p.0[0], p.0[1]))
        .collect()
}

/// Generate operators to draw image at position
///
/// `x`/`y` are PDF coordinates (origin bottom-left) of the image's
/// lower-left corner.
pub fn generate_image_operators(
    image_name: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Vec<u8> {
    format!("q\n{width} 0 0 {height} {x} {y} cm\n/{image_name} Do\nQ\n").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgba};
    use std::io::{Cursor, Read};

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        flate2::read::ZlibDecoder::new(data)
            .read_to_end(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_detect_jpeg() {
        let jpeg_header = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(detect_format(&jpeg_header).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_png() {
        let png_header = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_format(&png_header).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_unknown_and_short() {
        assert!(detect_format(&[0u8; 8]).is_err());
        assert!(detect_format(&[0xFF, 0xD8]).is_err());
        assert!(detect_format(&[]).is_err());
    }

    #[test]
    fn test_decode_rgba_blends_on_white() {
        let mut img = ImageBuffer::from_pixel(2, 1, Rgba([0u8, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        let png = encode_png(DynamicImage::ImageRgba8(img));

        let xobject = ImageXObject::decode(&png).unwrap();
        assert_eq!((xobject.width, xobject.height), (2, 1));
        assert_eq!(xobject.color_space, "DeviceRGB");
        assert_eq!(inflate(&xobject.data), vec![255, 255, 255, 255, 0, 0]);
    }

    #[test]
    fn test_decode_grayscale_stays_gray() {
        let img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_pixel(3, 2, Luma([10u8]));
        let png = encode_png(DynamicImage::ImageLuma8(img));

        let xobject = ImageXObject::decode(&png).unwrap();
        assert_eq!(xobject.color_space, "DeviceGray");
        assert_eq!(inflate(&xobject.data), vec![10; 6]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(ImageXObject::decode(b"definitely not an image").is_err());
    }

    #[test]
    fn test_image_xobject_to_pdf_stream() {
        let xobject = ImageXObject {
            width: 100,
            height: 50,
            color_space: "DeviceRGB",
            data: vec![1, 2, 3, 4, 5],
        };

        let stream = xobject.to_pdf_stream();
        let dict = &stream.dict;

        assert_eq!(dict.get(b"Type").unwrap().as_name().unwrap(), b"XObject");
        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Image");
        assert_eq!(dict.get(b"Width").unwrap().as_i64().unwrap(), 100);
        assert_eq!(dict.get(b"Height").unwrap().as_i64().unwrap(), 50);
        assert_eq!(
            dict.get(b"ColorSpace").unwrap().as_name().unwrap(),
            b"DeviceRGB"
        );
        assert_eq!(dict.get(b"BitsPerComponent").unwrap().as_i64().unwrap(), 8);
        assert_eq!(
            dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"FlateDecode"
        );
        assert_eq!(stream.content, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_generate_image_operators() {
        let ops = generate_image_operators("Im1", 100.0, 200.0, 50.0, 75.0);
        let ops_str = String::from_utf8(ops).unwrap();

        assert_eq!(ops_str, "q\n50 0 0 75 100 200 cm\n/Im1 Do\nQ\n");
    }

    #[test]
    fn test_calculate_scaled_dimensions_stretch() {
        let (w, h) = calculate_scaled_dimensions(800, 600, 100.0, 200.0, ImageScaleMode::Stretch);
        assert_eq!((w, h), (100.0, 200.0));
    }

    #[test]
    fn test_calculate_scaled_dimensions_fit_width() {
        // 1600x1000 raster onto a landscape A4 width
        let (w, h) =
            calculate_scaled_dimensions(1600, 1000, 841.89, 0.0, ImageScaleMode::FitWidth);
        assert_eq!(w, 841.89);
        assert!((h - 526.18125).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_scaled_dimensions_fit_height() {
        let (w, h) = calculate_scaled_dimensions(800, 600, 100.0, 150.0, ImageScaleMode::FitHeight);
        assert_eq!((w, h), (200.0, 150.0));
    }

    #[test]
    fn test_calculate_scaled_dimensions_fit_box() {
        let (w, h) = calculate_scaled_dimensions(600, 800, 200.0, 100.0, ImageScaleMode::FitBox);
        assert_eq!((w, h), (75.0, 100.0));
    }

    #[test]
    fn test_calculate_scaled_dimensions_empty_image() {
        let (w, h) = calculate_scaled_dimensions(0, 10, 100.0, 100.0, ImageScaleMode::FitWidth);
        assert_eq!((w, h), (0.0, 0.0));
    }
}
