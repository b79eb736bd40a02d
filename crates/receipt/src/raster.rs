//! Rasterization of a receipt layout into a PNG image

use crate::config::RasterSettings;
use crate::layout::{Align, Block, ReceiptLayout, Span, BODY_SIZE};
use crate::{ReceiptError, Result};
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

const LINE_HEIGHT: f32 = 1.5;
const TEXT_COLOR: [u8; 3] = [0x21, 0x21, 0x21];
const RULE_COLOR: [u8; 3] = [0x11, 0x11, 0x11];
const BORDER_COLOR: [u8; 3] = [0xCC, 0xCC, 0xCC];
const BACKGROUND: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);

/// A captured receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// PNG-encoded RGB image
    pub png: Vec<u8>,
}

/// Captures a layout as an image
pub trait Rasterizer {
    fn capture(&self, layout: &ReceiptLayout) -> Result<Raster>;
}

impl<T: Rasterizer + ?Sized> Rasterizer for &T {
    fn capture(&self, layout: &ReceiptLayout) -> Result<Raster> {
        (**self).capture(layout)
    }
}

/// Horizontal extent of the content area, in device pixels
#[derive(Debug, Clone, Copy)]
struct Column {
    left: f32,
    width: f32,
}

/// Something to paint, positioned in device pixels
enum Mark {
    Text {
        x: f32,
        baseline: f32,
        px: f32,
        bold: bool,
        text: String,
    },
    Bitmap {
        x: i64,
        y: i64,
        image: RgbaImage,
    },
    Bar {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Default)]
struct Piece {
    text: String,
    bold: bool,
    x: f32,
}

#[derive(Debug, Default)]
struct Line {
    pieces: Vec<Piece>,
    /// Width without trailing spaces
    width: f32,
}

/// Rasterizer drawing text with TrueType fonts
///
/// Layout sizes are multiplied by the scale, so a 800px wide layout at
/// scale 2 produces a 1600px wide image.
pub struct GlyphRasterizer {
    regular: FontVec,
    bold: FontVec,
    width: u32,
    scale: f32,
}

impl GlyphRasterizer {
    /// Create from font file contents
    ///
    /// `scale` below `MIN_SCALE` is raised to it.
    pub fn new(regular: Vec<u8>, bold: Vec<u8>, width: u32, scale: f32) -> Result<Self> {
        let regular = FontVec::try_from_vec(regular)
            .map_err(|e| ReceiptError::FontError(format!("regular font: {e}")))?;
        let bold = FontVec::try_from_vec(bold)
            .map_err(|e| ReceiptError::FontError(format!("bold font: {e}")))?;

        Ok(Self {
            regular,
            bold,
            width,
            scale: scale.max(crate::config::MIN_SCALE),
        })
    }

    /// Load fonts named in the raster settings
    pub fn from_settings(settings: &RasterSettings) -> Result<Self> {
        let regular = read_font(&settings.font_regular)?;
        let bold = read_font(&settings.font_bold)?;
        Self::new(regular, bold, settings.width, settings.effective_scale())
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn font(&self, bold: bool) -> &FontVec {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    /// Break spans into lines no wider than `max_width`
    ///
    /// Words are split after spaces; a word wider than the line sits alone.
    fn wrap(&self, spans: &[Span], px: f32, max_width: f32) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut current = Line::default();
        let mut cursor = 0.0;

        for span in spans {
            let font = self.font(span.bold);
            for word in span.text.split_inclusive(' ') {
                let visible = text_width(font, px, word.trim_end_matches(' '));
                let advance = text_width(font, px, word);

                if !current.pieces.is_empty() && cursor + visible > max_width {
                    lines.push(std::mem::take(&mut current));
                    cursor = 0.0;
                }

                current.pieces.push(Piece {
                    text: word.to_string(),
                    bold: span.bold,
                    x: cursor,
                });
                current.width = cursor + visible;
                cursor += advance;
            }
        }

        if !current.pieces.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Lay out a paragraph starting at `y`, returning the y below it
    fn place_text(
        &self,
        marks: &mut Vec<Mark>,
        spans: &[Span],
        px: f32,
        align: Align,
        column: Column,
        mut y: f32,
    ) -> f32 {
        let line_height = px * LINE_HEIGHT;
        let metrics = self.regular.as_scaled(PxScale::from(px));
        let baseline_offset =
            (line_height - (metrics.ascent() - metrics.descent())) / 2.0 + metrics.ascent();

        for line in self.wrap(spans, px, column.width) {
            let offset = match align {
                Align::Left => 0.0,
                Align::Center => ((column.width - line.width) / 2.0).max(0.0),
            };
            for piece in line.pieces {
                marks.push(Mark::Text {
                    x: column.left + offset + piece.x,
                    baseline: y + baseline_offset,
                    px,
                    bold: piece.bold,
                    text: piece.text,
                });
            }
            y += line_height;
        }
        y
    }

    fn draw_text(
        &self,
        canvas: &mut RgbaImage,
        x: f32,
        baseline: f32,
        px: f32,
        bold: bool,
        text: &str,
    ) {
        let font = self.font(bold);
        let scale = PxScale::from(px);
        let scaled = font.as_scaled(scale);

        let mut caret = x;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    blend_pixel(
                        canvas,
                        bounds.min.x as i64 + gx as i64,
                        bounds.min.y as i64 + gy as i64,
                        TEXT_COLOR,
                        coverage,
                    );
                });
            }
        }
    }
}

impl Rasterizer for GlyphRasterizer {
    fn capture(&self, layout: &ReceiptLayout) -> Result<Raster> {
        let s = self.scale;
        let width = (self.width as f32 * s).round() as u32;
        let padding = layout.padding * s;
        let column = Column {
            left: padding,
            width: width as f32 - 2.0 * padding,
        };
        if column.width <= 0.0 {
            return Err(ReceiptError::RasterError(format!(
                "layout width {} leaves no room for content",
                self.width
            )));
        }

        let mut marks = Vec::new();
        let mut y = padding;
        for block in &layout.blocks {
            match block {
                Block::Text {
                    spans,
                    size,
                    align,
                    margin_top,
                } => {
                    y += margin_top * s;
                    y = self.place_text(&mut marks, spans, size * s, *align, column, y);
                }
                Block::Image {
                    path,
                    alt,
                    width,
                    margin_top,
                } => {
                    y += margin_top * s;
                    match load_image(path, width * s) {
                        Ok(image) => {
                            let x = column.left + (column.width - image.width() as f32) / 2.0;
                            let height = image.height() as f32;
                            marks.push(Mark::Bitmap {
                                x: x.round() as i64,
                                y: y.round() as i64,
                                image,
                            });
                            y += height;
                        }
                        Err(e) => {
                            warn!("image {} unavailable ({e}), drawing {alt:?}", path.display());
                            let spans = [Span::plain(alt.as_str())];
                            y = self.place_text(
                                &mut marks,
                                &spans,
                                BODY_SIZE * s,
                                Align::Center,
                                column,
                                y,
                            );
                        }
                    }
                }
                Block::Rule {
                    width_ratio,
                    thickness,
                    margin_top,
                } => {
                    y += margin_top * s;
                    let bar_width = column.width * width_ratio;
                    let bar_height = (thickness * s).round().max(1.0);
                    marks.push(Mark::Bar {
                        x: (column.left + (column.width - bar_width) / 2.0).round() as u32,
                        y: y.round() as u32,
                        width: bar_width.round() as u32,
                        height: bar_height as u32,
                    });
                    y += bar_height;
                }
            }
        }

        let height = (y + padding).ceil() as u32;
        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
        draw_border(&mut canvas, s.round().max(1.0) as u32);

        for mark in &marks {
            match mark {
                Mark::Text {
                    x,
                    baseline,
                    px,
                    bold,
                    text,
                } => self.draw_text(&mut canvas, *x, *baseline, *px, *bold, text),
                Mark::Bitmap { x, y, image } => imageops::overlay(&mut canvas, image, *x, *y),
                Mark::Bar {
                    x,
                    y,
                    width,
                    height,
                } => fill_rect(&mut canvas, *x, *y, *width, *height, RULE_COLOR),
            }
        }

        debug!(width, height, "captured receipt raster");
        encode_png(canvas)
    }
}

fn read_font(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        ReceiptError::FontError(format!("Failed to read font {}: {}", path.display(), e))
    })
}

/// Load an image and resize it to `width`, keeping its aspect ratio
fn load_image(path: &Path, width: f32) -> std::result::Result<RgbaImage, image::ImageError> {
    let image = image::open(path)?;
    let target_width = width.round().max(1.0) as u32;
    let target_height = ((image.height() as f32 * target_width as f32 / image.width().max(1) as f32)
        .round() as u32)
        .max(1);
    Ok(imageops::resize(
        &image.to_rgba8(),
        target_width,
        target_height,
        FilterType::Triangle,
    ))
}

fn text_width(font: &FontVec, px: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(px));
    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: [u8; 3], coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let c = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for (channel, target) in pixel.0.iter_mut().zip(color) {
        *channel = (*channel as f32 * (1.0 - c) + target as f32 * c).round() as u8;
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: [u8; 3]) {
    let x_end = x.saturating_add(width).min(canvas.width());
    let y_end = y.saturating_add(height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, Rgba([color[0], color[1], color[2], 0xFF]));
        }
    }
}

fn draw_border(canvas: &mut RgbaImage, thickness: u32) {
    let (w, h) = canvas.dimensions();
    fill_rect(canvas, 0, 0, w, thickness, BORDER_COLOR);
    fill_rect(canvas, 0, h.saturating_sub(thickness), w, thickness, BORDER_COLOR);
    fill_rect(canvas, 0, 0, thickness, h, BORDER_COLOR);
    fill_rect(canvas, w.saturating_sub(thickness), 0, thickness, h, BORDER_COLOR);
}

fn encode_png(canvas: RgbaImage) -> Result<Raster> {
    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| ReceiptError::RasterError(e.to_string()))?;

    Ok(Raster { width, height, png })
}
