//! Overlay of labeled regions and JPEG export.
//!
//! Boxes are drawn as hollow rectangles on an RGB copy of the radiograph,
//! with the side label ("Left" / "Right") written above the top-left corner
//! using a 5x7 bitmap glyph table.

use std::fs;
use std::path::Path;

use ::image::codecs::jpeg::JpegEncoder;
use ::image::{DynamicImage, Rgb, RgbImage};

use crate::detect::DetectError;
use crate::engine::SymmetryIoError;
use crate::AnnotatedRegion;

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// How regions are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    pub color: Rgb<u8>,
    /// Outline thickness in pixels, drawn inwards from the box edge.
    pub thickness: u32,
    /// Gap between the box top edge and the label baseline.
    pub label_gap: u32,
    /// Pixels per glyph dot.
    pub label_scale: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: Rgb([0, 255, 0]),
            thickness: 2,
            label_gap: 10,
            label_scale: 2,
        }
    }
}

/// Draw `regions` onto an RGB copy of `image`.
pub fn annotate(image: &DynamicImage, regions: &[AnnotatedRegion], style: &RenderStyle) -> RgbImage {
    let mut out = image.to_rgb8();
    for region in regions {
        draw_region(&mut out, region, style);
    }
    out
}

/// Draw one region in place. Parts outside the image are clipped.
pub fn draw_region(img: &mut RgbImage, region: &AnnotatedRegion, style: &RenderStyle) {
    // pixel coordinates truncate toward zero
    let x0 = region.bbox.x_min as i64;
    let y0 = region.bbox.y_min as i64;
    let x1 = region.bbox.x_max as i64;
    let y1 = region.bbox.y_max as i64;
    let t = i64::from(style.thickness.max(1)) - 1;

    fill_rect(img, x0, y0, x1, y0.saturating_add(t), style.color);
    fill_rect(img, x0, y1.saturating_sub(t), x1, y1, style.color);
    fill_rect(img, x0, y0, x0.saturating_add(t), y1, style.color);
    fill_rect(img, x1.saturating_sub(t), y0, x1, y1, style.color);

    let baseline = y0.saturating_sub(i64::from(style.label_gap));
    draw_label(img, region.label(), x0, baseline, style.label_scale.max(1), style.color);
}

const GLYPH_WIDTH: i64 = 5;
const GLYPH_HEIGHT: i64 = 7;

/// Rows of a 5x7 glyph, most significant of the low five bits is the left column.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'f' => [0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000],
        'g' => [0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'h' => [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'i' => [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        't' => [0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110],
        _ => return None,
    };
    Some(rows)
}

/// Write `text` with its bottom row on `baseline`, starting at column `x`.
///
/// Characters without a glyph leave a blank cell.
fn draw_label(
    img: &mut RgbImage,
    text: &str,
    x: i64,
    baseline: i64,
    scale: u32,
    color: Rgb<u8>,
) {
    let s = i64::from(scale);
    let top = baseline.saturating_sub(GLYPH_HEIGHT * s - 1);
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else {
            continue;
        };
        let gx = x.saturating_add(i as i64 * (GLYPH_WIDTH + 1) * s);
        for (r, &bits) in rows.iter().enumerate() {
            let py = top.saturating_add(r as i64 * s);
            for c in 0..GLYPH_WIDTH {
                if (bits >> (GLYPH_WIDTH - 1 - c)) & 1 != 0 {
                    let px = gx.saturating_add(c * s);
                    fill_rect(
                        img,
                        px,
                        py,
                        px.saturating_add(s - 1),
                        py.saturating_add(s - 1),
                        color,
                    );
                }
            }
        }
    }
}

/// Fill the inclusive rectangle `[x0, x1] x [y0, y1]`, clipped to the image.
fn fill_rect(img: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let max_x = i64::from(w) - 1;
    let max_y = i64::from(h) - 1;
    let (x0, x1) = (x0.max(0), x1.min(max_x));
    let (y0, y1) = (y0.max(0), y1.min(max_y));
    if x0 > x1 || y0 > y1 {
        return;
    }
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Encode as baseline JPEG.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, DetectError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    img.write_with_encoder(encoder)?;
    Ok(buf)
}

/// Encode as JPEG and write to `path`, creating parent directories.
pub fn save_jpeg(img: &RgbImage, path: impl AsRef<Path>, quality: u8) -> Result<(), DetectError> {
    let path = path.as_ref();
    let bytes = encode_jpeg(img, quality)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(SymmetryIoError::from)?;
    }
    fs::write(path, bytes).map_err(SymmetryIoError::from)?;
    Ok(())
}
