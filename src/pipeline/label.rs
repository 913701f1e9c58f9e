//! Page-number label stamped at the bottom centre of each PDF page.
//!
//! The label is the text `"{i} / {N}"` on a white box. The box is the text
//! size plus padding, centred horizontally and lifted `bottom_margin` pixels
//! off the bottom edge.

use crate::config::CaptureConfig;
use crate::pipeline::bitmap_font;
use ab_glyph::{Font, FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::PathBuf;
use tracing::{debug, warn};

const BOX_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Label text for page `index` of `total`.
pub fn label_text(index: usize, total: usize) -> String {
    format!("{} / {}", index, total)
}

/// Font used to draw labels.
pub enum LabelFont {
    /// A TrueType/OpenType font loaded from disk.
    Scalable { font: FontVec, scale: PxScale },
    /// The embedded bitmap font.
    Bitmap,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelFont::Scalable { scale, .. } => f
                .debug_struct("Scalable")
                .field("scale", &scale.y)
                .finish_non_exhaustive(),
            LabelFont::Bitmap => f.write_str("Bitmap"),
        }
    }
}

impl LabelFont {
    /// Load the first usable font of `paths` with an em size of `size_px`.
    ///
    /// Falls back to [`LabelFont::Bitmap`] when none loads.
    pub fn load(paths: &[PathBuf], size_px: f32) -> Self {
        for path in paths {
            let Ok(data) = std::fs::read(path) else {
                continue;
            };
            match FontVec::try_from_vec(data) {
                Ok(font) => {
                    debug!("Label font: {}", path.display());
                    let scale = em_to_px_scale(&font, size_px);
                    return LabelFont::Scalable { font, scale };
                }
                Err(_) => debug!("Not a usable font: {}", path.display()),
            }
        }
        warn!("No label font could be loaded, using the built-in bitmap font");
        LabelFont::Bitmap
    }

    /// Pixel width and height of `text`.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            LabelFont::Scalable { font, scale } => imageproc::drawing::text_size(*scale, font, text),
            LabelFont::Bitmap => bitmap_font::text_size(text),
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, text: &str) {
        match self {
            LabelFont::Scalable { font, scale } => {
                draw_text_mut(img, color, to_i32(x), to_i32(y), *scale, font, text)
            }
            LabelFont::Bitmap => bitmap_font::draw_text(img, color, x, y, text),
        }
    }
}

/// `ab_glyph` scales by line height; convert an em size to that.
fn em_to_px_scale(font: &FontVec, size_px: f32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(size_px * font.height_unscaled() / units_per_em)
}

/// Label geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle {
    pub padding_x: u32,
    pub padding_y: u32,
    pub bottom_margin: u32,
}

impl LabelStyle {
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            padding_x: config.label_padding_x,
            padding_y: config.label_padding_y,
            bottom_margin: config.label_bottom_margin,
        }
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::from_config(&CaptureConfig::default())
    }
}

/// White box behind the label. `(x0, y0)` may be negative when the image is
/// smaller than the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelBox {
    pub x0: i64,
    pub y0: i64,
    pub width: u32,
    pub height: u32,
}

impl LabelBox {
    /// Where the text's top-left corner goes.
    pub fn text_origin(&self, style: &LabelStyle) -> (i64, i64) {
        (self.x0 + style.padding_x as i64, self.y0 + style.padding_y as i64)
    }

    /// The filled area: both corners inclusive, so one pixel wider and
    /// taller than the box itself.
    pub fn fill_rect(&self) -> Rect {
        Rect::at(to_i32(self.x0), to_i32(self.y0)).of_size(self.width + 1, self.height + 1)
    }
}

/// Place a `text_w × text_h` label on an `image_w × image_h` page.
pub fn label_box(image_w: u32, image_h: u32, text_w: u32, text_h: u32, style: &LabelStyle) -> LabelBox {
    let width = text_w + 2 * style.padding_x;
    let height = text_h + 2 * style.padding_y;
    LabelBox {
        x0: (image_w as i64 - width as i64).div_euclid(2),
        y0: image_h as i64 - height as i64 - style.bottom_margin as i64,
        width,
        height,
    }
}

/// Draw the label box and text onto `img`. Returns the box used.
pub fn stamp_label(img: &mut RgbImage, text: &str, font: &LabelFont, style: &LabelStyle) -> LabelBox {
    let (tw, th) = font.measure(text);
    let lb = label_box(img.width(), img.height(), tw, th, style);
    draw_filled_rect_mut(img, lb.fill_rect(), BOX_COLOR);
    let (tx, ty) = lb.text_origin(style);
    font.draw(img, tx, ty, TEXT_COLOR, text);
    lb
}

fn to_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
