//! Embedded 5×7 bitmap font, used for page labels when no scalable font
//! can be loaded.
//!
//! Only the characters a page label can contain are defined: digits, space
//! and `/`. Anything else renders as `?`.

use image::{Rgb, RgbImage};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const SPACING: u32 = 1;

/// Each source pixel becomes a `SCALE × SCALE` block.
pub const SCALE: u32 = 2;

/// Horizontal distance between glyph origins, in output pixels.
pub const ADVANCE: u32 = (GLYPH_WIDTH + SPACING) * SCALE;

/// Glyph height in output pixels.
pub const HEIGHT: u32 = GLYPH_HEIGHT * SCALE;

/// Rows top to bottom; bit 4 is the leftmost column.
fn glyph(c: char) -> [u8; 7] {
    match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ' ' => [0x00; 7],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    }
}

/// Pixel size of `text`: the last glyph carries no trailing spacing.
pub fn text_size(text: &str) -> (u32, u32) {
    let n = text.chars().count() as u32;
    if n == 0 {
        return (0, 0);
    }
    (n * ADVANCE - SPACING * SCALE, HEIGHT)
}

/// Draw `text` with its top-left corner at `(x, y)`. Pixels outside the
/// image are clipped.
pub fn draw_text(img: &mut RgbImage, color: Rgb<u8>, x: i64, y: i64, text: &str) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    for (i, c) in text.chars().enumerate() {
        let origin_x = x + i as i64 * ADVANCE as i64;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        let px = origin_x + (col * SCALE + dx) as i64;
                        let py = y + (row as u32 * SCALE + dy) as i64;
                        if (0..w).contains(&px) && (0..h).contains(&py) {
                            img.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
    }
}
