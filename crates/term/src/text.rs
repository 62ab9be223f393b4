//! Bitmap-font text layout.
//!
//! Glyphs advance one font-cell per character and one row per newline; the
//! whole block can be anchored with horizontal and vertical alignment, which
//! pre-shifts the draw origin by the measured extent.

use pixfont_font::Font;
use pixfont_types::{HAlign, VAlign};

use crate::surface::Surface;

/// Rows and columns of a multi-line string: lines by newline, columns the
/// longest line's character count.
pub fn measure(text: &str) -> (usize, usize) {
    let mut rows = 0;
    let mut cols = 0;
    for line in text.split('\n') {
        rows += 1;
        cols = cols.max(line.chars().count());
    }
    (rows, cols)
}

/// How to scale and offset a rendered block of text.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Surface pixels per font pixel.
    pub scale: i32,
    /// Glyph cells skipped before the first column.
    pub skip_cols: i32,
    /// Glyph rows skipped before the first line.
    pub skip_rows: i32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            scale: 1,
            skip_cols: 0,
            skip_rows: 0,
        }
    }
}

/// Where to place an aligned block of text, in surface pixels.
#[derive(Debug, Clone, Copy)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
    pub halign: HAlign,
    pub valign: VAlign,
}

/// Draw `text` in the surface's current color, glyph grid starting at the
/// style's skip offset. Characters outside ASCII (or without a glyph) leave
/// their cell blank.
pub fn draw_text(surface: &mut Surface, font: &Font, text: &str, style: &TextStyle) {
    let w = font.width() as i32;
    let h = font.height() as i32;

    for (row, line) in text.split('\n').enumerate() {
        let base_y = (style.skip_rows + row as i32) * h;
        for (col, ch) in line.chars().enumerate() {
            if !ch.is_ascii() {
                continue;
            }
            let base_x = (style.skip_cols + col as i32) * w;
            for x in 0..font.width() {
                for y in 0..font.height() {
                    if font.get(ch as usize, x, y) {
                        surface.pix_put(base_x + x as i32, base_y + y as i32, style.scale);
                    }
                }
            }
        }
    }
}

/// Draw `text` anchored at a point: the origin is pre-shifted by the
/// measured extent according to the alignments, then restored.
pub fn draw_text_at(
    surface: &mut Surface,
    font: &Font,
    text: &str,
    style: &TextStyle,
    anchor: &Anchor,
) {
    let (rows, cols) = measure(text);
    let extent_w = cols as i32 * font.width() as i32 * style.scale;
    let extent_h = rows as i32 * font.height() as i32 * style.scale;

    let dx = match anchor.halign {
        HAlign::Left => 0,
        HAlign::Center => -extent_w / 2,
        HAlign::Right => -extent_w,
    };
    let dy = match anchor.valign {
        VAlign::Up => 0,
        VAlign::Center => -extent_h / 2,
        VAlign::Down => -extent_h,
    };

    let (ox, oy) = surface.origin();
    let mut shifted = surface.with_origin((ox + anchor.x + dx, oy + anchor.y + dy));
    draw_text(&mut shifted, font, text, style);
}
