// Raster drawing primitives on top of an RGB image buffer.
//
// Lines, filled circles and 8x8 bitmap text, integer-scaled. Everything
// clips silently at the image border.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};

/// Side of one glyph cell at scale 1.
pub const GLYPH_SIZE: u32 = 8;

pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const LIGHT_BLUE: Rgb<u8> = Rgb([173, 216, 230]);
    /// Black at 60% opacity over white
    pub const EDGE_GRAY: Rgb<u8> = Rgb([102, 102, 102]);

    /// Viridis-like ramp used for word colours
    pub const PALETTE: [Rgb<u8>; 8] = [
        Rgb([68, 1, 84]),
        Rgb([72, 40, 120]),
        Rgb([62, 74, 137]),
        Rgb([49, 104, 142]),
        Rgb([38, 130, 142]),
        Rgb([31, 158, 137]),
        Rgb([53, 183, 121]),
        Rgb([109, 205, 89]),
    ];
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Pixel size of `text` at `scale`: (width, height).
pub fn text_extent(text: &str, scale: u32, vertical: bool) -> (u32, u32) {
    let run = text.chars().count() as u32 * GLYPH_SIZE * scale;
    let side = GLYPH_SIZE * scale;
    if vertical {
        (side, run)
    } else {
        (run, side)
    }
}

pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgb<u8>) {
        for dy in 0..h as i64 {
            for dx in 0..w as i64 {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenham line; wider strokes stamp a disc at every step.
    pub fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, width: f64, color: Rgb<u8>) {
        let radius = ((width - 1.0) / 2.0).round().max(0.0) as i64;

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            if radius == 0 {
                self.put(x, y, color);
            } else {
                self.fill_circle(x, y, radius, color);
            }

            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw `text` with its top-left corner at (x, y).
    ///
    /// Vertical text is rotated a quarter turn counter-clockwise and reads
    /// bottom to top.
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, scale: u32, vertical: bool, color: Rgb<u8>) {
        let s = scale as i64;
        let g = GLYPH_SIZE as i64;
        let run = text.chars().count() as i64 * g;

        for (ci, c) in text.chars().enumerate() {
            let rows = glyph(c);
            for (gy, bits) in rows.iter().enumerate() {
                for gx in 0..GLYPH_SIZE as i64 {
                    if bits & (1 << gx) == 0 {
                        continue;
                    }
                    // Position along the text run and across it, in glyph pixels
                    let along = ci as i64 * g + gx;
                    let across = gy as i64;
                    let (px, py) = if vertical {
                        (across, run - 1 - along)
                    } else {
                        (along, across)
                    };
                    self.fill_rect(x + px * s, y + py * s, scale, scale, color);
                }
            }
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }
}
