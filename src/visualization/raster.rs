//! Software canvas the renderer draws into.
//!
//! Wraps an `RgbImage` and provides the handful of primitives a frame
//! needs: alpha-blended triangles, lines, filled discs with an outline, and
//! bitmap text. Coordinates are pixels with the origin at the top-left
//! corner, pixel centers at `+0.5`.

use image::{Rgb, RgbImage};

use crate::simulation::states::NVec2;
use crate::visualization::font::{glyph, text_width, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

pub struct Canvas {
    image: RgbImage,
}

fn blend(dst: Rgb<u8>, src: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let a = alpha.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for c in 0..3 {
        out[c] = (src.0[c] as f64 * a + dst.0[c] as f64 * (1.0 - a)).round() as u8;
    }
    Rgb(out)
}

// Twice the signed area of (a, b, p)
fn edge(a: &NVec2, b: &NVec2, p: &NVec2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn clear(&mut self, color: Rgb<u8>) {
        for p in self.image.pixels_mut() {
            *p = color;
        }
    }

    /// Blend `color` into pixel `(x, y)`; out-of-range pixels are ignored
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f64) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        *px = if alpha >= 1.0 { color } else { blend(*px, color, alpha) };
    }

    /// Fill the triangle covering every pixel center inside it
    pub fn fill_triangle(&mut self, v0: NVec2, v1: NVec2, v2: NVec2, color: Rgb<u8>, alpha: f64) {
        let area = edge(&v0, &v1, &v2);
        if area.abs() < 1e-12 || !area.is_finite() {
            return;
        }
        // consistent winding so all three edge tests share a sign
        let (v1, v2) = if area < 0.0 { (v2, v1) } else { (v1, v2) };

        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as i64;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil().min(self.width() as f64) as i64;
        let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as i64;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil().min(self.height() as f64) as i64;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = NVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if edge(&v0, &v1, &p) >= 0.0 && edge(&v1, &v2, &p) >= 0.0 && edge(&v2, &v0, &p) >= 0.0 {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Fill a quad given in drawing order, split along the `a`-`c` diagonal
    pub fn fill_quad(&mut self, corners: [NVec2; 4], color: Rgb<u8>, alpha: f64) {
        let [a, b, c, d] = corners;
        self.fill_triangle(a, b, c, color, alpha);
        self.fill_triangle(a, c, d, color, alpha);
    }

    /// Straight segment; widths above 1.5 px are drawn as a filled quad
    pub fn draw_line(&mut self, a: NVec2, b: NVec2, color: Rgb<u8>, width: f64) {
        let d = b - a;
        let len = d.norm();
        if !len.is_finite() {
            return;
        }
        if width > 1.5 && len > 0.0 {
            let n = NVec2::new(-d.y, d.x) * (0.5 * width / len);
            self.fill_quad([a + n, b + n, b - n, a - n], color, 1.0);
            return;
        }
        let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as usize;
        for k in 0..=steps {
            let p = a + d * (k as f64 / steps as f64);
            self.blend_pixel(p.x.floor() as i64, p.y.floor() as i64, color, 1.0);
        }
    }

    /// Filled disc with an outline ring of `edge_width` pixels
    pub fn fill_circle(&mut self, center: NVec2, radius: f64, fill: Rgb<u8>, edge_color: Rgb<u8>, edge_width: f64) {
        if !(radius > 0.0) || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }
        let min_x = (center.x - radius).floor() as i64;
        let max_x = (center.x + radius).ceil() as i64;
        let min_y = (center.y - radius).floor() as i64;
        let max_y = (center.y + radius).ceil() as i64;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = NVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let dist = (p - center).norm();
                if dist > radius {
                    continue;
                }
                let color = if dist > radius - edge_width { edge_color } else { fill };
                self.blend_pixel(x, y, color, 1.0);
            }
        }
    }

    /// Text with its top-left corner at `(x, y)`
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, scale: u32, color: Rgb<u8>) {
        let scale = scale.max(1);
        let x0 = x.round() as i64;
        let y0 = y.round() as i64;
        for (n, c) in text.chars().enumerate() {
            let Some(rows) = glyph(c) else { continue };
            let gx = x0 + (n as u32 * GLYPH_ADVANCE * scale) as i64;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    for sy in 0..scale {
                        for sx in 0..scale {
                            self.blend_pixel(
                                gx + (col * scale + sx) as i64,
                                y0 + (row as u32 * scale + sy) as i64,
                                color,
                                1.0,
                            );
                        }
                    }
                }
            }
        }
    }

    /// Text centered on `center`
    pub fn draw_text_centered(&mut self, center: NVec2, text: &str, scale: u32, color: Rgb<u8>) {
        let scale = scale.max(1);
        let w = text_width(text, scale) as f64;
        let h = (GLYPH_HEIGHT * scale) as f64;
        self.draw_text(center.x - 0.5 * w, center.y - 0.5 * h, text, scale, color);
    }
}
