//! Colormaps and color parsing
//!
//! Viridis and plasma are stored as 11 evenly spaced stops and linearly
//! interpolated in between.

use image::Rgb;

use crate::error::{GwError, GwResult};

const VIRIDIS: [[u8; 3]; 11] = [
    [0x44, 0x01, 0x54],
    [0x48, 0x24, 0x75],
    [0x41, 0x44, 0x87],
    [0x35, 0x5f, 0x8d],
    [0x2a, 0x78, 0x8e],
    [0x21, 0x91, 0x8c],
    [0x22, 0xa8, 0x84],
    [0x44, 0xbf, 0x70],
    [0x7a, 0xd1, 0x51],
    [0xbd, 0xdf, 0x26],
    [0xfd, 0xe7, 0x25],
];

const PLASMA: [[u8; 3]; 11] = [
    [0x0d, 0x08, 0x87],
    [0x41, 0x04, 0x9d],
    [0x6a, 0x00, 0xa8],
    [0x8f, 0x0d, 0xa4],
    [0xb1, 0x2a, 0x90],
    [0xcc, 0x47, 0x78],
    [0xe1, 0x64, 0x62],
    [0xf2, 0x84, 0x4b],
    [0xfc, 0xa6, 0x36],
    [0xfc, 0xce, 0x25],
    [0xf0, 0xf9, 0x21],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Viridis, // surface
    Plasma,  // floor contours
}

impl Colormap {
    fn stops(&self) -> &'static [[u8; 3]] {
        match self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Plasma => &PLASMA,
        }
    }

    /// Color at `t` in [0, 1]; values outside are clamped, NaN maps to the low end
    pub fn sample(&self, t: f64) -> Rgb<u8> {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let lo = (pos.floor() as usize).min(stops.len() - 1);
        let hi = (lo + 1).min(stops.len() - 1);
        let frac = pos - lo as f64;

        let mut out = [0u8; 3];
        for c in 0..3 {
            let a = stops[lo][c] as f64;
            let b = stops[hi][c] as f64;
            out[c] = (a + (b - a) * frac).round() as u8;
        }
        Rgb(out)
    }

    /// Color of `value` normalized into `[min, max]`.
    /// A flat range maps everything to the middle of the map.
    pub fn sample_range(&self, value: f64, min: f64, max: f64) -> Rgb<u8> {
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return self.sample(0.5);
        }
        self.sample((value - min) / span)
    }
}

/// Parse `#rrggbb` (leading `#` optional)
pub fn parse_hex(text: &str) -> GwResult<Rgb<u8>> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(GwError::Config(format!("invalid color `{text}`, expected #rrggbb")));
    }
    let channel = |k: usize| {
        u8::from_str_radix(&hex[2 * k..2 * k + 2], 16)
            .map_err(|_| GwError::Config(format!("invalid color `{text}`, expected #rrggbb")))
    };
    Ok(Rgb([channel(0)?, channel(1)?, channel(2)?]))
}
