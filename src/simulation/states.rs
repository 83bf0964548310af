//! Value types passed between the models and the renderer.
//!
//! - `TimeSample` – frame index plus the time it maps to
//! - `MassPair`   – planar positions of the two orbiting masses
//!
//! Everything here is recomputed per frame and never mutated afterwards.

use nalgebra::{Vector2, Vector3};
pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    pub frame: usize, // frame index
    pub t: f64,       // seconds since the first frame
}

impl TimeSample {
    /// Time of frame `frame` at a fixed frame rate, t = frame / fps
    pub fn from_frame(frame: usize, fps: u32) -> Self {
        Self {
            frame,
            t: frame as f64 / fps as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassPair {
    pub first: NVec2,  // body on the +theta side
    pub second: NVec2, // antipode of `first`
}

impl MassPair {
    pub fn as_array(&self) -> [NVec2; 2] {
        [self.first, self.second]
    }
}
