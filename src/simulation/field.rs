//! Wave field model
//!
//! A closed-form, quadrupole-looking ripple radiating from the origin:
//!
//! ```text
//! r            = sqrt(x^2 + y^2) + eps
//! phase        = k*r - w*t*v
//! polarization = (x^2 - y^2) / extent^2
//! envelope     = exp(-r^2 / falloff)
//! z            = amplitude * sin(phase) * polarization * envelope
//! ```
//!
//! This is a visual stand-in for a "+" polarized strain pattern, not a
//! solution of any field equation. The formula is kept exactly as written.

use nalgebra::DMatrix;

use crate::simulation::grid::SpatialGrid;
use crate::simulation::params::WaveParameters;

/// Anything that maps a planar point and a time to a vertical displacement
pub trait Displacement {
    fn displacement_at(&self, x: f64, y: f64, t: f64) -> f64;
}

/// Angular factor of the field, zero along |x| == |y|
pub fn polarization(x: f64, y: f64, extent: f64) -> f64 {
    (x * x - y * y) / (extent * extent)
}

impl Displacement for WaveParameters {
    fn displacement_at(&self, x: f64, y: f64, t: f64) -> f64 {
        let r = (x * x + y * y).sqrt() + self.epsilon;
        let phase = self.wave_number * r - self.angular_frequency * t * self.speed;
        let envelope = (-(r * r) / self.falloff).exp();
        self.amplitude * phase.sin() * polarization(x, y, self.extent) * envelope
    }
}

/// Displacement sampled on every mesh point at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct WaveField {
    pub z: DMatrix<f64>, // same shape as the grid
    pub t: f64,          // time the field was sampled at
}

impl WaveField {
    /// Evaluate `model` on every point of `grid` at time `t`
    pub fn compute<D: Displacement>(grid: &SpatialGrid, model: &D, t: f64) -> Self {
        let n = grid.points();
        let z = DMatrix::from_fn(n, n, |i, j| {
            let (x, y) = grid.point(i, j);
            model.displacement_at(x, y, t)
        });
        Self { z, t }
    }

    /// Smallest and largest sample, `None` for an empty field
    pub fn range(&self) -> Option<(f64, f64)> {
        if self.z.is_empty() {
            return None;
        }
        Some((self.z.min(), self.z.max()))
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.z[(i, j)]
    }
}
