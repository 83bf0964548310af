//! Square sampling mesh over `[-extent, extent]²`.
//!
//! Follows the meshgrid convention: row `i` walks along y, column `j`
//! walks along x, so `x[(i, j)] = axis[j]` and `y[(i, j)] = axis[i]`.
//! Built once per run and shared read-only by every frame.

use nalgebra::DMatrix;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    pub axis: Vec<f64>,  // 1D sample positions shared by both axes
    pub x: DMatrix<f64>, // x coordinate of every mesh point
    pub y: DMatrix<f64>, // y coordinate of every mesh point
    pub extent: f64,
}

/// `points` evenly spaced values from `start` to `end`, both inclusive
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|k| if k == points - 1 { end } else { start + k as f64 * step })
                .collect()
        }
    }
}

impl SpatialGrid {
    /// Build the mesh; `points` has already been validated to be >= 2
    pub fn build(extent: f64, points: usize) -> Self {
        let axis = linspace(-extent, extent, points);
        let x = DMatrix::from_fn(points, points, |_, j| axis[j]);
        let y = DMatrix::from_fn(points, points, |i, _| axis[i]);
        Self { axis, x, y, extent }
    }

    /// Samples per axis
    pub fn points(&self) -> usize {
        self.axis.len()
    }

    /// Coordinate of mesh point `(i, j)`
    pub fn point(&self, i: usize, j: usize) -> (f64, f64) {
        (self.x[(i, j)], self.y[(i, j)])
    }

    /// Index `(i, j)` of the mesh point closest to `(x, y)`.
    /// Ties go to the lower index.
    pub fn nearest_index(&self, x: f64, y: f64) -> (usize, usize) {
        let nearest = |target: f64| {
            let mut best = 0;
            for (k, v) in self.axis.iter().enumerate() {
                if (v - target).abs() < (self.axis[best] - target).abs() {
                    best = k;
                }
            }
            best
        };
        (nearest(y), nearest(x))
    }
}
