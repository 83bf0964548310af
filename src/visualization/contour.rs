//! Contour lines of a sampled field (marching squares).
//!
//! Segments are returned in data coordinates so the renderer can place
//! them on any plane of the axes box.

use nalgebra::DMatrix;

use crate::simulation::grid::SpatialGrid;
use crate::simulation::states::NVec2;

/// One straight piece of an iso-line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: NVec2,
    pub b: NVec2,
}

/// `count` levels evenly spaced strictly inside `(min, max)`.
/// Empty when the range is flat or not finite.
pub fn contour_levels(min: f64, max: f64, count: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max - min <= f64::EPSILON * max.abs().max(1.0) {
        return Vec::new();
    }
    let step = (max - min) / (count + 1) as f64;
    (1..=count).map(|k| min + k as f64 * step).collect()
}

// Cell corners: c0 = (i, j), c1 = (i, j+1), c2 = (i+1, j+1), c3 = (i+1, j).
// Edge e joins corner e and corner (e + 1) % 4.
fn case_edges(case: u8, center_above: bool) -> &'static [(usize, usize)] {
    match case {
        1 | 14 => &[(3, 0)],
        2 | 13 => &[(0, 1)],
        3 | 12 => &[(3, 1)],
        4 | 11 => &[(1, 2)],
        6 | 9 => &[(0, 2)],
        7 | 8 => &[(2, 3)],
        5 => {
            if center_above {
                &[(0, 1), (2, 3)]
            } else {
                &[(3, 0), (1, 2)]
            }
        }
        10 => {
            if center_above {
                &[(3, 0), (1, 2)]
            } else {
                &[(0, 1), (2, 3)]
            }
        }
        _ => &[],
    }
}

/// Iso-line segments of `values` at `level` over `grid`
pub fn marching_squares(grid: &SpatialGrid, values: &DMatrix<f64>, level: f64) -> Vec<Segment> {
    let n = values.nrows().min(values.ncols()).min(grid.points());
    let mut out = Vec::new();
    if n < 2 {
        return out;
    }

    for i in 0..n - 1 {
        for j in 0..n - 1 {
            let idx = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
            let v = idx.map(|(r, c)| values[(r, c)]);
            if v.iter().any(|x| !x.is_finite()) {
                continue;
            }
            let pos = idx.map(|(r, c)| {
                let (x, y) = grid.point(r, c);
                NVec2::new(x, y)
            });

            let mut case = 0u8;
            for (k, value) in v.iter().enumerate() {
                if *value > level {
                    case |= 1 << k;
                }
            }
            let center_above = v.iter().sum::<f64>() / 4.0 > level;

            let crossing = |e: usize| {
                let (a, b) = (e, (e + 1) % 4);
                let t = (level - v[a]) / (v[b] - v[a]);
                pos[a] + (pos[b] - pos[a]) * t
            };

            for &(e0, e1) in case_edges(case, center_above) {
                out.push(Segment {
                    a: crossing(e0),
                    b: crossing(e1),
                });
            }
        }
    }
    out
}
