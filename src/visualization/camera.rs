//! 3D axes projection
//!
//! Data coordinates are first squeezed into a box whose edge lengths follow
//! `box_aspect` and which is centered on the origin. The box is then viewed
//! from a camera placed at `elevation`/`azimuth` degrees, `CAMERA_DISTANCE`
//! box-units away, with a mild perspective. The projected box is scaled
//! to fill the plotting viewport.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::simulation::states::{NVec2, NVec3};

/// Distance of the eye from the box center, in box units
const CAMERA_DISTANCE: f64 = 10.0;

/// Pixel rectangle the axes box is fitted into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A projected point: pixel position plus distance from the eye
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: NVec2,
    pub depth: f64,
}

#[derive(Debug, Clone)]
pub struct AxesView {
    pub limits: [[f64; 2]; 3], // x, y, z data limits
    pub box_aspect: [f64; 3],
    pub eye: NVec3,            // eye position in box coordinates
    view: Isometry3<f64>,
    scale: f64,                // projected units -> pixels
    offset: NVec2,             // pixel position of the projected origin
}

impl AxesView {
    pub fn new(limits: [[f64; 2]; 3], box_aspect: [f64; 3], elevation_deg: f64, azimuth_deg: f64, viewport: Viewport) -> Self {
        let elev = elevation_deg.to_radians();
        let azim = azimuth_deg.to_radians();
        let eye = NVec3::new(elev.cos() * azim.cos(), elev.cos() * azim.sin(), elev.sin()) * CAMERA_DISTANCE;
        let view = Isometry3::look_at_rh(&Point3::from(eye), &Point3::origin(), &Vector3::z());

        let mut axes = Self {
            limits,
            box_aspect,
            eye,
            view,
            scale: 1.0,
            offset: NVec2::zeros(),
        };

        // Fit the eight box corners into the viewport
        let corners = axes.box_corners();
        let mut lo = NVec2::repeat(f64::INFINITY);
        let mut hi = NVec2::repeat(f64::NEG_INFINITY);
        for c in &corners {
            let p = axes.raw_project(&axes.to_box(c));
            lo = lo.inf(&p);
            hi = hi.sup(&p);
        }
        let span = hi - lo;
        let scale = (viewport.width / span.x.max(1e-12)).min(viewport.height / span.y.max(1e-12));
        let mid = (lo + hi) * 0.5;
        axes.scale = scale;
        axes.offset = NVec2::new(
            viewport.x + 0.5 * viewport.width - mid.x * scale,
            viewport.y + 0.5 * viewport.height + mid.y * scale,
        );
        axes
    }

    /// Data coordinates of the eight corners of the axes box
    pub fn box_corners(&self) -> [NVec3; 8] {
        let [x, y, z] = self.limits;
        let mut out = [NVec3::zeros(); 8];
        for (k, c) in out.iter_mut().enumerate() {
            *c = NVec3::new(x[k & 1], y[(k >> 1) & 1], z[(k >> 2) & 1]);
        }
        out
    }

    /// Map data coordinates into the centered aspect box
    pub fn to_box(&self, p: &NVec3) -> NVec3 {
        let mut out = NVec3::zeros();
        for i in 0..3 {
            let [lo, hi] = self.limits[i];
            out[i] = ((p[i] - lo) / (hi - lo) - 0.5) * self.box_aspect[i];
        }
        out
    }

    // Perspective divide in view space, before pixel fitting
    fn raw_project(&self, b: &NVec3) -> NVec2 {
        let v = self.view.transform_point(&Point3::from(*b));
        let depth = (-v.z).max(1e-6);
        NVec2::new(v.x, v.y) * (CAMERA_DISTANCE / depth)
    }

    /// Project a data-space point to pixels
    pub fn project(&self, p: &NVec3) -> Projected {
        let b = self.to_box(p);
        let v = self.view.transform_point(&Point3::from(b));
        let raw = self.raw_project(&b);
        Projected {
            screen: NVec2::new(self.offset.x + raw.x * self.scale, self.offset.y - raw.y * self.scale),
            depth: -v.z,
        }
    }

    /// Limit of axis `axis` on the side facing away from the eye.
    /// Panes and grid lines live there.
    pub fn back_limit(&self, axis: usize) -> f64 {
        let [lo, hi] = self.limits[axis];
        if self.eye[axis] >= 0.0 { lo } else { hi }
    }

    /// Limit of axis `axis` on the side facing the eye
    pub fn front_limit(&self, axis: usize) -> f64 {
        let [lo, hi] = self.limits[axis];
        if self.eye[axis] >= 0.0 { hi } else { lo }
    }
}
