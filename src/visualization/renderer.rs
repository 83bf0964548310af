//! Frame renderer
//!
//! Draws one instant of the animation into the shared canvas:
//!
//! 1. clear and rebuild the axes (panes, grid, ticks, labels, title)
//! 2. contour projection of the field on the floor plane (plasma)
//! 3. the field as a surface, back to front (viridis)
//! 4. the two masses as markers floating above the surface
//!
//! Nothing but the axes configuration survives between frames; every call
//! starts from a blank canvas.

use image::Rgb;

use crate::configuration::config::RenderConfig;
use crate::error::{GwError, GwResult};
use crate::simulation::field::{Displacement, WaveField};
use crate::simulation::grid::SpatialGrid;
use crate::simulation::states::{MassPair, NVec2, NVec3};
use crate::visualization::camera::{AxesView, Viewport};
use crate::visualization::colormap::{parse_hex, Colormap};
use crate::visualization::contour::{contour_levels, marching_squares};
use crate::visualization::raster::Canvas;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const PANE: Rgb<u8> = Rgb([242, 242, 242]);
const GRID_LINE: Rgb<u8> = Rgb([214, 214, 214]);
const AXIS_LINE: Rgb<u8> = Rgb([64, 64, 64]);
const TEXT: Rgb<u8> = Rgb([0, 0, 0]);
const MARKER_EDGE: Rgb<u8> = Rgb([0, 0, 0]);

const TITLE_PT: f64 = 12.0;
const LABEL_PT: f64 = 10.0;
const TICK_PT: f64 = 8.0;
const MAX_TICK_INTERVALS: f64 = 7.0;

/// Summary of the surface drawn for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceArtifact {
    pub quads: usize,
    pub color_range: (f64, f64), // min/max of quad mean heights mapped onto viridis
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: NVec3, // data coordinates, z includes the height offset
    pub screen: NVec2,   // pixel center
    pub color: Rgb<u8>,
    pub radius_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSet {
    pub markers: [Marker; 2],
}

/// What one `render_frame` call produced
#[derive(Debug, Clone, PartialEq)]
pub struct FrameArtifacts {
    pub t: f64,
    pub surface: SurfaceArtifact,
    pub markers: MarkerSet,
    pub contour_levels: Vec<f64>,
    pub contour_segments: usize,
}

struct Quad {
    corners: [NVec2; 4],
    depth: f64,
    mean_z: f64,
}

/// Tick values on `[lo, hi]` using steps of 1, 2, 2.5 or 5 times a power of ten
pub fn nice_ticks(lo: f64, hi: f64) -> Vec<f64> {
    let span = hi - lo;
    if !(span > 0.0) || !span.is_finite() {
        return Vec::new();
    }
    // divide for negative exponents so steps like 0.5 come out exact
    let exp = (span / MAX_TICK_INTERVALS).log10().floor() as i32;
    let scaled = |m: f64| if exp >= 0 { m * 10f64.powi(exp) } else { m / 10f64.powi(-exp) };
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(scaled)
        .find(|s| span / s <= MAX_TICK_INTERVALS + 1e-9)
        .unwrap_or_else(|| scaled(10.0));
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn tick_label(value: f64, step: f64) -> String {
    let v = if value.abs() < 1e-9 { 0.0 } else { value };
    if (step - step.round()).abs() < 1e-9 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

pub struct FrameRenderer {
    canvas: Canvas,
    axes: AxesView,
    settings: RenderConfig,
    mass_colors: [Rgb<u8>; 2],
    px_per_pt: f64,
}

impl FrameRenderer {
    pub fn new(settings: &RenderConfig, extent: f64) -> GwResult<Self> {
        let (width, height) = settings.pixel_size();
        if width == 0 || height == 0 {
            return Err(GwError::Render(format!("canvas size {width}x{height} is empty")));
        }
        let mass_colors = [parse_hex(&settings.mass_colors[0])?, parse_hex(&settings.mass_colors[1])?];

        // Leave room for the title on top and tick labels around the box
        let (w, h) = (width as f64, height as f64);
        let viewport = Viewport {
            x: 0.12 * w,
            y: 0.14 * h,
            width: 0.76 * w,
            height: 0.72 * h,
        };
        let limits = [[-extent, extent], [-extent, extent], settings.z_limits];
        let axes = AxesView::new(limits, settings.box_aspect, settings.elevation, settings.azimuth, viewport);

        Ok(Self {
            canvas: Canvas::new(width, height),
            axes,
            settings: settings.clone(),
            mass_colors,
            px_per_pt: settings.dpi / 72.0,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn axes(&self) -> &AxesView {
        &self.axes
    }

    fn text_scale(&self, pt: f64) -> u32 {
        ((pt * self.px_per_pt / 7.0).round() as u32).max(1)
    }

    /// Draw one frame. `model` is used to lift each marker onto the local
    /// displacement under it.
    pub fn render_frame<D: Displacement>(
        &mut self,
        grid: &SpatialGrid,
        field: &WaveField,
        masses: &MassPair,
        model: &D,
    ) -> GwResult<FrameArtifacts> {
        let n = grid.points();
        if field.z.nrows() != n || field.z.ncols() != n {
            return Err(GwError::Render(format!(
                "field is {}x{} but the grid is {n}x{n}",
                field.z.nrows(),
                field.z.ncols()
            )));
        }

        self.setup_axes();
        let (levels, contour_segments) = self.draw_contours(grid, field);
        let surface = self.draw_surface(grid, field);
        let markers = self.draw_markers(masses, model, field.t);

        Ok(FrameArtifacts {
            t: field.t,
            surface,
            markers,
            contour_levels: levels,
            contour_segments,
        })
    }

    // =====================================================================
    // Axes
    // =====================================================================

    fn setup_axes(&mut self) {
        self.canvas.clear(BACKGROUND);

        let limits = self.axes.limits;
        let ticks: Vec<Vec<f64>> = limits.iter().map(|[lo, hi]| nice_ticks(*lo, *hi)).collect();

        // Back panes, one per axis, on the side away from the eye
        for axis in 0..3 {
            let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
            let fixed = self.axes.back_limit(axis);
            let corner = |a: f64, b: f64| {
                let mut p = NVec3::zeros();
                p[axis] = fixed;
                p[u] = a;
                p[v] = b;
                self.axes.project(&p).screen
            };
            let [u0, u1] = limits[u];
            let [v0, v1] = limits[v];
            let quad = [corner(u0, v0), corner(u1, v0), corner(u1, v1), corner(u0, v1)];
            self.canvas.fill_quad(quad, PANE, 1.0);

            // grid lines across the pane
            for (dir, other) in [(u, v), (v, u)] {
                for &tick in &ticks[dir] {
                    let mut a = NVec3::zeros();
                    a[axis] = fixed;
                    a[dir] = tick;
                    a[other] = limits[other][0];
                    let mut b = a;
                    b[other] = limits[other][1];
                    let (pa, pb) = (self.axes.project(&a).screen, self.axes.project(&b).screen);
                    self.canvas.draw_line(pa, pb, GRID_LINE, 1.0);
                }
            }
        }

        let tick_scale = self.text_scale(TICK_PT);
        let label_scale = self.text_scale(LABEL_PT);
        let z_floor = limits[2][0];

        // x ticks run along the front y edge of the floor, y ticks along the
        // front x edge, z ticks up the vertical edge at (front x, back y)
        let anchors = [
            (0, 1, NVec3::new(0.0, self.axes.front_limit(1), z_floor)),
            (1, 0, NVec3::new(self.axes.front_limit(0), 0.0, z_floor)),
            (2, 0, NVec3::new(self.axes.front_limit(0), self.axes.back_limit(1), 0.0)),
        ];
        for (axis, out_axis, anchor) in anchors {
            let [lo, hi] = limits[axis];
            let outward = self.axes.front_limit(out_axis) - self.axes.back_limit(out_axis);

            let mut a = anchor;
            a[axis] = lo;
            let mut b = anchor;
            b[axis] = hi;
            let (pa, pb) = (self.axes.project(&a).screen, self.axes.project(&b).screen);
            self.canvas.draw_line(pa, pb, AXIS_LINE, 1.0);

            let step = if ticks[axis].len() > 1 { ticks[axis][1] - ticks[axis][0] } else { 1.0 };
            for &tick in &ticks[axis] {
                let mut p = anchor;
                p[axis] = tick;
                p[out_axis] += 0.12 * outward;
                let s = self.axes.project(&p).screen;
                self.canvas.draw_text_centered(s, &tick_label(tick, step), tick_scale, TEXT);
            }

            let mut p = anchor;
            p[axis] = 0.5 * (lo + hi);
            p[out_axis] += 0.32 * outward;
            let s = self.axes.project(&p).screen;
            let label = self.settings.axis_labels[axis].clone();
            self.canvas.draw_text_centered(s, &label, label_scale, TEXT);
        }

        let title_scale = self.text_scale(TITLE_PT);
        let center = NVec2::new(0.5 * self.canvas.width() as f64, 0.06 * self.canvas.height() as f64);
        let title = self.settings.title.clone();
        self.canvas.draw_text_centered(center, &title, title_scale, TEXT);
    }

    // =====================================================================
    // Field
    // =====================================================================

    fn draw_contours(&mut self, grid: &SpatialGrid, field: &WaveField) -> (Vec<f64>, usize) {
        let Some((min, max)) = field.range() else {
            return (Vec::new(), 0);
        };
        let levels = contour_levels(min, max, self.settings.contour_levels);
        if levels.is_empty() {
            log::warn!("t={:.3}: flat field, skipping contour projection", field.t);
            return (levels, 0);
        }

        let z_floor = self.settings.z_limits[0];
        let width = self.settings.contour_linewidth * self.px_per_pt;
        let (first, last) = (levels[0], levels[levels.len() - 1]);
        let mut segments = 0;
        for &level in &levels {
            let color = Colormap::Plasma.sample_range(level, first, last);
            for seg in marching_squares(grid, &field.z, level) {
                let a = self.axes.project(&NVec3::new(seg.a.x, seg.a.y, z_floor)).screen;
                let b = self.axes.project(&NVec3::new(seg.b.x, seg.b.y, z_floor)).screen;
                self.canvas.draw_line(a, b, color, width);
                segments += 1;
            }
        }
        (levels, segments)
    }

    fn draw_surface(&mut self, grid: &SpatialGrid, field: &WaveField) -> SurfaceArtifact {
        let n = grid.points();
        let mut quads = Vec::with_capacity((n - 1) * (n - 1));

        for i in 0..n - 1 {
            for j in 0..n - 1 {
                let idx = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
                let mut corners = [NVec2::zeros(); 4];
                let mut depth = 0.0;
                let mut mean_z = 0.0;
                for (k, &(r, c)) in idx.iter().enumerate() {
                    let (x, y) = grid.point(r, c);
                    let z = field.value(r, c);
                    let p = self.axes.project(&NVec3::new(x, y, z));
                    corners[k] = p.screen;
                    depth += 0.25 * p.depth;
                    mean_z += 0.25 * z;
                }
                quads.push(Quad { corners, depth, mean_z });
            }
        }

        let lo = quads.iter().map(|q| q.mean_z).fold(f64::INFINITY, f64::min);
        let hi = quads.iter().map(|q| q.mean_z).fold(f64::NEG_INFINITY, f64::max);

        // painter's order: farthest first
        quads.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        let alpha = self.settings.surface_alpha;
        for q in &quads {
            let color = Colormap::Viridis.sample_range(q.mean_z, lo, hi);
            self.canvas.fill_quad(q.corners, color, alpha);
        }

        SurfaceArtifact {
            quads: quads.len(),
            color_range: (lo, hi),
        }
    }

    fn draw_markers<D: Displacement>(&mut self, masses: &MassPair, model: &D, t: f64) -> MarkerSet {
        let radius_px = 0.5 * self.settings.marker_size.sqrt() * self.px_per_pt;
        let edge_px = self.px_per_pt.max(1.0);

        let build = |pos: NVec2, color: Rgb<u8>| {
            let z = model.displacement_at(pos.x, pos.y, t) + self.settings.mass_height_offset;
            let position = NVec3::new(pos.x, pos.y, z);
            let projected = self.axes.project(&position);
            (
                Marker {
                    position,
                    screen: projected.screen,
                    color,
                    radius_px,
                },
                projected.depth,
            )
        };
        let (m1, d1) = build(masses.first, self.mass_colors[0]);
        let (m2, d2) = build(masses.second, self.mass_colors[1]);

        // markers never dim or hide behind the surface; only their mutual order follows depth
        let order = if d1 >= d2 { [m1, m2] } else { [m2, m1] };
        for m in &order {
            self.canvas.fill_circle(m.screen, m.radius_px, m.color, MARKER_EDGE, edge_px);
        }

        MarkerSet { markers: [m1, m2] }
    }
}
