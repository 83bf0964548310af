//! Configuration types for loading a render scene from YAML.
//!
//! A scene describes everything the pipeline needs:
//!
//! - [`AnimationConfig`] – frame rate, duration and output path
//! - [`GridConfig`]      – spatial extent and sample count of the mesh
//! - [`WaveConfig`]      – constants of the wave field formula
//! - [`OrbitConfig`]     – circular orbit of the two masses
//! - [`RenderConfig`]    – figure size, axes, colors and markers
//! - [`EncoderConfig`]   – video encoder binary and stream settings
//! - [`SceneConfig`]     – top-level wrapper
//!
//! Every field falls back to the built-in constant, so an empty file (or no
//! file at all) renders the default 12 second animation.
//!
//! # YAML format
//! A partial scene overriding a few defaults:
//!
//! ```yaml
//! animation:
//!   fps: 30
//!   duration: 12.0          # seconds, fps * duration must be a whole number
//!   output: "outputs/gravitational_wave.mp4"
//!
//! grid:
//!   extent: 6.0             # mesh spans [-extent, extent] on both axes
//!   points: 60              # samples per axis
//!
//! wave:
//!   amplitude: 0.6
//!   wave_number: 2.0
//!   falloff: 18.0           # gaussian envelope exp(-r^2 / falloff)
//!
//! orbit:
//!   radius: 1.4
//!   period: 4.0
//!
//! render:
//!   dpi: 160
//!   mass_colors: ["#ff1744", "#f5f5f5"]
//!
//! encoder:
//!   binary: "ffmpeg"
//!   bitrate: 1800           # kbit/s
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{GwError, GwResult};
use crate::visualization::colormap::parse_hex;

/// Frame timing and destination of the rendered video
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AnimationConfig {
    pub fps: u32,         // frames per second
    pub duration: f64,    // seconds of animation
    pub output: PathBuf,  // video file, parent directories are created
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            duration: 12.0,
            output: PathBuf::from("outputs").join("gravitational_wave.mp4"),
        }
    }
}

/// Square sampling mesh
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GridConfig {
    pub extent: f64,   // half-width of the mesh
    pub points: usize, // samples per axis
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            extent: 6.0,
            points: 60,
        }
    }
}

/// Constants of the closed-form wave field
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WaveConfig {
    pub amplitude: f64,   // peak displacement scale
    pub wave_number: f64, // k in k*r - w*t
    pub speed: f64,       // multiplies w*t
    pub falloff: f64,     // gaussian envelope width
    pub epsilon: f64,     // keeps r away from zero at the origin
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.6,
            wave_number: 2.0,
            speed: 1.0,
            falloff: 18.0,
            epsilon: 1e-6,
        }
    }
}

/// Circular orbit shared by both masses
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OrbitConfig {
    pub radius: f64, // distance of each mass from the origin
    pub period: f64, // seconds per revolution, also sets the wave frequency
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 1.4,
            period: 4.0,
        }
    }
}

/// Figure, axes and marker styling
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RenderConfig {
    pub figure_size: [f64; 2],      // inches
    pub dpi: f64,                   // pixels per inch
    pub elevation: f64,             // view elevation, degrees
    pub azimuth: f64,               // view azimuth, degrees
    pub z_limits: [f64; 2],         // vertical axis range, floor sits at the lower bound
    pub box_aspect: [f64; 3],       // relative lengths of the x, y, z box edges
    pub surface_alpha: f64,         // opacity of the surface
    pub contour_levels: usize,      // lines in the floor projection
    pub contour_linewidth: f64,     // points
    pub mass_colors: [String; 2],   // hex colors of the two markers
    pub mass_height_offset: f64,    // markers float this far above the surface
    pub marker_size: f64,           // marker area in points^2
    pub title: String,
    pub axis_labels: [String; 3],   // x, y, z
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            figure_size: [8.0, 6.0],
            dpi: 160.0,
            elevation: 30.0,
            azimuth: 45.0,
            z_limits: [-1.5, 1.5],
            box_aspect: [1.0, 1.0, 0.5],
            surface_alpha: 0.85,
            contour_levels: 8,
            contour_linewidth: 0.6,
            mass_colors: ["#ff1744".to_string(), "#f5f5f5".to_string()],
            mass_height_offset: 0.9,
            marker_size: 150.0,
            title: "Gravitational Wave Distortion".to_string(),
            axis_labels: [
                "x (space)".to_string(),
                "y (space)".to_string(),
                "z (strain)".to_string(),
            ],
        }
    }
}

impl RenderConfig {
    /// Frame size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (self.figure_size[0] * self.dpi).round();
        let h = (self.figure_size[1] * self.dpi).round();
        (w.max(0.0) as u32, h.max(0.0) as u32)
    }
}

/// External video encoder
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EncoderConfig {
    pub binary: String, // executable name or path
    pub codec: String,  // output codec passed to the encoder
    pub bitrate: u32,   // kbit/s
    pub artist: String, // metadata tag written into the container
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            binary: "ffmpeg".to_string(),
            codec: "h264".to_string(),
            bitrate: 1800,
            artist: "gwsim".to_string(),
        }
    }
}

/// Top-level scene configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub animation: AnimationConfig,
    pub grid: GridConfig,
    pub wave: WaveConfig,
    pub orbit: OrbitConfig,
    pub render: RenderConfig,
    pub encoder: EncoderConfig,
}

fn positive(name: &str, value: f64) -> GwResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GwError::Config(format!("{name} must be positive and finite, got {value}")))
    }
}

impl SceneConfig {
    /// Parse a scene from YAML text and validate it
    pub fn from_yaml_str(text: &str) -> GwResult<Self> {
        let cfg: SceneConfig = if text.trim().is_empty() {
            SceneConfig::default()
        } else {
            serde_yaml::from_str(text)?
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Number of frames in the animation, fps * duration
    pub fn total_frames(&self) -> usize {
        (self.animation.fps as f64 * self.animation.duration).round() as usize
    }

    /// Reject configurations the pipeline cannot render
    pub fn validate(&self) -> GwResult<()> {
        let a = &self.animation;
        if a.fps == 0 {
            return Err(GwError::Config("animation.fps must be at least 1".into()));
        }
        positive("animation.duration", a.duration)?;
        let frames = a.fps as f64 * a.duration;
        if (frames - frames.round()).abs() > 1e-9 {
            return Err(GwError::Config(format!(
                "animation.fps * animation.duration must be a whole number of frames, got {frames}"
            )));
        }
        if a.output.as_os_str().is_empty() {
            return Err(GwError::Config("animation.output must not be empty".into()));
        }

        positive("grid.extent", self.grid.extent)?;
        if self.grid.points < 2 {
            return Err(GwError::Config(format!(
                "grid.points must be at least 2, got {}",
                self.grid.points
            )));
        }

        let w = &self.wave;
        positive("wave.amplitude", w.amplitude)?;
        positive("wave.wave_number", w.wave_number)?;
        positive("wave.falloff", w.falloff)?;
        positive("wave.epsilon", w.epsilon)?;
        if !w.speed.is_finite() {
            return Err(GwError::Config("wave.speed must be finite".into()));
        }

        positive("orbit.period", self.orbit.period)?;
        if !(self.orbit.radius.is_finite() && self.orbit.radius >= 0.0) {
            return Err(GwError::Config("orbit.radius must be finite and non-negative".into()));
        }

        let r = &self.render;
        positive("render.dpi", r.dpi)?;
        let (width, height) = r.pixel_size();
        if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
            return Err(GwError::Config(format!(
                "render size must be non-zero and even in both dimensions, got {width}x{height}"
            )));
        }
        if !(r.z_limits[0].is_finite() && r.z_limits[1].is_finite() && r.z_limits[0] < r.z_limits[1]) {
            return Err(GwError::Config("render.z_limits must be finite and increasing".into()));
        }
        for (i, v) in r.box_aspect.iter().enumerate() {
            positive(&format!("render.box_aspect[{i}]"), *v)?;
        }
        if !(0.0..=1.0).contains(&r.surface_alpha) {
            return Err(GwError::Config("render.surface_alpha must lie in [0, 1]".into()));
        }
        if r.contour_levels == 0 {
            return Err(GwError::Config("render.contour_levels must be at least 1".into()));
        }
        positive("render.marker_size", r.marker_size)?;
        for color in &r.mass_colors {
            parse_hex(color)?;
        }

        if self.encoder.binary.trim().is_empty() {
            return Err(GwError::Config("encoder.binary must not be empty".into()));
        }
        if self.encoder.bitrate == 0 {
            return Err(GwError::Config("encoder.bitrate must be positive".into()));
        }

        Ok(())
    }
}
