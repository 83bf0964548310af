//! Build a fully-initialized render scenario from configuration
//!
//! Takes a `SceneConfig` (YAML-facing) and produces the runtime bundle
//! consumed by the animation driver:
//! - the shared mesh (`SpatialGrid`)
//! - wave formula constants (`WaveParameters`)
//! - the orbit of the two masses (`OrbitModel`)
//! - render and encoder settings, copied from the config as-is

use std::f64::consts::TAU;

use crate::configuration::config::{AnimationConfig, EncoderConfig, RenderConfig, SceneConfig};
use crate::error::GwResult;
use crate::simulation::grid::SpatialGrid;
use crate::simulation::params::WaveParameters;
use crate::simulation::states::TimeSample;
use crate::simulation::trajectory::OrbitModel;

/// Runtime bundle for one render
///
/// Everything in here is immutable once built; frames only read from it.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: SpatialGrid,
    pub wave: WaveParameters,
    pub orbit: OrbitModel,
    pub animation: AnimationConfig,
    pub render: RenderConfig,
    pub encoder: EncoderConfig,
    pub total_frames: usize,
}

impl Scenario {
    pub fn build_scenario(cfg: SceneConfig) -> GwResult<Self> {
        cfg.validate()?;
        let total_frames = cfg.total_frames();

        // Mesh: built once, shared by every frame
        let grid = SpatialGrid::build(cfg.grid.extent, cfg.grid.points);

        // Wave frequency is tied to the orbital period
        let wave = WaveParameters {
            amplitude: cfg.wave.amplitude,
            wave_number: cfg.wave.wave_number,
            angular_frequency: TAU / cfg.orbit.period,
            speed: cfg.wave.speed,
            falloff: cfg.wave.falloff,
            extent: cfg.grid.extent,
            epsilon: cfg.wave.epsilon,
        };

        let orbit = OrbitModel::new(cfg.orbit.radius, cfg.orbit.period);

        log::info!(
            "scenario: {}x{} grid, {} frames at {} fps",
            grid.points(),
            grid.points(),
            total_frames,
            cfg.animation.fps
        );

        Ok(Self {
            grid,
            wave,
            orbit,
            animation: cfg.animation,
            render: cfg.render,
            encoder: cfg.encoder,
            total_frames,
        })
    }

    /// Time samples of every frame, in order
    pub fn time_samples(&self) -> impl Iterator<Item = TimeSample> + '_ {
        (0..self.total_frames).map(move |i| TimeSample::from_frame(i, self.animation.fps))
    }
}
