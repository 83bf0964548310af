pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod export;
pub mod benchmark;

pub use error::{GwError, GwResult};

pub use simulation::states::{NVec2, NVec3, TimeSample, MassPair};
pub use simulation::params::WaveParameters;
pub use simulation::grid::SpatialGrid;
pub use simulation::trajectory::OrbitModel;
pub use simulation::field::{Displacement, WaveField};
pub use simulation::scenario::Scenario;

pub use configuration::config::{AnimationConfig, GridConfig, WaveConfig, OrbitConfig, RenderConfig, EncoderConfig, SceneConfig};

pub use visualization::renderer::{FrameRenderer, FrameArtifacts};
pub use visualization::animation::{AnimationDriver, DriverState, RenderSummary};

pub use export::encoder::{FrameSink, FfmpegEncoder, EncoderSettings, PngSequence};

pub use benchmark::benchmark::{bench_field, bench_render};
