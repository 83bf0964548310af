//! Animation driver
//!
//! Walks the frames of a [`Scenario`] in order, renders each one and hands
//! the pixels to a [`FrameSink`]. Runs strictly sequentially:
//!
//! ```text
//! Initializing -> Rendering(0) -> ... -> Rendering(N-1) -> Flushing -> Done
//! ```
//!
//! The artifacts of the most recent frame are kept in `current` instead of
//! being captured by callbacks.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{GwError, GwResult};
use crate::export::encoder::FrameSink;
use crate::simulation::field::WaveField;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::TimeSample;
use crate::visualization::renderer::{FrameArtifacts, FrameRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Initializing,
    Rendering { frame: usize },
    Flushing,
    Done,
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub frames: usize,
    pub output: PathBuf,
    pub elapsed: Duration,
    pub last_frame: Option<FrameArtifacts>,
}

pub struct AnimationDriver<'a, S: FrameSink> {
    scenario: &'a Scenario,
    renderer: FrameRenderer,
    sink: Option<S>,
    state: DriverState,
    current: Option<FrameArtifacts>,
    frames_rendered: usize,
}

impl<'a, S: FrameSink> AnimationDriver<'a, S> {
    pub fn new(scenario: &'a Scenario, sink: S) -> GwResult<Self> {
        let renderer = FrameRenderer::new(&scenario.render, scenario.grid.extent)?;
        Ok(Self {
            scenario,
            renderer,
            sink: Some(sink),
            state: DriverState::Initializing,
            current: None,
            frames_rendered: 0,
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    pub fn current(&self) -> Option<&FrameArtifacts> {
        self.current.as_ref()
    }

    /// Render and emit the frame for `sample`
    pub fn step(&mut self, sample: TimeSample) -> GwResult<()> {
        self.state = DriverState::Rendering { frame: sample.frame };
        let sc = self.scenario;

        let masses = sc.orbit.positions(sample.t);
        let field = WaveField::compute(&sc.grid, &sc.wave, sample.t);
        let artifacts = self.renderer.render_frame(&sc.grid, &field, &masses, &sc.wave)?;
        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| GwError::Encoder("frame sink already finished".into()))?;
        sink.write_frame(self.renderer.canvas().image())?;

        log::debug!(
            "frame {}/{} t={:.3}s z=[{:.4}, {:.4}] contours={}",
            sample.frame + 1,
            sc.total_frames,
            sample.t,
            artifacts.surface.color_range.0,
            artifacts.surface.color_range.1,
            artifacts.contour_segments
        );

        self.current = Some(artifacts);
        self.frames_rendered += 1;
        Ok(())
    }

    /// Render every frame, then flush the sink. A driver runs once.
    pub fn run(&mut self) -> GwResult<RenderSummary> {
        let started = Instant::now();
        let samples: Vec<TimeSample> = self.scenario.time_samples().collect();
        for sample in samples {
            self.step(sample)?;
        }

        self.state = DriverState::Flushing;
        let sink = self
            .sink
            .take()
            .ok_or_else(|| GwError::Encoder("frame sink already finished".into()))?;
        let output = sink.finish()?;
        self.state = DriverState::Done;
        let elapsed = started.elapsed();
        log::info!(
            "rendered {} frames in {:.2}s",
            self.frames_rendered,
            elapsed.as_secs_f64()
        );

        Ok(RenderSummary {
            frames: self.frames_rendered,
            output,
            elapsed,
            last_frame: self.current.clone(),
        })
    }
}
