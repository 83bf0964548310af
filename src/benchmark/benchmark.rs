use std::time::Instant;

use crate::configuration::config::SceneConfig;
use crate::error::GwResult;
use crate::simulation::field::WaveField;
use crate::simulation::grid::SpatialGrid;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::TimeSample;
use crate::visualization::renderer::FrameRenderer;

/// Time the grid evaluation of the wave field for several mesh sizes
pub fn bench_field(cfg: &SceneConfig) -> GwResult<()> {
    let scenario = Scenario::build_scenario(cfg.clone())?;
    let resolutions = [30, 60, 120, 240, 480];
    let evaluations = 20;

    for n in resolutions {
        let grid = SpatialGrid::build(cfg.grid.extent, n);

        // Warm up
        let _ = WaveField::compute(&grid, &scenario.wave, 0.0);

        let t0 = Instant::now();
        for k in 0..evaluations {
            let t = TimeSample::from_frame(k, cfg.animation.fps).t;
            let _ = WaveField::compute(&grid, &scenario.wave, t);
        }
        let per_field = t0.elapsed().as_secs_f64() * 1000.0 / evaluations as f64;

        println!("grid = {n:4}x{n:<4} field = {per_field:9.4} ms");
    }
    Ok(())
}

/// Time full frame renders (axes, contours, surface, markers) without encoding
pub fn bench_render(cfg: &SceneConfig) -> GwResult<()> {
    let scenario = Scenario::build_scenario(cfg.clone())?;
    let mut renderer = FrameRenderer::new(&scenario.render, scenario.grid.extent)?;
    let frames = scenario.total_frames.min(30);

    let mut field_ms = 0.0;
    let mut render_ms = 0.0;
    for sample in scenario.time_samples().take(frames) {
        let t0 = Instant::now();
        let masses = scenario.orbit.positions(sample.t);
        let field = WaveField::compute(&scenario.grid, &scenario.wave, sample.t);
        field_ms += t0.elapsed().as_secs_f64() * 1000.0;

        let t1 = Instant::now();
        renderer.render_frame(&scenario.grid, &field, &masses, &scenario.wave)?;
        render_ms += t1.elapsed().as_secs_f64() * 1000.0;
    }

    let (w, h) = scenario.render.pixel_size();
    println!(
        "{frames} frames at {w}x{h}: field = {:8.4} ms/frame, render = {:8.3} ms/frame",
        field_ms / frames.max(1) as f64,
        render_ms / frames.max(1) as f64
    );
    Ok(())
}
