use gwsim::{SceneConfig, Scenario, AnimationDriver, EncoderSettings, FfmpegEncoder, PngSequence};
use gwsim::{bench_field, bench_render};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Render a gravitational wave animation to video")]
struct Args {
    /// YAML scene overriding the built-in constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output video path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write PNG frames into this directory instead of encoding a video
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Time field evaluation and frame rendering, then exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scene(args: &Args) -> Result<SceneConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read scene {}", path.display()))?;
            SceneConfig::from_yaml_str(&text)
                .with_context(|| format!("invalid scene {}", path.display()))?
        }
        None => SceneConfig::default(),
    };
    if let Some(output) = &args.output {
        cfg.animation.output = output.clone();
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = load_scene(&args)?;

    if args.bench {
        bench_field(&cfg)?;
        bench_render(&cfg)?;
        return Ok(());
    }

    let scenario = Scenario::build_scenario(cfg)?;

    let summary = match &args.png_dir {
        Some(dir) => {
            println!("Saving frames to {}", dir.display());
            let sink = PngSequence::open(dir)?;
            AnimationDriver::new(&scenario, sink)?.run()?
        }
        None => {
            let output = scenario.animation.output.clone();
            println!("Saving animation to {}", output.display());
            let (width, height) = scenario.render.pixel_size();
            let settings = EncoderSettings::from_config(&scenario.encoder, scenario.animation.fps, width, height);
            let sink = FfmpegEncoder::open(&output, settings)?;
            AnimationDriver::new(&scenario, sink)?.run()?
        }
    };

    log::info!("{} frames -> {}", summary.frames, summary.output.display());
    println!("Render complete.");

    Ok(())
}
