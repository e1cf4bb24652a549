use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use boid_client::{load_settings, run, to_config, Overrides, PointerScript, RunOptions};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flock simulation runner", long_about = None)]
struct Args {
    /// JSON settings file; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of agents
    #[arg(short = 'n', long)]
    agents: Option<usize>,

    /// Canvas width
    #[arg(long)]
    width: Option<f32>,

    /// Canvas height
    #[arg(long)]
    height: Option<f32>,

    /// Steer away from edges instead of wrapping around
    #[arg(long)]
    clamp: bool,

    /// Let neighbor queries see rows already updated this frame
    #[arg(long)]
    in_place: bool,

    /// Base perception radius
    #[arg(short, long)]
    radius: Option<f32>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Fixed frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Forward speed (defaults to the configured base speed)
    #[arg(short, long)]
    speed: Option<f32>,

    /// Random seed; a fresh one is picked and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Pointer script, one JSON event per line
    #[arg(short, long)]
    pointer_script: Option<PathBuf>,

    /// Output file for JSON-lines snapshots (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a snapshot every N frames (0 disables snapshots)
    #[arg(short, long, default_value_t = 60)]
    every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut settings = load_settings(args.config.as_deref())?;
    Overrides {
        agent_count: args.agents,
        width: args.width,
        height: args.height,
        clamp: args.clamp,
        in_place: args.in_place,
        perception_radius: args.radius,
    }
    .apply(&mut settings);
    let config = to_config(&settings);

    let mut script = match &args.pointer_script {
        Some(path) => PointerScript::load(path)?,
        None => PointerScript::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let options = RunOptions {
        seed,
        frames: args.frames,
        dt: args.dt,
        speed: args.speed,
        snapshot_every: args.every,
    };

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = run(config, &options, &mut script, out).context("Simulation failed")?;

    log::info!(
        "Finished {} frames ({:.2}s simulated) with seed {}: {} snapshots, centroid ({:.1}, {:.1}), polarization {:.3}",
        summary.frames,
        summary.elapsed,
        summary.seed,
        summary.snapshots_written,
        summary.final_centroid.x,
        summary.final_centroid.y,
        summary.final_polarization
    );

    Ok(())
}
