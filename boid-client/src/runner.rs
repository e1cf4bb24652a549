use std::io::Write;

use anyhow::{Context, Result};
use boid_core::{Flock, PointerSource, SimulationConfig};
use boid_shared::{AgentSnapshot, FrameSnapshot, Position, RunSummary};

/// How a headless run is driven
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub seed: u64,
    pub frames: u64,
    /// Fixed frame time, seconds.
    pub dt: f32,
    /// Forward speed; `None` uses the configured base speed.
    pub speed: Option<f32>,
    /// Write a snapshot every this many frames; 0 writes none.
    pub snapshot_every: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            frames: 600,
            dt: 1.0 / 60.0,
            speed: None,
            snapshot_every: 60,
        }
    }
}

pub fn snapshot(flock: &Flock, elapsed: f32) -> FrameSnapshot {
    let stats = flock.stats();
    FrameSnapshot {
        frame: flock.frame(),
        elapsed,
        centroid: Position::new(stats.centroid.x, stats.centroid.y),
        polarization: stats.polarization,
        agents: flock
            .agents()
            .map(|agent| AgentSnapshot {
                index: agent.index,
                x: agent.position.x,
                y: agent.position.y,
                heading: agent.heading,
            })
            .collect(),
    }
}

/// Run a seeded flock for `options.frames` frames, writing JSON-lines
/// snapshots to `out`.
pub fn run<S, W>(
    config: SimulationConfig,
    options: &RunOptions,
    pointer: &mut S,
    mut out: W,
) -> Result<RunSummary>
where
    S: PointerSource + ?Sized,
    W: Write,
{
    let mut flock = Flock::seeded(config, options.seed).context("Invalid flock configuration")?;
    let speed = options.speed.unwrap_or(config.base_speed);
    log::info!(
        "Running {} agents for {} frames (dt={:.4}, speed={}, seed={})",
        config.agent_count,
        options.frames,
        options.dt,
        speed,
        options.seed
    );

    let mut elapsed = 0.0f32;
    let mut written = 0u64;
    for _ in 0..options.frames {
        flock.update_from(options.dt, speed, pointer);
        elapsed += options.dt;

        if options.snapshot_every > 0 && flock.frame() % options.snapshot_every == 0 {
            let frame = snapshot(&flock, elapsed);
            serde_json::to_writer(&mut out, &frame).context("Failed to encode snapshot")?;
            out.write_all(b"\n").context("Failed to write snapshot")?;
            written += 1;
            log::debug!(
                "frame {}: centroid ({:.1}, {:.1}), polarization {:.3}",
                frame.frame,
                frame.centroid.x,
                frame.centroid.y,
                frame.polarization
            );
        }
    }
    out.flush().context("Failed to flush output")?;

    let stats = flock.stats();
    Ok(RunSummary {
        seed: options.seed,
        agent_count: flock.len(),
        frames: flock.frame(),
        elapsed,
        snapshots_written: written,
        final_centroid: Position::new(stats.centroid.x, stats.centroid.y),
        final_polarization: stats.polarization,
    })
}
