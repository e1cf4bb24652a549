use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::{ConfigError, SimulationConfig, UpdateOrder};
use crate::interaction::{self, PointerSignal, PointerSource};
use crate::state::{Agent, AgentRow, FlockState, FlockStats};
use crate::{motion, spatial, steering, Vector2D};

use core::f32::consts::TAU;

/// A flock simulation session.
///
/// Owns the agent table, the immutable configuration and the random source
/// used for spawning and speed jitter. Seeding the random source makes the
/// whole trajectory reproducible.
pub struct Flock<R: RngCore = SmallRng> {
    config: SimulationConfig,
    state: FlockState,
    rng: R,
    read_buffer: Vec<AgentRow>,
    frame: u64,
}

impl Flock<SmallRng> {
    /// Build a flock with random initial rows drawn from a seeded generator.
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Flock<R> {
    /// Build a flock with random positions and headings.
    ///
    /// Positions are kept `spawn_inset` away from the edges on canvases big
    /// enough to allow it, otherwise they cover the whole canvas.
    pub fn new(config: SimulationConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let (x_range, y_range) = spawn_ranges(&config);
        let rows = (0..config.agent_count)
            .map(|_| {
                let position = Vector2D::new(
                    rng.gen_range(x_range.0..x_range.1),
                    rng.gen_range(y_range.0..y_range.1),
                );
                AgentRow::new(position, rng.gen_range(0.0..TAU))
            })
            .collect();

        Ok(Self::assemble(config, rows, rng))
    }

    /// Build a flock from explicit rows, one per agent.
    ///
    /// Every row needs a finite heading and a position already on the canvas
    /// under the configured boundary mode; the first offending row is
    /// reported as [`ConfigError::InvalidRow`].
    pub fn from_rows(
        config: SimulationConfig,
        rows: Vec<AgentRow>,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if rows.len() != config.agent_count {
            return Err(ConfigError::RowCountMismatch {
                expected: config.agent_count,
                actual: rows.len(),
            });
        }
        if let Some(index) = rows.iter().position(|row| !row_fits(row, &config)) {
            return Err(ConfigError::InvalidRow { index });
        }
        let rows = rows
            .into_iter()
            .map(|row| AgentRow::new(row.position, row.heading))
            .collect();
        Ok(Self::assemble(config, rows, rng))
    }

    fn assemble(config: SimulationConfig, rows: Vec<AgentRow>, rng: R) -> Self {
        log::debug!(
            "flock initialized: {} agents on {}x{} canvas, {:?} boundary, {:?} reads",
            config.agent_count,
            config.width,
            config.height,
            config.boundary,
            config.update_order
        );
        Self {
            state: FlockState::new(rows, config.perception_radius),
            read_buffer: Vec::with_capacity(config.agent_count),
            config,
            rng,
            frame: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &FlockState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Number of completed updates.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn agent(&self, index: usize) -> Option<Agent> {
        self.state.agent(index)
    }

    pub fn agents(&self) -> impl Iterator<Item = Agent> + '_ {
        self.state.agents()
    }

    pub fn stats(&self) -> FlockStats {
        self.state.stats()
    }

    /// Advance one frame using the configured base speed.
    pub fn step(&mut self, dt: f32, pointer: &PointerSignal) {
        let speed = self.config.base_speed;
        self.update(dt, speed, pointer);
    }

    /// Advance one frame, sampling the pointer from `source` first.
    pub fn update_from<S: PointerSource + ?Sized>(&mut self, dt: f32, speed: f32, source: &mut S) {
        let pointer = source.sample();
        self.update(dt, speed, &pointer);
    }

    /// Advance the simulation by `dt` seconds at forward speed `speed`.
    ///
    /// For each agent in index order: query neighbors, steer, move, resolve
    /// the boundary, then apply the pointer bias. A non-finite or negative
    /// `dt` leaves the flock untouched.
    pub fn update(&mut self, dt: f32, speed: f32, pointer: &PointerSignal) {
        if !dt.is_finite() || dt < 0.0 || !speed.is_finite() {
            log::warn!("ignoring update with dt={} speed={}", dt, speed);
            return;
        }

        let snapshot = self.config.update_order == UpdateOrder::Snapshot;
        if snapshot {
            self.read_buffer.clear();
            self.read_buffer.extend_from_slice(self.state.rows());
        }

        let config = &self.config;
        let neighbor_radius = config.neighbor_radius();
        let mut pinned = 0usize;

        for index in 0..self.state.len() {
            let neighbors = if snapshot {
                spatial::nearest_neighbors(&self.read_buffer, index, neighbor_radius)
            } else {
                spatial::nearest_neighbors(self.state.rows(), index, neighbor_radius)
            };

            let jitter = if config.speed_jitter > 0.0 {
                self.rng.gen_range(-config.speed_jitter..=config.speed_jitter)
            } else {
                0.0
            };

            let row = &mut self.state.rows_mut()[index];

            let intent = steering::steer(row.position, row.heading, &neighbors, config, dt);
            row.heading = steering::apply_turn(row.heading, intent, config.turn_epsilon);

            let forward = motion::forward_speed(speed, jitter, neighbors.len(), config);
            let moved = motion::advance(row.position, row.heading, forward, dt);
            let resolved = motion::resolve_boundary(moved, config);
            if resolved.clamped {
                pinned += 1;
            }
            row.position = resolved.position;

            let bias = interaction::pointer_intent(row.position, pointer, config, dt);
            row.heading = steering::apply_turn(row.heading, bias, config.turn_epsilon);
        }

        if pinned > 0 {
            log::debug!(
                "frame {}: {} agents crossed the edge margin and were pinned to the canvas",
                self.frame,
                pinned
            );
        }
        self.frame += 1;
        log::trace!("frame {} done (dt={}, speed={})", self.frame, dt, speed);
    }
}

fn row_fits(row: &AgentRow, config: &SimulationConfig) -> bool {
    let finite = row.position.x.is_finite() && row.position.y.is_finite() && row.heading.is_finite();
    finite && motion::resolve_boundary(row.position, config).position == row.position
}

fn spawn_ranges(config: &SimulationConfig) -> ((f32, f32), (f32, f32)) {
    let axis = |extent: f32| {
        if extent > 2.0 * config.spawn_inset {
            (config.spawn_inset, extent - config.spawn_inset)
        } else {
            (0.0, extent)
        }
    };
    (axis(config.width), axis(config.height))
}
