//! Pointer-driven attraction and repulsion.
//!
//! Runs after steering and motion and is the last heading write of a frame.

use crate::config::SimulationConfig;
use crate::steering::TurnIntent;
use crate::Vector2D;

/// Which pointer effect is active this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMode {
    Idle,
    Attract,
    Repel,
}

/// Pointer state sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSignal {
    pub position: Vector2D,
    pub attract: bool,
    pub repel: bool,
    /// Overrides the configured repel radius for this frame.
    pub repel_radius: Option<f32>,
}

impl Default for PointerSignal {
    fn default() -> Self {
        Self::idle()
    }
}

impl PointerSignal {
    pub fn idle() -> Self {
        Self {
            position: Vector2D::zero(),
            attract: false,
            repel: false,
            repel_radius: None,
        }
    }

    pub fn attract(position: Vector2D) -> Self {
        Self {
            position,
            attract: true,
            ..Self::idle()
        }
    }

    pub fn repel(position: Vector2D) -> Self {
        Self {
            position,
            repel: true,
            ..Self::idle()
        }
    }

    pub fn with_repel_radius(mut self, radius: f32) -> Self {
        self.repel_radius = Some(radius);
        self
    }

    /// Attract wins when both flags are held.
    pub fn mode(&self) -> PointerMode {
        if self.attract {
            PointerMode::Attract
        } else if self.repel {
            PointerMode::Repel
        } else {
            PointerMode::Idle
        }
    }
}

/// Something that can report the pointer state at the moment a frame runs
pub trait PointerSource {
    fn sample(&mut self) -> PointerSignal;
}

impl PointerSource for PointerSignal {
    fn sample(&mut self) -> PointerSignal {
        *self
    }
}

impl<F> PointerSource for F
where
    F: FnMut() -> PointerSignal,
{
    fn sample(&mut self) -> PointerSignal {
        self()
    }
}

/// Compute the pointer turn for an agent at `position`.
///
/// Attraction reaches every agent and gets stronger closer to the pointer.
/// Repulsion only reaches agents inside the repel radius and gets stronger
/// as they approach the pointer. An agent sitting exactly on the pointer has
/// no defined bearing and is left alone.
pub fn pointer_intent(
    position: Vector2D,
    pointer: &PointerSignal,
    config: &SimulationConfig,
    dt: f32,
) -> Option<TurnIntent> {
    let mode = pointer.mode();
    if mode == PointerMode::Idle {
        return None;
    }

    let distance = position.distance(&pointer.position);
    if !distance.is_finite() || distance <= 0.0 {
        return None;
    }
    let max_step = config.max_turn_rate * dt;

    match mode {
        PointerMode::Attract => {
            let reach = config.neighbor_radius();
            let step = config.attract_turn_rate * dt * reach / (distance + reach);
            Some(TurnIntent {
                target: position.bearing_to(&pointer.position),
                step: step.min(max_step),
            })
        }
        PointerMode::Repel => {
            let radius = pointer.repel_radius.unwrap_or(config.repel_radius);
            if distance >= radius {
                return None;
            }
            let step = config.repel_turn_rate * dt * radius / distance;
            Some(TurnIntent {
                target: pointer.position.bearing_to(&position),
                step: step.min(max_step),
            })
        }
        PointerMode::Idle => None,
    }
}
