use crate::config::{BoundaryMode, SimulationConfig};
use crate::spatial::MAX_NEIGHBORS;
use crate::{math, Vector2D};

/// Forward speed for one agent this frame.
///
/// Agents with fewer neighbors than [`MAX_NEIGHBORS`] get a bonus of
/// `density_gain` per empty slot so that stragglers catch up with the flock.
pub fn forward_speed(speed: f32, jitter: f32, neighbor_count: usize, config: &SimulationConfig) -> f32 {
    let missing = MAX_NEIGHBORS.saturating_sub(neighbor_count) as f32;
    (speed + jitter + config.density_gain * missing).max(0.0)
}

/// Move `position` along `heading` for `dt` seconds.
pub fn advance(position: Vector2D, heading: f32, speed: f32, dt: f32) -> Vector2D {
    position + Vector2D::from_angle(heading) * (speed * dt)
}

/// Outcome of boundary resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub position: Vector2D,
    /// True when clamp mode had to pull the agent back onto the canvas.
    pub clamped: bool,
}

/// Bring a moved position back onto the canvas.
///
/// Wrap mode folds coordinates into [0, width) x [0, height). Clamp mode
/// leaves positions on the canvas untouched and only pins agents that got
/// past an edge despite edge steering.
pub fn resolve_boundary(position: Vector2D, config: &SimulationConfig) -> Resolved {
    match config.boundary {
        BoundaryMode::Wrap => Resolved {
            position: Vector2D::new(
                math::wrap(position.x, config.width),
                math::wrap(position.y, config.height),
            ),
            clamped: false,
        },
        BoundaryMode::Clamp => {
            let pinned = Vector2D::new(
                position.x.clamp(0.0, config.width),
                position.y.clamp(0.0, config.height),
            );
            Resolved {
                position: pinned,
                clamped: pinned != position,
            }
        }
    }
}
