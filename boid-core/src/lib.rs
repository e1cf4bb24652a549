#![cfg_attr(not(feature = "std"), no_std)]

//! Neighbor-based flocking core.
//!
//! Each frame every agent looks up its nearest neighbors, picks a target
//! heading from separation, alignment and cohesion (or from the canvas edge
//! when it gets too close), turns toward it at a bounded rate, moves forward
//! and resolves the canvas boundary. An optional pointer signal then biases
//! headings toward or away from a point.

extern crate alloc;

pub mod config;
pub mod flock;
pub mod interaction;
pub mod math;
pub mod motion;
pub mod spatial;
pub mod state;
pub mod steering;

pub use config::{BoundaryMode, ConfigError, SimulationConfig, UpdateOrder};
pub use flock::Flock;
pub use interaction::{PointerMode, PointerSignal, PointerSource};
pub use spatial::{Neighbor, Neighborhood, MAX_NEIGHBORS};
pub use state::{Agent, AgentRow, FlockState, FlockStats};
pub use steering::TurnIntent;

/// A 2D vector used for positions and headings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing along `angle` (radians, x axis = 0).
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: math::cos(angle),
            y: math::sin(angle),
        }
    }

    pub fn magnitude(&self) -> f32 {
        math::sqrt(self.x * self.x + self.y * self.y)
    }

    pub fn distance_squared(&self, other: &Vector2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        math::sqrt(self.distance_squared(other))
    }

    /// Angle of the vector from `self` to `other`, normalized to [0, 2π).
    pub fn bearing_to(&self, other: &Vector2D) -> f32 {
        math::normalize_angle(math::atan2(other.y - self.y, other.x - self.x))
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}
