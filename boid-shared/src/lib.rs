#![cfg_attr(not(feature = "std"), no_std)]

//! Serializable settings, pointer events and frame snapshots exchanged
//! between the flock driver and its consumers.

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Represents a 2D position in screen coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    Wrap,
    Clamp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadOrder {
    Snapshot,
    InPlace,
}

/// Flock simulation settings as stored in a settings file
///
/// Every field is optional; an unset field keeps the simulation's built-in
/// default when the settings are applied. Angular rates are radians per
/// second.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub agent_count: Option<usize>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub boundary: Option<BoundaryKind>,
    pub read_order: Option<ReadOrder>,
    pub perception_radius: Option<f32>,
    pub separation_factor: Option<f32>,
    pub alignment_factor: Option<f32>,
    pub neighbor_factor: Option<f32>,
    pub margin: Option<f32>,
    pub spawn_inset: Option<f32>,
    pub base_speed: Option<f32>,
    pub turn_rate: Option<f32>,
    pub max_turn_rate: Option<f32>,
    pub turn_epsilon: Option<f32>,
    pub speed_jitter: Option<f32>,
    pub density_gain: Option<f32>,
    pub attract_turn_rate: Option<f32>,
    pub repel_turn_rate: Option<f32>,
    pub repel_radius: Option<f32>,
}

/// Pointer state for one frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PointerState {
    pub position: Option<Position>,
    pub attract: bool,
    pub repel: bool,
    pub repel_radius: Option<f32>,
}

impl PointerState {
    /// A pointer that is absent or has no button held does nothing.
    pub fn is_active(&self) -> bool {
        self.position.is_some() && (self.attract || self.repel)
    }
}

/// A pointer change taking effect at `frame` and held until the next event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointerEvent {
    pub frame: u64,
    pub pointer: PointerState,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

/// Flock state after a frame, as emitted by the driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub elapsed: f32,
    pub centroid: Position,
    pub polarization: f32,
    pub agents: Vec<AgentSnapshot>,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub seed: u64,
    pub agent_count: usize,
    pub frames: u64,
    pub elapsed: f32,
    pub snapshots_written: u64,
    pub final_centroid: Position,
    pub final_polarization: f32,
}
