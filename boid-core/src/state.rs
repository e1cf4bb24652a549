use alloc::vec::Vec;

use crate::{math, Vector2D};

/// One row of the flock table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentRow {
    pub position: Vector2D,
    /// Radians in [0, 2π).
    pub heading: f32,
}

impl AgentRow {
    pub fn new(position: Vector2D, heading: f32) -> Self {
        Self {
            position,
            heading: math::normalize_angle(heading),
        }
    }
}

/// Read-only view of an agent, for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub index: usize,
    pub position: Vector2D,
    pub heading: f32,
    pub size: f32,
}

/// Aggregate measures over the whole flock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockStats {
    pub centroid: Vector2D,
    /// Length of the mean heading unit vector: 1 when every agent points the
    /// same way, near 0 when headings cancel out.
    pub polarization: f32,
}

/// Fixed-size table holding every agent's position and heading.
///
/// Agents are addressed by index; the table length never changes after
/// construction.
#[derive(Debug, Clone)]
pub struct FlockState {
    rows: Vec<AgentRow>,
    agent_size: f32,
}

impl FlockState {
    pub fn new(rows: Vec<AgentRow>, agent_size: f32) -> Self {
        Self { rows, agent_size }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[AgentRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [AgentRow] {
        &mut self.rows
    }

    pub fn agent(&self, index: usize) -> Option<Agent> {
        self.rows.get(index).map(|row| Agent {
            index,
            position: row.position,
            heading: row.heading,
            size: self.agent_size,
        })
    }

    pub fn agents(&self) -> impl Iterator<Item = Agent> + '_ {
        self.rows.iter().enumerate().map(move |(index, row)| Agent {
            index,
            position: row.position,
            heading: row.heading,
            size: self.agent_size,
        })
    }

    pub fn stats(&self) -> FlockStats {
        let count = self.rows.len().max(1) as f32;
        let mut position_sum = Vector2D::zero();
        let mut heading_sum = Vector2D::zero();
        for row in &self.rows {
            position_sum += row.position;
            heading_sum += Vector2D::from_angle(row.heading);
        }
        FlockStats {
            centroid: position_sum / count,
            polarization: (heading_sum / count).magnitude(),
        }
    }
}
