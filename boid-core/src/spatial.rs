//! Nearest-neighbor lookup over the flock table.
//!
//! Every query scans the whole table, so a frame costs O(N²). That is fine
//! for a few hundred agents; larger flocks would need a spatial index.

use crate::state::AgentRow;
use crate::{math, Vector2D};

/// How many nearest agents are considered before the radius filter.
pub const MAX_NEIGHBORS: usize = 7;

/// Another agent seen from the querying one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub position: Vector2D,
    pub heading: f32,
    pub distance: f32,
}

/// Neighbors sorted by ascending distance, ties by ascending index.
pub type Neighborhood = heapless::Vec<Neighbor, MAX_NEIGHBORS>;

/// Find up to [`MAX_NEIGHBORS`] agents closest to `rows[index]` whose
/// distance is strictly below `radius`.
pub fn nearest_neighbors(rows: &[AgentRow], index: usize, radius: f32) -> Neighborhood {
    let mut found = Neighborhood::new();
    let Some(origin) = rows.get(index).map(|row| row.position) else {
        return found;
    };
    let radius_squared = radius * radius;

    for (candidate, row) in rows.iter().enumerate() {
        if candidate == index {
            continue;
        }
        // `distance` holds the squared distance until the final pass.
        let distance = origin.distance_squared(&row.position);
        if distance.is_nan() || distance >= radius_squared {
            continue;
        }
        let slot = found
            .iter()
            .position(|n| distance < n.distance)
            .unwrap_or(found.len());
        if slot >= MAX_NEIGHBORS {
            continue;
        }
        if found.is_full() {
            found.pop();
        }
        let neighbor = Neighbor {
            index: candidate,
            position: row.position,
            heading: row.heading,
            distance,
        };
        let inserted = found.insert(slot, neighbor);
        debug_assert!(inserted.is_ok(), "neighbor buffer full after eviction");
    }

    for neighbor in found.iter_mut() {
        neighbor.distance = math::sqrt(neighbor.distance);
    }
    found
}
