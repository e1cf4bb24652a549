//! Target heading selection for a single agent.
//!
//! Rules are evaluated in priority order: edge avoidance (clamp mode only)
//! overrides separation, which overrides alignment, which overrides
//! cohesion. The result is a [`TurnIntent`]; [`apply_turn`] rotates the
//! current heading toward it by a bounded step.

use crate::config::{BoundaryMode, SimulationConfig};
use crate::spatial::Neighbor;
use crate::{math, Vector2D};

use core::f32::consts::{FRAC_PI_2, PI};

/// Resultant lengths below this are treated as headings that cancel out.
const MIN_RESULTANT: f32 = 1e-6;

/// Where an agent wants to point and how far it may rotate this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnIntent {
    /// Target heading in [0, 2π).
    pub target: f32,
    /// Maximum rotation for this frame, radians.
    pub step: f32,
}

/// Compute the flocking target from the neighbor set.
///
/// Separation turns faster the closer the nearest neighbor is, and at the
/// full cap while `heading` still points toward it.
///
/// Returns `None` when there is nobody in range, when the nearest neighbor
/// sits exactly on top of the agent, or when neighbor headings cancel out
/// while alignment would apply.
pub fn flocking_intent(
    position: Vector2D,
    heading: f32,
    neighbors: &[Neighbor],
    config: &SimulationConfig,
    dt: f32,
) -> Option<TurnIntent> {
    let nearest = neighbors.first()?;
    let base_step = config.turn_rate * dt;
    let max_step = config.max_turn_rate * dt;

    let separation_radius = config.separation_radius();
    if nearest.distance < separation_radius {
        if nearest.distance <= 0.0 {
            return None;
        }
        let away = nearest.position.bearing_to(&position);
        let closing = math::abs(math::angle_difference(heading, away)) > FRAC_PI_2;
        let step = if closing {
            max_step
        } else {
            (base_step * separation_radius / nearest.distance).min(max_step)
        };
        return Some(TurnIntent { target: away, step });
    }

    let count = neighbors.len() as f32;
    let mut heading_sum = Vector2D::zero();
    let mut position_sum = Vector2D::zero();
    for neighbor in neighbors {
        heading_sum += Vector2D::from_angle(neighbor.heading);
        position_sum += neighbor.position;
    }
    let centroid = position_sum / count;

    if position.distance(&centroid) < config.alignment_radius() {
        if heading_sum.magnitude() < MIN_RESULTANT {
            return None;
        }
        Some(TurnIntent {
            target: math::normalize_angle(math::atan2(heading_sum.y, heading_sum.x)),
            step: base_step,
        })
    } else {
        Some(TurnIntent {
            target: position.bearing_to(&centroid),
            step: base_step,
        })
    }
}

/// Compute the edge-avoidance target in clamp mode.
///
/// Inside the margin the agent points along the inward normal of the
/// closest edge, and the step grows linearly from the base turn rate at the
/// margin's inner line to the maximum turn rate at the edge itself.
pub fn edge_intent(position: Vector2D, config: &SimulationConfig, dt: f32) -> Option<TurnIntent> {
    if config.boundary != BoundaryMode::Clamp || config.margin <= 0.0 {
        return None;
    }

    // Screen coordinates: y grows downward, heading 0 points along +x.
    let edges = [
        (position.x, 0.0),
        (config.width - position.x, PI),
        (position.y, FRAC_PI_2),
        (config.height - position.y, 3.0 * FRAC_PI_2),
    ];
    let (edge_distance, normal) = edges
        .into_iter()
        .fold((f32::INFINITY, 0.0), |closest, edge| {
            if edge.0 < closest.0 {
                edge
            } else {
                closest
            }
        });

    if edge_distance >= config.margin {
        return None;
    }

    let depth = (1.0 - edge_distance / config.margin).clamp(0.0, 1.0);
    let base_step = config.turn_rate * dt;
    let max_step = config.max_turn_rate * dt;
    Some(TurnIntent {
        target: normal,
        step: base_step + depth * (max_step - base_step),
    })
}

/// Pick the intent that wins for this agent: edges first, then flocking.
pub fn steer(
    position: Vector2D,
    heading: f32,
    neighbors: &[Neighbor],
    config: &SimulationConfig,
    dt: f32,
) -> Option<TurnIntent> {
    edge_intent(position, config, dt)
        .or_else(|| flocking_intent(position, heading, neighbors, config, dt))
}

/// Rotate `heading` toward `intent.target` by `intent.step` along the
/// shorter arc. Differences smaller than `epsilon` leave the heading alone.
pub fn apply_turn(heading: f32, intent: Option<TurnIntent>, epsilon: f32) -> f32 {
    let Some(intent) = intent else {
        return heading;
    };
    if !intent.step.is_finite() || intent.step <= 0.0 {
        return heading;
    }
    let diff = math::angle_difference(heading, intent.target);
    if math::abs(diff) < epsilon {
        return heading;
    }
    let direction = if diff > 0.0 { 1.0 } else { -1.0 };
    math::normalize_angle(heading + intent.step * direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::nearest_neighbors;
    use crate::state::AgentRow;

    const DT: f32 = 1.0 / 60.0;

    fn neighbor(index: usize, x: f32, y: f32, heading: f32, from: Vector2D) -> Neighbor {
        let position = Vector2D::new(x, y);
        Neighbor {
            index,
            position,
            heading,
            distance: from.distance(&position),
        }
    }

    #[test]
    fn test_no_neighbors_no_intent() {
        let config = SimulationConfig::default();
        assert_eq!(flocking_intent(Vector2D::new(500.0, 300.0), 0.0, &[], &config, DT), None);
    }

    #[test]
    fn test_separation_points_away_from_nearest() {
        let config = SimulationConfig::default();
        let me = Vector2D::new(100.0, 100.0);
        let others = [neighbor(1, 110.0, 100.0, 0.0, me)];
        let intent = flocking_intent(me, PI, &others, &config, DT).unwrap();
        assert!((intent.target - PI).abs() < 1e-5);
        // 10 of 22 units away: step is base * 2.2.
        assert!((intent.step - config.turn_rate * DT * 2.2).abs() < 1e-5);
    }

    #[test]
    fn test_separation_step_grows_as_gap_shrinks_and_is_capped() {
        let config = SimulationConfig::default();
        let me = Vector2D::new(100.0, 100.0);
        let intent = |x: f32| {
            flocking_intent(me, PI, &[neighbor(1, x, 100.0, 0.0, me)], &config, DT).unwrap()
        };
        let far = intent(115.0);
        let near = intent(105.0);
        let touching = intent(100.01);
        assert!(near.step > far.step);
        assert!((touching.step - config.max_turn_rate * DT).abs() < 1e-6);
    }

    #[test]
    fn test_separation_at_full_cap_while_closing() {
        let config = SimulationConfig::default();
        let me = Vector2D::new(100.0, 100.0);
        let others = [neighbor(1, 110.0, 100.0, PI, me)];
        let max = config.max_turn_rate * DT;

        // Heading straight at the neighbor, or obliquely toward it.
        let head_on = flocking_intent(me, 0.0, &others, &config, DT).unwrap();
        assert_eq!(head_on.step, max);
        let oblique = flocking_intent(me, 0.5, &others, &config, DT).unwrap();
        assert_eq!(oblique.step, max);

        // Already moving away: the distance-scaled step applies.
        let leaving = flocking_intent(me, 2.5, &others, &config, DT).unwrap();
        assert!((leaving.step - config.turn_rate * DT * 2.2).abs() < 1e-5);
        assert!((head_on.target - PI).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_neighbor_no_turn() {
        let config = SimulationConfig::default();
        let me = Vector2D::new(100.0, 100.0);
        let others = [neighbor(1, 100.0, 100.0, 1.0, me)];
        assert_eq!(flocking_intent(me, 0.0, &others, &config, DT), None);
    }

    #[test]
    fn test_alignment_uses_circular_mean() {
        let config = SimulationConfig::default();
        let me = Vector2D::new(100.0, 100.0);
        // Headings just either side of zero average to zero, not π.
        let others = [
            neighbor(1, 150.0, 100.0, 0.2, me),
            neighbor(2, 100.0, 150.0, math::normalize_angle(-0.2), me),
        ];
        let intent = flocking_intent(me, 1.0, &others, &config, DT).unwrap();
        let off = math::abs(math::angle_difference(0.0, intent.target));
        assert!(off < 1e-4, "target {}", intent.target);
        assert_eq!(intent.step, config.turn_rate * DT);
    }

    #[test]
    fn test_cancelling_headings_give_no_alignment_target() {
        let config = SimulationConfig::default();
        let me = Vector2D::new(100.0, 100.0);
        let others = [
            neighbor(1, 150.0, 100.0, 0.0, me),
            neighbor(2, 50.0, 100.0, PI, me),
        ];
        assert_eq!(flocking_intent(me, 1.0, &others, &config, DT), None);
    }

    #[test]
    fn test_cohesion_points_to_centroid() {
        let config = SimulationConfig::default();
        let me = Vector2D::new(100.0, 100.0);
        // Centroid 200 units away, beyond the 132 alignment radius.
        let others = [
            neighbor(1, 300.0, 90.0, 1.0, me),
            neighbor(2, 300.0, 110.0, 2.0, me),
        ];
        let intent = flocking_intent(me, 1.0, &others, &config, DT).unwrap();
        assert!(intent.target.abs() < 1e-5);
    }

    #[test]
    fn test_edge_ignored_in_wrap_mode() {
        let config = SimulationConfig::default();
        assert_eq!(edge_intent(Vector2D::new(1.0, 1.0), &config, DT), None);
    }

    #[test]
    fn test_edge_normals_point_inward() {
        let config = SimulationConfig {
            boundary: BoundaryMode::Clamp,
            ..Default::default()
        };
        let cases = [
            (Vector2D::new(10.0, 360.0), 0.0),
            (Vector2D::new(1270.0, 360.0), PI),
            (Vector2D::new(640.0, 10.0), FRAC_PI_2),
            (Vector2D::new(640.0, 710.0), 3.0 * FRAC_PI_2),
        ];
        for (position, expected) in cases {
            let intent = edge_intent(position, &config, DT).unwrap();
            assert!((intent.target - expected).abs() < 1e-5, "{:?}", position);
        }
        assert_eq!(edge_intent(Vector2D::new(640.0, 360.0), &config, DT), None);
    }

    #[test]
    fn test_edge_step_interpolates_with_depth() {
        let config = SimulationConfig {
            boundary: BoundaryMode::Clamp,
            ..Default::default()
        };
        let base = config.turn_rate * DT;
        let max = config.max_turn_rate * DT;
        let halfway = edge_intent(Vector2D::new(21.0, 360.0), &config, DT).unwrap();
        assert!((halfway.step - (base + 0.5 * (max - base))).abs() < 1e-5);
        let at_edge = edge_intent(Vector2D::new(0.0, 360.0), &config, DT).unwrap();
        assert!((at_edge.step - max).abs() < 1e-6);
    }

    #[test]
    fn test_edge_overrides_flocking() {
        let config = SimulationConfig {
            boundary: BoundaryMode::Clamp,
            ..Default::default()
        };
        let me = Vector2D::new(10.0, 360.0);
        let others = [neighbor(1, 5.0, 360.0, 0.0, me)];
        let intent = steer(me, PI, &others, &config, DT).unwrap();
        assert_eq!(intent.target, 0.0);
    }

    #[test]
    fn test_apply_turn_takes_short_way() {
        let intent = TurnIntent {
            target: 0.1,
            step: 0.05,
        };
        let turned = apply_turn(6.2, Some(intent), 0.02);
        assert!((turned - 6.25).abs() < 1e-5);

        let intent = TurnIntent {
            target: 6.2,
            step: 0.05,
        };
        let turned = apply_turn(0.1, Some(intent), 0.02);
        assert!((turned - 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_apply_turn_wraps_into_range() {
        let intent = TurnIntent {
            target: 0.5,
            step: 0.3,
        };
        let turned = apply_turn(6.2, Some(intent), 0.02);
        assert!((0.0..core::f32::consts::TAU).contains(&turned));
        assert!((turned - (6.5 - core::f32::consts::TAU)).abs() < 1e-5);
    }

    #[test]
    fn test_apply_turn_within_epsilon_is_noop() {
        let intent = TurnIntent {
            target: 1.01,
            step: 0.5,
        };
        assert_eq!(apply_turn(1.0, Some(intent), 0.02), 1.0);
        assert_eq!(apply_turn(1.0, None, 0.02), 1.0);
    }

    #[test]
    fn test_steer_from_table() {
        let config = SimulationConfig::default();
        let rows = [
            AgentRow::new(Vector2D::new(400.0, 300.0), 0.0),
            AgentRow::new(Vector2D::new(400.0, 310.0), 0.0),
        ];
        let neighbors = nearest_neighbors(&rows, 0, config.neighbor_radius());
        let intent = steer(rows[0].position, rows[0].heading, &neighbors, &config, DT).unwrap();
        // Neighbor directly below (y down), so turn to face up.
        assert!((intent.target - 3.0 * FRAC_PI_2).abs() < 1e-5);
    }
}
