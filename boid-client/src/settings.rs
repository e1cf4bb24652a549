use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use boid_core::{BoundaryMode, SimulationConfig, UpdateOrder};
use boid_shared::{BoundaryKind, FlockSettings, ReadOrder};

/// Read settings from a JSON file, or fall back to defaults.
pub fn load_settings(path: Option<&Path>) -> Result<FlockSettings> {
    let Some(path) = path else {
        return Ok(FlockSettings::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    log::info!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Command-line values that take precedence over the settings file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub agent_count: Option<usize>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub clamp: bool,
    pub in_place: bool,
    pub perception_radius: Option<f32>,
}

impl Overrides {
    pub fn apply(&self, settings: &mut FlockSettings) {
        if let Some(count) = self.agent_count {
            settings.agent_count = Some(count);
        }
        if let Some(width) = self.width {
            settings.width = Some(width);
        }
        if let Some(height) = self.height {
            settings.height = Some(height);
        }
        if self.clamp {
            settings.boundary = Some(BoundaryKind::Clamp);
        }
        if self.in_place {
            settings.read_order = Some(ReadOrder::InPlace);
        }
        if let Some(radius) = self.perception_radius {
            settings.perception_radius = Some(radius);
        }
    }
}

/// Lay the settings over [`SimulationConfig::default`]; unset fields keep
/// the core defaults.
pub fn to_config(settings: &FlockSettings) -> SimulationConfig {
    let mut config = SimulationConfig::default();

    macro_rules! overlay {
        ($($field:ident),* $(,)?) => {
            $(
                if let Some(value) = settings.$field {
                    config.$field = value;
                }
            )*
        };
    }

    overlay!(
        agent_count,
        width,
        height,
        perception_radius,
        separation_factor,
        alignment_factor,
        neighbor_factor,
        margin,
        spawn_inset,
        base_speed,
        turn_rate,
        max_turn_rate,
        turn_epsilon,
        speed_jitter,
        density_gain,
        attract_turn_rate,
        repel_turn_rate,
        repel_radius,
    );
    if let Some(boundary) = settings.boundary {
        config.boundary = match boundary {
            BoundaryKind::Wrap => BoundaryMode::Wrap,
            BoundaryKind::Clamp => BoundaryMode::Clamp,
        };
    }
    if let Some(order) = settings.read_order {
        config.update_order = match order {
            ReadOrder::Snapshot => UpdateOrder::Snapshot,
            ReadOrder::InPlace => UpdateOrder::InPlace,
        };
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_core_defaults() {
        assert_eq!(
            to_config(&FlockSettings::default()),
            SimulationConfig::default()
        );
    }

    #[test]
    fn test_file_values_overlay_core_defaults() {
        let settings: FlockSettings = serde_json::from_str(
            r#"{"width": 500.0, "read_order": "in_place", "turn_rate": 3.5}"#,
        )
        .unwrap();
        let config = to_config(&settings);
        assert_eq!(config.width, 500.0);
        assert_eq!(config.turn_rate, 3.5);
        assert_eq!(config.update_order, UpdateOrder::InPlace);
        assert_eq!(
            SimulationConfig {
                width: 500.0,
                turn_rate: 3.5,
                update_order: UpdateOrder::InPlace,
                ..SimulationConfig::default()
            },
            config
        );
    }

    #[test]
    fn test_overrides_win() {
        let mut settings = FlockSettings {
            height: Some(720.0),
            width: Some(1000.0),
            ..Default::default()
        };
        let overrides = Overrides {
            agent_count: Some(7),
            width: Some(300.0),
            clamp: true,
            in_place: true,
            ..Default::default()
        };
        overrides.apply(&mut settings);
        let config = to_config(&settings);
        assert_eq!(config.agent_count, 7);
        assert_eq!(config.width, 300.0);
        assert_eq!(config.height, 720.0);
        assert_eq!(config.boundary, BoundaryMode::Clamp);
        assert_eq!(config.update_order, UpdateOrder::InPlace);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_settings(Some(Path::new("/nonexistent/flock.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/flock.json"));
    }

    #[test]
    fn test_no_file_gives_defaults() {
        assert_eq!(load_settings(None).unwrap(), FlockSettings::default());
    }
}
