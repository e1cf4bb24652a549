use core::fmt;

/// What happens when an agent reaches the edge of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Leaving one edge re-enters from the opposite edge.
    #[default]
    Wrap,
    /// Agents are steered away from the edges inside `margin`.
    Clamp,
}

/// Which table neighbor queries read while a frame is being updated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrder {
    /// Queries read a copy of the table taken at frame start.
    #[default]
    Snapshot,
    /// Queries read the live table, so agents later in the iteration see
    /// rows already moved this frame.
    InPlace,
}

/// Configuration for a flock simulation session
///
/// Angular rates are radians per second and get multiplied by `dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub agent_count: usize,
    pub width: f32,
    pub height: f32,
    pub boundary: BoundaryMode,
    pub update_order: UpdateOrder,
    /// Base perception radius, also the agent size.
    pub perception_radius: f32,
    pub separation_factor: f32,
    pub alignment_factor: f32,
    pub neighbor_factor: f32,
    /// Width of the band along each edge where clamp mode steers inward.
    pub margin: f32,
    /// Initial positions are kept this far from the edges when possible.
    pub spawn_inset: f32,
    pub base_speed: f32,
    pub turn_rate: f32,
    pub max_turn_rate: f32,
    /// Differences below this angle (radians) do not turn the agent.
    pub turn_epsilon: f32,
    pub speed_jitter: f32,
    /// Extra speed per missing neighbor slot.
    pub density_gain: f32,
    pub attract_turn_rate: f32,
    pub repel_turn_rate: f32,
    pub repel_radius: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agent_count: 100,
            width: 1280.0,
            height: 720.0,
            boundary: BoundaryMode::Wrap,
            update_order: UpdateOrder::Snapshot,
            perception_radius: 22.0,
            separation_factor: 1.0,
            alignment_factor: 6.0,
            neighbor_factor: 10.0,
            margin: 42.0,
            spawn_inset: 100.0,
            base_speed: 170.0,
            turn_rate: 2.0,
            max_turn_rate: 20.0,
            turn_epsilon: 0.02,
            speed_jitter: 4.0,
            density_gain: 2.0,
            attract_turn_rate: 4.0,
            repel_turn_rate: 4.0,
            repel_radius: 150.0,
        }
    }
}

impl SimulationConfig {
    pub fn separation_radius(&self) -> f32 {
        self.perception_radius * self.separation_factor
    }

    pub fn alignment_radius(&self) -> f32 {
        self.perception_radius * self.alignment_factor
    }

    pub fn neighbor_radius(&self) -> f32 {
        self.perception_radius * self.neighbor_factor
    }

    /// Check every parameter before a session is built from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_count == 0 {
            return Err(ConfigError::NoAgents);
        }
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ConfigError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if !self.perception_radius.is_finite() || self.perception_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.perception_radius));
        }
        let factors_ok = self.separation_factor > 0.0
            && self.separation_factor < self.alignment_factor
            && self.alignment_factor < self.neighbor_factor
            && self.neighbor_factor.is_finite();
        if !factors_ok {
            return Err(ConfigError::InvalidRadiusFactors {
                separation: self.separation_factor,
                alignment: self.alignment_factor,
                neighbor: self.neighbor_factor,
            });
        }

        let non_negative = [
            ("margin", self.margin),
            ("spawn_inset", self.spawn_inset),
            ("base_speed", self.base_speed),
            ("turn_rate", self.turn_rate),
            ("max_turn_rate", self.max_turn_rate),
            ("turn_epsilon", self.turn_epsilon),
            ("speed_jitter", self.speed_jitter),
            ("density_gain", self.density_gain),
            ("attract_turn_rate", self.attract_turn_rate),
            ("repel_turn_rate", self.repel_turn_rate),
            ("repel_radius", self.repel_radius),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        if self.max_turn_rate < self.turn_rate {
            return Err(ConfigError::InvalidParameter {
                name: "max_turn_rate",
                value: self.max_turn_rate,
            });
        }

        Ok(())
    }
}

/// Rejected construction parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NoAgents,
    InvalidCanvas { width: f32, height: f32 },
    InvalidRadius(f32),
    InvalidRadiusFactors {
        separation: f32,
        alignment: f32,
        neighbor: f32,
    },
    InvalidParameter { name: &'static str, value: f32 },
    RowCountMismatch { expected: usize, actual: usize },
    /// Row `index` has a non-finite value or lies outside the canvas.
    InvalidRow { index: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoAgents => write!(f, "agent count must be at least 1"),
            ConfigError::InvalidCanvas { width, height } => write!(
                f,
                "canvas must have positive finite size, got {}x{}",
                width, height
            ),
            ConfigError::InvalidRadius(radius) => write!(
                f,
                "perception radius must be positive and finite, got {}",
                radius
            ),
            ConfigError::InvalidRadiusFactors {
                separation,
                alignment,
                neighbor,
            } => write!(
                f,
                "radius factors must satisfy 0 < separation < alignment < neighbor, got {} / {} / {}",
                separation, alignment, neighbor
            ),
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "invalid value {} for {}", value, name)
            }
            ConfigError::RowCountMismatch { expected, actual } => write!(
                f,
                "expected {} agent rows, got {}",
                expected, actual
            ),
            ConfigError::InvalidRow { index } => write!(
                f,
                "agent row {} must have a finite heading and a position on the canvas",
                index
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
