use crate::core::bounds::BoundHandling;
use crate::core::objective::Direction;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_INERTIA: f64 = 0.7;
pub const DEFAULT_LOCAL_ACCELERATION: f64 = 1.5;
pub const DEFAULT_GLOBAL_ACCELERATION: f64 = 1.5;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// When the swarm-wide best is published to the particles during an evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Propagation {
    /// Each particle sees the best found so far in the current pass, immediately.
    #[default]
    Synchronous,
    /// The best of the whole pass is broadcast to every particle once the pass ends.
    Asynchronous,
}

impl fmt::Display for Propagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Propagation::Synchronous => f.write_str("synchronous"),
            Propagation::Asynchronous => f.write_str("asynchronous"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityCoefficients {
    pub inertia: f64,
    pub local_acceleration: f64,
    pub global_acceleration: f64,
}

impl Default for VelocityCoefficients {
    fn default() -> Self {
        Self {
            inertia: DEFAULT_INERTIA,
            local_acceleration: DEFAULT_LOCAL_ACCELERATION,
            global_acceleration: DEFAULT_GLOBAL_ACCELERATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Seed of the run's random source; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub swarm_size: usize,
    pub max_iterations: usize,
    pub direction: Direction,
    pub propagation: Propagation,
    pub coefficients: VelocityCoefficients,
    pub bound_handling: BoundHandling,
}

#[derive(Default)]
pub struct OptimizerConfigBuilder {
    seed: Option<u64>,
    swarm_size: Option<usize>,
    max_iterations: Option<usize>,
    direction: Option<Direction>,
    propagation: Option<Propagation>,
    inertia: Option<f64>,
    local_acceleration: Option<f64>,
    global_acceleration: Option<f64>,
    bound_handling: Option<BoundHandling>,
}

impl OptimizerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn swarm_size(mut self, size: usize) -> Self {
        self.swarm_size = Some(size);
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
    pub fn propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = Some(propagation);
        self
    }
    pub fn inertia(mut self, inertia: f64) -> Self {
        self.inertia = Some(inertia);
        self
    }
    pub fn local_acceleration(mut self, acceleration: f64) -> Self {
        self.local_acceleration = Some(acceleration);
        self
    }
    pub fn global_acceleration(mut self, acceleration: f64) -> Self {
        self.global_acceleration = Some(acceleration);
        self
    }
    pub fn bound_handling(mut self, handling: BoundHandling) -> Self {
        self.bound_handling = Some(handling);
        self
    }

    pub fn build(self) -> Result<OptimizerConfig, ConfigError> {
        let swarm_size = self
            .swarm_size
            .ok_or(ConfigError::MissingParameter("swarm_size"))?;
        if swarm_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "swarm_size",
                reason: "the swarm must contain at least one particle".to_string(),
            });
        }

        let coefficients = VelocityCoefficients {
            inertia: finite("inertia", self.inertia.unwrap_or(DEFAULT_INERTIA))?,
            local_acceleration: finite(
                "local_acceleration",
                self.local_acceleration
                    .unwrap_or(DEFAULT_LOCAL_ACCELERATION),
            )?,
            global_acceleration: finite(
                "global_acceleration",
                self.global_acceleration
                    .unwrap_or(DEFAULT_GLOBAL_ACCELERATION),
            )?,
        };

        Ok(OptimizerConfig {
            seed: self.seed,
            swarm_size,
            max_iterations: self
                .max_iterations
                .ok_or(ConfigError::MissingParameter("max_iterations"))?,
            direction: self
                .direction
                .ok_or(ConfigError::MissingParameter("direction"))?,
            propagation: self.propagation.unwrap_or_default(),
            coefficients,
            bound_handling: self.bound_handling.unwrap_or_default(),
        })
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("expected a finite number, got {}", value),
        })
    }
}
