//! Bound-enforcement policies.
//!
//! A policy maps an arbitrary encoded coordinate back into its variable's domain. All
//! policies are stateless and idempotent: enforcing an already conformant value returns
//! it unchanged. Randomness, when a policy needs it, comes from the caller's generator.

use super::models::space::SearchSpace;
use super::models::variable::{Domain, Variable};
use rand::{Rng, RngCore};
use serde::Deserialize;
use std::fmt;

pub trait BoundEnforcer: Send + Sync {
    /// Returns a domain-conformant coordinate for `variable`.
    fn enforce(&self, variable: &Variable, value: f64, rng: &mut dyn RngCore) -> f64;

    /// Enforces every coordinate of a position in place.
    fn enforce_position(&self, space: &SearchSpace, position: &mut [f64], rng: &mut dyn RngCore) {
        for (variable, coordinate) in space.variables().iter().zip(position.iter_mut()) {
            *coordinate = self.enforce(variable, *coordinate, rng);
        }
    }
}

/// Clamps numeric coordinates to the nearest bound; resamples invalid
/// categorical and binary coordinates uniformly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clamp;

impl BoundEnforcer for Clamp {
    fn enforce(&self, variable: &Variable, value: f64, rng: &mut dyn RngCore) -> f64 {
        match variable.domain() {
            Domain::Continuous { lower, upper } => clamp(value, *lower, *upper),
            Domain::Integer { lower, upper } => {
                clamp(value, *lower as f64, *upper as f64).trunc()
            }
            Domain::Categorical { .. } | Domain::Binary => enforce_discrete(variable, value, rng),
        }
    }
}

/// Replaces out-of-range numeric coordinates with a uniform draw from the domain;
/// categorical and binary coordinates are handled as in [`Clamp`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Resample;

impl BoundEnforcer for Resample {
    fn enforce(&self, variable: &Variable, value: f64, rng: &mut dyn RngCore) -> f64 {
        match variable.domain() {
            Domain::Continuous { lower, upper } => {
                if (*lower..=*upper).contains(&value) {
                    value
                } else {
                    rng.gen_range(*lower..=*upper)
                }
            }
            Domain::Integer { lower, upper } => {
                if (*lower as f64..=*upper as f64).contains(&value) {
                    value.trunc()
                } else {
                    rng.gen_range(*lower..=*upper) as f64
                }
            }
            Domain::Categorical { .. } | Domain::Binary => enforce_discrete(variable, value, rng),
        }
    }
}

fn clamp(value: f64, lower: f64, upper: f64) -> f64 {
    if value > upper {
        upper
    } else if value >= lower {
        value
    } else {
        // Below the lower bound, or NaN.
        lower
    }
}

fn enforce_discrete(variable: &Variable, value: f64, rng: &mut dyn RngCore) -> f64 {
    if variable.contains(value) {
        return value;
    }
    match variable.domain() {
        Domain::Categorical { levels } => rng.gen_range(0..levels.len()) as f64,
        _ => rng.gen_range(0..=1_u8) as f64,
    }
}

/// Which bound-enforcement policy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundHandling {
    #[default]
    Clamp,
    Resample,
}

impl BoundHandling {
    pub fn enforcer(&self) -> Box<dyn BoundEnforcer> {
        match self {
            BoundHandling::Clamp => Box::new(Clamp),
            BoundHandling::Resample => Box::new(Resample),
        }
    }
}

impl fmt::Display for BoundHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundHandling::Clamp => f.write_str("clamp"),
            BoundHandling::Resample => f.write_str("resample"),
        }
    }
}
