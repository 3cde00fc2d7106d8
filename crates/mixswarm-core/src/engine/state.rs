use crate::core::models::level::{Level, Value};
use crate::core::models::particle::{Particle, ParticleId};
use crate::core::models::space::SearchSpace;
use std::fmt;

/// A decoded coordinate, owned so that results outlive the search space.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Continuous(f64),
    Integer(i64),
    Categorical(Level),
    Binary(bool),
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Continuous(x) => write!(f, "{}", x),
            Assignment::Integer(n) => write!(f, "{}", n),
            Assignment::Categorical(level) => write!(f, "{}", level),
            Assignment::Binary(b) => write!(f, "{}", u8::from(*b)),
        }
    }
}

/// The best particle state found during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    pub particle_id: ParticleId,
    pub fitness: f64,
    /// Decoded values in search-space order.
    pub assignment: Vec<(String, Assignment)>,
    /// Encoded coordinates the assignment was decoded from.
    pub coordinates: Vec<f64>,
}

impl Incumbent {
    pub(crate) fn from_particle(space: &SearchSpace, particle: &Particle, fitness: f64) -> Self {
        Self {
            particle_id: particle.id(),
            fitness,
            assignment: decode_assignment(space, particle.position()),
            coordinates: particle.position().to_vec(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Assignment> {
        self.assignment
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }
}

pub(crate) fn decode_assignment(space: &SearchSpace, coordinates: &[f64]) -> Vec<(String, Assignment)> {
    space
        .decode(coordinates)
        .into_iter()
        .map(|(name, value)| {
            let owned = match value {
                Value::Continuous(x) => Assignment::Continuous(x),
                Value::Integer(n) => Assignment::Integer(n),
                Value::Categorical(level) => Assignment::Categorical(level.clone()),
                Value::Binary(b) => Assignment::Binary(b),
            };
            (name.to_string(), owned)
        })
        .collect()
}

/// Counters of one evaluation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStatistics {
    /// Objective invocations attempted, successful or not.
    pub evaluations: usize,
    pub failed_evaluations: usize,
}

impl PassStatistics {
    pub fn all_failed(&self) -> bool {
        self.evaluations > 0 && self.evaluations == self.failed_evaluations
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// Zero for the bootstrap pass.
    pub iteration: usize,
    pub evaluations: usize,
    pub failed_evaluations: usize,
    pub iteration_best_fitness: Option<f64>,
    /// Decoded position of the iteration-best, in search-space order.
    pub iteration_best_assignment: Option<Vec<(String, Assignment)>>,
    pub incumbent_fitness: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub iterations: usize,
    pub evaluations: usize,
    pub failed_evaluations: usize,
    /// Passes in which every evaluation failed.
    pub infeasible_generations: usize,
}

impl RunStatistics {
    pub(crate) fn record(&mut self, pass: &PassStatistics) {
        self.evaluations += pass.evaluations;
        self.failed_evaluations += pass.failed_evaluations;
        if pass.all_failed() {
            self.infeasible_generations += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// `None` when no evaluation ever succeeded.
    pub incumbent: Option<Incumbent>,
    pub statistics: RunStatistics,
    pub history: Vec<IterationRecord>,
}
