//! Standard benchmark functions.
//!
//! The plain functions operate on real vectors. [`Benchmark`] wraps them as an
//! [`Objective`] over a mixed search space: continuous and integer values are used as-is,
//! binary values as `0`/`1`, numeric categorical levels by their value, and text levels
//! by their index in the declared set.

use super::objective::{Candidate, Objective};
use serde::Deserialize;
use std::f64::consts::PI;
use std::fmt;

/// Sphere function. Global minimum `f(0, ..., 0) = 0`.
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Rosenbrock function. Global minimum `f(1, ..., 1) = 0`.
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = 1.0 - w[0];
            100.0 * a * a + b * b
        })
        .sum()
}

/// Rastrigin function. Global minimum `f(0, ..., 0) = 0`, with many regularly spaced
/// local minima.
pub fn rastrigin(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Ackley function. Global minimum `f(0, ..., 0) = 0`.
pub fn ackley(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let sum_sq = x.iter().map(|xi| xi * xi).sum::<f64>() / n;
    let sum_cos = x.iter().map(|xi| (2.0 * PI * xi).cos()).sum::<f64>() / n;
    -20.0 * (-0.2 * sum_sq.sqrt()).exp() - sum_cos.exp() + 20.0 + std::f64::consts::E
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Benchmark {
    Sphere,
    Rosenbrock,
    Rastrigin,
    Ackley,
}

impl Benchmark {
    pub const ALL: [Benchmark; 4] = [
        Benchmark::Sphere,
        Benchmark::Rosenbrock,
        Benchmark::Rastrigin,
        Benchmark::Ackley,
    ];

    pub fn function(&self) -> fn(&[f64]) -> f64 {
        match self {
            Benchmark::Sphere => sphere,
            Benchmark::Rosenbrock => rosenbrock,
            Benchmark::Rastrigin => rastrigin,
            Benchmark::Ackley => ackley,
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Benchmark::Sphere => "sphere",
            Benchmark::Rosenbrock => "rosenbrock",
            Benchmark::Rastrigin => "rastrigin",
            Benchmark::Ackley => "ackley",
        };
        f.write_str(name)
    }
}

impl Objective for Benchmark {
    fn evaluate(&self, candidate: &Candidate<'_>) -> Option<f64> {
        let x = candidate
            .space()
            .variables()
            .iter()
            .zip(candidate.coordinates())
            .map(|(variable, &c)| variable.decode(c).map(|value| value.as_f64().unwrap_or(c)))
            .collect::<Option<Vec<f64>>>()?;
        Some(self.function()(&x))
    }
}
