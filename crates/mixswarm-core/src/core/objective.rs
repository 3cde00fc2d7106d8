use super::models::level::{Level, Value};
use super::models::space::SearchSpace;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;

/// Whether the optimizer seeks the lowest or the highest fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

impl Direction {
    /// Whether `candidate` is strictly better than `reference`.
    #[inline]
    pub fn is_better(&self, candidate: f64, reference: f64) -> bool {
        match self {
            Direction::Minimize => candidate < reference,
            Direction::Maximize => candidate > reference,
        }
    }

    /// Orders fitness values best-first.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Direction::Minimize => ord,
            Direction::Maximize => ord.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Minimize => f.write_str("minimize"),
            Direction::Maximize => f.write_str("maximize"),
        }
    }
}

/// A position presented to an objective, decoded against its search space.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    space: &'a SearchSpace,
    coordinates: &'a [f64],
}

impl<'a> Candidate<'a> {
    pub fn new(space: &'a SearchSpace, coordinates: &'a [f64]) -> Self {
        Self { space, coordinates }
    }

    pub fn space(&self) -> &'a SearchSpace {
        self.space
    }

    /// Raw encoded coordinates in search-space order.
    pub fn coordinates(&self) -> &'a [f64] {
        self.coordinates
    }

    pub fn get(&self, name: &str) -> Option<Value<'a>> {
        let index = self.space.index_of(name)?;
        self.space.variables()[index].decode(self.coordinates[index])
    }

    pub fn real(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Continuous(x) => Some(x),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn level(&self, name: &str) -> Option<&'a Level> {
        match self.get(name)? {
            Value::Categorical(level) => Some(level),
            _ => None,
        }
    }

    pub fn bit(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Value<'a>)> + 'a {
        let coordinates = self.coordinates;
        self.space
            .variables()
            .iter()
            .zip(coordinates)
            .filter_map(|(v, &c)| v.decode(c).map(|value| (v.name(), value)))
    }
}

/// The scalar function being optimized.
///
/// Returning `None` signals that the candidate is infeasible: the evaluation is counted
/// as failed and the particle keeps its previous fitness. Any closure of the form
/// `Fn(&Candidate) -> Option<f64>` is an objective.
pub trait Objective: Sync {
    fn evaluate(&self, candidate: &Candidate<'_>) -> Option<f64>;
}

impl<F> Objective for F
where
    F: Fn(&Candidate<'_>) -> Option<f64> + Sync,
{
    fn evaluate(&self, candidate: &Candidate<'_>) -> Option<f64> {
        self(candidate)
    }
}
