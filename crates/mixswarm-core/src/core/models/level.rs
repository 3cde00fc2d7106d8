use serde::{Deserialize, Serialize};
use std::fmt;

/// A permissible value of a categorical variable.
///
/// Levels are compared structurally, so `Integer(1)` and `Real(1.0)` are distinct levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Level {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Level {
    /// Returns the level as a number when it has a numeric interpretation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Level::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Level::Integer(i) => Some(*i as f64),
            Level::Real(r) => Some(*r),
            Level::Text(_) => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Boolean(b) => write!(f, "{}", b),
            Level::Integer(i) => write!(f, "{}", i),
            Level::Real(r) => write!(f, "{}", r),
            Level::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        Level::Text(s.to_string())
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        Level::Text(s)
    }
}

impl From<i64> for Level {
    fn from(i: i64) -> Self {
        Level::Integer(i)
    }
}

impl From<f64> for Level {
    fn from(r: f64) -> Self {
        Level::Real(r)
    }
}

impl From<bool> for Level {
    fn from(b: bool) -> Self {
        Level::Boolean(b)
    }
}

/// A decoded coordinate of a position, as seen by objectives and reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value<'a> {
    Continuous(f64),
    Integer(i64),
    Categorical(&'a Level),
    Binary(bool),
}

impl Value<'_> {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Continuous(x) => Some(*x),
            Value::Integer(i) => Some(*i as f64),
            Value::Categorical(level) => level.as_f64(),
            Value::Binary(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Continuous(x) => write!(f, "{}", x),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Categorical(level) => write!(f, "{}", level),
            Value::Binary(b) => write!(f, "{}", u8::from(*b)),
        }
    }
}
