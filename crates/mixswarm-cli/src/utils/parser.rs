use mixswarm::core::benchmarks::Benchmark;
use serde::Deserialize;
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown objective '{0}'. Expected one of: sphere, rosenbrock, rastrigin, ackley.")]
    UnknownObjective(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Resolves a benchmark by its name, ignoring case and surrounding whitespace.
pub fn parse_objective(name: &str) -> Result<Benchmark, ParseError> {
    let wanted = name.trim().to_ascii_lowercase();
    Benchmark::ALL
        .into_iter()
        .find(|b| b.to_string() == wanted)
        .ok_or_else(|| ParseError::UnknownObjective(name.to_string()))
}

/// Splits `key=value` at the first `=`.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "value",
            input: input.to_string(),
        });
    }
    Ok((key, value))
}

/// Parses a kebab-case keyword (`"maximize"`, `"resample"`, ...) into a unit enum.
pub fn parse_keyword<'de, T: Deserialize<'de>>(key: &str, value: &'de str) -> Result<T, ParseError> {
    let deserializer: StrDeserializer<'de, ValueError> = value.into_deserializer();
    T::deserialize(deserializer).map_err(|e| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a scalar with [`std::str::FromStr`].
pub fn parse_scalar<T>(key: &str, value: &str) -> Result<T, ParseError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
