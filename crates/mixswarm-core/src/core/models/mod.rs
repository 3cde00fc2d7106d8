//! # Core Models Module
//!
//! Data structures describing what is being searched and who is searching it.
//!
//! ## Key Components
//!
//! - [`level`] - Categorical levels and decoded variable values
//! - [`variable`] - Variable descriptors, domains, and raw declarations from configuration
//! - [`space`] - The ordered, immutable search space and its builder
//! - [`particle`] - Particle state: position, velocity, fitness and best positions
//!
//! ## Position Encoding
//!
//! Positions and velocities are plain `f64` vectors aligned with the search-space order.
//! Continuous coordinates hold the value itself, integer coordinates an integral value,
//! categorical coordinates the index of the level within the declared set, and binary
//! coordinates `0.0` or `1.0`. Decoding back to [`level::Value`]s happens in
//! [`space::SearchSpace::decode`].

pub mod level;
pub mod particle;
pub mod space;
pub mod variable;
