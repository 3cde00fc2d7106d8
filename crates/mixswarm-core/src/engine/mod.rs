//! # Engine Module
//!
//! Stateful optimization machinery: the particle swarm, its configuration, and the
//! bookkeeping that a run produces.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run parameters and their validating builder
//! - **Swarm** ([`swarm`]) - Particle population, evaluation passes with synchronous or
//!   asynchronous best propagation, and the velocity/position recurrence
//! - **Sampling** ([`sampling`]) - Random initial positions and velocities
//! - **State Tracking** ([`state`]) - Incumbent snapshots, per-pass and per-run statistics
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod progress;
pub mod sampling;
pub mod state;
pub mod swarm;
