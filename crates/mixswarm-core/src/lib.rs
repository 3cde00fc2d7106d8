//! # MixSwarm Core Library
//!
//! A particle swarm optimizer for mixed-type decision spaces: continuous, integer,
//! categorical and binary variables can be combined freely in one search space.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep concerns separated,
//! making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SearchSpace`, `Particle`,
//!   `Value`), the bound-enforcement policies that keep positions inside their domains,
//!   and the `Objective` capability the caller supplies.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. It holds the `Swarm` state
//!   machine (initialization, evaluation with best propagation, velocity and position
//!   updates), the run configuration, error types, and progress reporting.
//!
//! - **[`workflows`]: The Public API.** The `Optimizer` driver ties `engine` and `core`
//!   together: bootstrap, iterate to the budget, aggregate statistics, and hand the
//!   incumbent back to the caller.
//!
//! ## Example
//!
//! ```
//! use mixswarm::core::models::space::SearchSpaceBuilder;
//! use mixswarm::core::objective::{Candidate, Direction};
//! use mixswarm::engine::config::{OptimizerConfigBuilder, Propagation};
//! use mixswarm::engine::progress::ProgressReporter;
//! use mixswarm::workflows;
//!
//! let space = SearchSpaceBuilder::new()
//!     .continuous("x", -5.0, 5.0)
//!     .integer("n", 0, 10)
//!     .build()
//!     .unwrap();
//!
//! let objective = |c: &Candidate| {
//!     let x = c.real("x")?;
//!     let n = c.integer("n")? as f64;
//!     Some(x * x + (n - 4.0).powi(2))
//! };
//!
//! let config = OptimizerConfigBuilder::new()
//!     .seed(7)
//!     .swarm_size(10)
//!     .max_iterations(30)
//!     .direction(Direction::Minimize)
//!     .propagation(Propagation::Asynchronous)
//!     .build()
//!     .unwrap();
//!
//! let result = workflows::optimize::run(&space, &objective, &config, &ProgressReporter::new()).unwrap();
//! assert!(result.incumbent.is_some());
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
