//! # Core Module
//!
//! The foundation layer of MixSwarm: stateless data models and pure policies that the
//! stateful engine builds upon.
//!
//! ## Key Components
//!
//! - [`models`] - Search-space description (variables, domains, levels) and particle state
//! - [`bounds`] - Bound-enforcement policies mapping candidate values back into their domain
//! - [`objective`] - The objective capability, optimization direction, and the
//!   decoded [`objective::Candidate`] view objectives are evaluated on
//! - [`benchmarks`] - Standard test functions usable as objectives

pub mod benchmarks;
pub mod bounds;
pub mod models;
pub mod objective;
