//! # Workflows Module
//!
//! High-level entry points that run a complete optimization: swarm construction,
//! bootstrap evaluation, the iteration loop, and result assembly.
//!
//! - **Optimization Workflow** ([`optimize`]) - The [`Optimizer`](optimize::Optimizer)
//!   driver and the [`run`](optimize::run) convenience function.

pub mod optimize;
