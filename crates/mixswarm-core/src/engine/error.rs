use super::config::ConfigError;
use crate::core::models::space::SpaceError;
use thiserror::Error;

/// Errors raised by the swarm state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwarmError {
    #[error(
        "Velocity update requested before every particle has a defined personal and informant best"
    )]
    UninitializedBestReference,

    #[error("Operation '{operation}' is not allowed while the swarm is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },

    #[error("Cannot initialise a swarm with zero particles")]
    EmptySwarm,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid search space: {source}")]
    SearchSpace {
        #[from]
        source: SpaceError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Swarm error: {source}")]
    Swarm {
        #[from]
        source: SwarmError,
    },

    #[error("Optimization phase '{phase}' failed: {reason}")]
    PhaseFailed { phase: &'static str, reason: String },
}
