//! Errors surfaced by the simulation runtime.
//!
//! Construction failures (invalid state graph, invalid schedule) are fatal.
//! Frame failures are limited to service inconsistencies and journal I/O.
use arena_core::{GameError, OracleError, SpawnError};
use state_machine::GraphError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid state graph")]
    Graph(#[from] GraphError),

    #[error("invalid spawn schedule")]
    Schedule(#[from] SpawnError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("simulation requires a world before building")]
    MissingWorld,

    #[error("journal write failed")]
    Journal(#[source] std::io::Error),

    #[error("journal encoding failed")]
    Encode(#[from] serde_json::Error),
}

impl RuntimeError {
    /// Stable code for logs. Core errors keep their own codes.
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::Graph(_) => "RUNTIME_INVALID_GRAPH",
            RuntimeError::Schedule(e) => e.error_code(),
            RuntimeError::Oracle(e) => e.error_code(),
            RuntimeError::MissingWorld => "RUNTIME_MISSING_WORLD",
            RuntimeError::Journal(_) => "RUNTIME_JOURNAL_IO",
            RuntimeError::Encode(_) => "RUNTIME_JOURNAL_ENCODE",
        }
    }
}
