//! Spawn schedule and placement errors.

use crate::agent::EnemyKind;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error("spawn band {index} is invalid: {reason}")]
    InvalidBand { index: usize, reason: &'static str },

    #[error("spawn band {index} starts before the previous band ends")]
    BandsOverlap { index: usize },

    #[error("schedule has no bands")]
    EmptySchedule,

    #[error("no navigable position found for {kind}")]
    NoSurface { kind: EnemyKind },
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidBand { .. } | Self::BandsOverlap { .. } | Self::EmptySchedule => {
                ErrorSeverity::Validation
            }
            Self::NoSurface { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidBand { .. } => "SPAWN_INVALID_BAND",
            Self::BandsOverlap { .. } => "SPAWN_BANDS_OVERLAP",
            Self::EmptySchedule => "SPAWN_EMPTY_SCHEDULE",
            Self::NoSurface { .. } => "SPAWN_NO_SURFACE",
        }
    }
}
