//! Service access errors.
//!
//! Raised when a service has no record of an agent it should hold, or refuses
//! to place one.

use glam::Vec3;

use crate::entity::EntityId;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// The navigation service has no pose for the agent.
    #[error("no pose for agent {0}")]
    PoseUnavailable(EntityId),

    /// The navigation service refused to place the agent.
    #[error("agent {agent} cannot be placed at {position:?}")]
    PlacementRejected { agent: EntityId, position: Vec3 },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            PoseUnavailable(_) => ErrorSeverity::Internal,
            PlacementRejected { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            PoseUnavailable(_) => "ORACLE_POSE_UNAVAILABLE",
            PlacementRejected { .. } => "ORACLE_PLACEMENT_REJECTED",
        }
    }
}
