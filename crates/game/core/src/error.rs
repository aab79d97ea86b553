//! Common error infrastructure for arena-core.
//!
//! Domain errors (`WeaponError`, `SpawnError`, `OracleError`) live next to the
//! operations they guard and share the [`GameError`] classification so the
//! runtime can log and route them uniformly.
//!
//! Query misses (a ray that hits nothing, a sample that finds no surface) are
//! never errors; they are `None`.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the frame goes on; the request may succeed later
/// - **Validation**: rejected input that will not succeed without changes
/// - **Internal**: a service and the simulation disagree; a bug
/// - **Fatal**: the simulation cannot be built or continued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: magazine empty, spawn point rejected.
    Recoverable,

    /// Examples: weapon not carried, malformed spawn band.
    Validation,

    /// Examples: agent without a pose.
    Internal,

    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all arena-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{WeaponError, WeaponKind};
    use crate::entity::EntityId;
    use crate::env::OracleError;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }

    #[test]
    fn domain_errors_classify_themselves() {
        let empty = WeaponError::EmptyMagazine(WeaponKind::Shotgun);
        assert!(empty.severity().is_recoverable());

        let missing = OracleError::PoseUnavailable(EntityId(4));
        assert!(missing.severity().is_internal());
        assert_eq!(missing.error_code(), "ORACLE_POSE_UNAVAILABLE");
    }
}
