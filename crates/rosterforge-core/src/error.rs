//! Error types for RosterForge

use thiserror::Error;

/// Main error type for RosterForge operations.
///
/// Lifecycle conflicts (`AlreadySolving`, `SolveInProgress`) are recoverable
/// and surface directly to the caller. Contract violations (`InvalidMove`,
/// `ConstraintEvaluation`) are fatal to the solve that raised them.
#[derive(Debug, Error)]
pub enum RosterForgeError {
    /// A move tried to break a structural invariant, e.g. reassigning a pinned shift.
    #[error("Invalid move on shift {shift_id}: {reason}")]
    InvalidMove { shift_id: i64, reason: String },

    /// A solve for this roster is already scheduled or running.
    #[error("Roster {0} is already being solved")]
    AlreadySolving(String),

    /// The roster cannot be published while a solve is in flight.
    #[error("Cannot publish roster {0} while solving is in progress")]
    SolveInProgress(String),

    /// A constraint could not be evaluated because the roster data is malformed.
    #[error("Constraint evaluation failed: {0}")]
    ConstraintEvaluation(String),

    /// No roster is registered under this id.
    #[error("There is no roster with id {0}")]
    UnknownRoster(String),

    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RosterForgeError {
    /// Returns true for user-facing lifecycle conflicts that leave all state untouched.
    pub fn is_lifecycle_conflict(&self) -> bool {
        matches!(
            self,
            RosterForgeError::AlreadySolving(_) | RosterForgeError::SolveInProgress(_)
        )
    }
}

/// Result type alias for RosterForge operations
pub type Result<T> = std::result::Result<T, RosterForgeError>;
