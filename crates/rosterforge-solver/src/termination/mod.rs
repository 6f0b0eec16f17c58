//! Termination conditions for the solver.
//!
//! Terminations are polled at every step boundary of both phases, so a
//! cancellation or an expired budget takes effect after at most one move
//! evaluation.

mod best_score;
mod composite;
mod external;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use crate::scope::SolverScope;

pub use best_score::BestScoreTermination;
pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedTimeTermination;

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The time budget elapsed.
    TimeSpent,
    /// An external cancellation was requested.
    Cancelled,
    /// The best score reached the configured limit.
    BestScoreReached,
    StepCountReached,
    /// No new best score within the unimproved time limit.
    Unimproved,
    /// There was nothing left for the search to change.
    NothingToSolve,
}

impl TerminationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::TimeSpent => "time_spent",
            TerminationReason::Cancelled => "cancelled",
            TerminationReason::BestScoreReached => "best_score_reached",
            TerminationReason::StepCountReached => "step_count_reached",
            TerminationReason::Unimproved => "unimproved",
            TerminationReason::NothingToSolve => "nothing_to_solve",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for determining when to stop solving.
pub trait Termination: Send + Debug {
    /// Returns the reason to stop, or `None` to keep going.
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason>;

    /// Returns true if solving should terminate.
    fn is_terminated(&self, solver_scope: &SolverScope) -> bool {
        self.check(solver_scope).is_some()
    }
}
