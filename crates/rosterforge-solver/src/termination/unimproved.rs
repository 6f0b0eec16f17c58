//! Unimproved time termination.

use std::time::Duration;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates when no new best score was found for a period of time.
#[derive(Debug, Clone)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for UnimprovedTimeTermination {
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
        solver_scope
            .time_since_last_improvement()
            .is_some_and(|e| e >= self.limit)
            .then_some(TerminationReason::Unimproved)
    }
}
