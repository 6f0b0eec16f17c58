//! Best score termination.

use rosterforge_core::HardSoftScore;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates once the best roster has every free shift assigned and a score
/// of at least `target`.
#[derive(Debug, Clone)]
pub struct BestScoreTermination {
    target: HardSoftScore,
}

impl BestScoreTermination {
    pub fn new(target: HardSoftScore) -> Self {
        Self { target }
    }
}

impl Termination for BestScoreTermination {
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
        (solver_scope.is_best_initialized()
            && solver_scope
                .best_score()
                .is_some_and(|best| best >= self.target))
        .then_some(TerminationReason::BestScoreReached)
    }
}
