//! Local search phase.

use std::time::Instant;

use rosterforge_core::{Result, RosterForgeError};
use tracing::{info, trace};

use super::Phase;
use crate::acceptor::Acceptor;
use crate::moves::MoveSelector;
use crate::scope::SolverScope;
use crate::termination::{Termination, TerminationReason};

/// Local search phase that improves an existing roster.
///
/// Every step:
/// 1. Polls the termination
/// 2. Draws one random move over the free shifts
/// 3. Evaluates its delta through the director without applying it
/// 4. Applies it if the acceptor agrees, then updates the best roster
///
/// The phase only ends through a termination, or with
/// [`TerminationReason::NothingToSolve`] when no move can change the roster.
#[derive(Debug)]
pub struct LocalSearchPhase {
    acceptor: Box<dyn Acceptor>,
    swap_probability: f64,
    assert_score: bool,
}

impl LocalSearchPhase {
    pub fn new(acceptor: Box<dyn Acceptor>, swap_probability: f64) -> Self {
        Self {
            acceptor,
            swap_probability,
            assert_score: false,
        }
    }

    /// Checks every applied move against its predicted delta and a full
    /// recalculation.
    pub fn with_score_assertions(mut self, assert_score: bool) -> Self {
        self.assert_score = assert_score;
        self
    }
}

impl Phase for LocalSearchPhase {
    fn solve(
        &mut self,
        solver_scope: &mut SolverScope,
        termination: &dyn Termination,
    ) -> Result<Option<TerminationReason>> {
        let selector = MoveSelector::new(solver_scope.score_director(), self.swap_probability);
        if !selector.has_moves(solver_scope.score_director()) {
            return Ok(Some(TerminationReason::NothingToSolve));
        }

        let phase_start = Instant::now();
        let mut last_step_score = solver_scope.score();
        let phase_index = solver_scope
            .statistics_mut()
            .start_phase(self.phase_type_name(), last_step_score);
        info!(
            event = "phase_start",
            phase = self.phase_type_name(),
            phase_index,
            free_shift_count = selector.free_shift_count(),
        );
        self.acceptor.phase_started(&last_step_score);

        let mut steps: u64 = 0;
        let stopped = loop {
            if let Some(reason) = termination.check(solver_scope) {
                break reason;
            }

            let (director, rng) = solver_scope.director_and_rng();
            let Some(mv) = selector.select(rng, director) else {
                if selector.has_moves(director) {
                    continue;
                }
                break TerminationReason::NothingToSolve;
            };
            let delta = mv.evaluate(director)?;
            let move_score = last_step_score + delta;
            let accepted = self.acceptor.is_accepted(&last_step_score, &move_score, rng);
            trace!(event = "move", ?mv, accepted, score = %move_score);

            if accepted {
                let applied = mv.do_move(director)?;
                if self.assert_score {
                    if applied != delta {
                        return Err(RosterForgeError::ConstraintEvaluation(format!(
                            "score corruption: {mv:?} predicted delta {delta} but applied {applied}"
                        )));
                    }
                    director.assert_score_consistent()?;
                }
                last_step_score = director.score();
            }

            solver_scope.statistics_mut().record_move(accepted);
            if accepted {
                solver_scope.update_best_solution();
            }
            self.acceptor.step_ended(&last_step_score);
            solver_scope.increment_step_count();
            steps += 1;
        };

        self.acceptor.phase_ended();
        let duration = phase_start.elapsed();
        solver_scope
            .statistics_mut()
            .end_phase(phase_index, duration, last_step_score);
        info!(
            event = "phase_end",
            phase = self.phase_type_name(),
            phase_index,
            steps,
            duration_ms = duration.as_millis() as u64,
            score = %last_step_score,
            best_score = ?solver_scope.best_score().map(|s| s.to_string()),
            reason = %stopped,
        );
        Ok(Some(stopped))
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
