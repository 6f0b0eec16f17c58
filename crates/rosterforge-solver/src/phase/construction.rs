//! Construction heuristic phase.

use std::time::Instant;

use rosterforge_config::ConstructionHeuristicType;
use rosterforge_core::{HardSoftScore, Result};
use rosterforge_scoring::ScoreDirector;
use tracing::{debug, info};

use super::Phase;
use crate::scope::SolverScope;
use crate::termination::{Termination, TerminationReason};

/// Assigns an employee to every free, unassigned shift in start order.
///
/// Each shift is one step: all employees are evaluated with the director's
/// delta and the forager picks one.
/// - `BestFit` takes the employee with the best delta, lowest index on ties.
/// - `FirstFit` takes the first employee whose delta adds no hard penalty,
///   falling back to the best one.
/// - `None` leaves the roster as it is.
#[derive(Debug, Clone, Copy)]
pub struct ConstructionPhase {
    kind: ConstructionHeuristicType,
    assert_score: bool,
}

impl ConstructionPhase {
    pub fn new(kind: ConstructionHeuristicType) -> Self {
        Self {
            kind,
            assert_score: false,
        }
    }

    /// Recalculates the score from scratch after every step.
    pub fn with_score_assertions(mut self, assert_score: bool) -> Self {
        self.assert_score = assert_score;
        self
    }

    pub fn kind(&self) -> ConstructionHeuristicType {
        self.kind
    }

    /// Free shifts without an employee, ordered by start then index.
    fn placement_queue(director: &ScoreDirector) -> Vec<usize> {
        let solution = director.working_solution();
        let mut queue: Vec<usize> = solution
            .free_shift_indices()
            .into_iter()
            .filter(|&i| solution.shifts[i].employee_idx.is_none())
            .collect();
        queue.sort_by_key(|&i| (solution.shifts[i].start, i));
        queue
    }

    /// Picks the employee for one shift. Returns the choice and how many
    /// candidates were evaluated.
    fn pick(&self, director: &ScoreDirector, shift_idx: usize) -> Option<(usize, usize)> {
        let mut best: Option<(usize, HardSoftScore)> = None;
        let mut evaluated = 0;
        for employee in 0..director.employee_count() {
            let delta = director.delta_for_change(shift_idx, Some(employee));
            evaluated += 1;
            if self.kind == ConstructionHeuristicType::FirstFit && delta.hard() >= 0 {
                return Some((employee, evaluated));
            }
            if best.map_or(true, |(_, score)| delta > score) {
                best = Some((employee, delta));
            }
        }
        best.map(|(employee, _)| (employee, evaluated))
    }
}

impl Phase for ConstructionPhase {
    fn solve(
        &mut self,
        solver_scope: &mut SolverScope,
        termination: &dyn Termination,
    ) -> Result<Option<TerminationReason>> {
        if self.kind == ConstructionHeuristicType::None {
            return Ok(None);
        }

        let queue = Self::placement_queue(solver_scope.score_director());
        let phase_start = Instant::now();
        let starting_score = solver_scope.score();
        let phase_index = solver_scope
            .statistics_mut()
            .start_phase(self.phase_type_name(), starting_score);

        info!(
            event = "phase_start",
            phase = self.phase_type_name(),
            phase_index,
            entity_count = queue.len(),
        );

        let mut stopped = None;
        let mut steps: u64 = 0;
        for shift_idx in queue {
            if let Some(reason) = termination.check(solver_scope) {
                stopped = Some(reason);
                break;
            }
            let Some((employee, evaluated)) = self.pick(solver_scope.score_director(), shift_idx)
            else {
                break;
            };
            for i in 0..evaluated {
                solver_scope.statistics_mut().record_move(i + 1 == evaluated);
            }
            solver_scope
                .score_director_mut()
                .do_change(shift_idx, Some(employee))?;
            if self.assert_score {
                solver_scope.score_director().assert_score_consistent()?;
            }
            let step = solver_scope.increment_step_count();
            steps += 1;
            debug!(
                event = "step",
                step,
                shift_idx,
                employee,
                score = %solver_scope.score(),
            );
            solver_scope.update_best_solution();
        }

        let duration = phase_start.elapsed();
        let score = solver_scope.score();
        solver_scope
            .statistics_mut()
            .end_phase(phase_index, duration, score);
        info!(
            event = "phase_end",
            phase = self.phase_type_name(),
            phase_index,
            steps,
            duration_ms = duration.as_millis() as u64,
            score = %score,
        );
        Ok(stopped)
    }

    fn phase_type_name(&self) -> &'static str {
        "ConstructionHeuristic"
    }
}
