//! The solver state machine for one solve attempt.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rosterforge_config::SolverConfig;
use rosterforge_core::{EmployeeSchedule, HardSoftScore, Result};
use rosterforge_scoring::{ConstraintSet, ScoreDirector};
use tracing::info;

use crate::builder::{AcceptorBuilder, TerminationBuilder};
use crate::phase::{ConstructionPhase, LocalSearchPhase, Phase};
use crate::scope::{BestSolutionListener, SolverScope};
use crate::statistics::SolverStatistics;
use crate::termination::TerminationReason;

/// Where a solve attempt is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverPhase {
    /// Building indices and staffing unassigned free shifts.
    #[default]
    Initializing,
    Searching,
    Terminated,
}

/// Result of a finished solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// The best roster found, with its score set.
    pub solution: EmployeeSchedule,
    pub score: HardSoftScore,
    pub termination_reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl SolveOutcome {
    /// True if the solve stopped because of a cancellation request.
    pub fn was_cancelled(&self) -> bool {
        self.termination_reason == TerminationReason::Cancelled
    }
}

/// Runs construction then local search on a roster.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use rosterforge_config::SolverConfig;
/// use rosterforge_core::{Employee, EmployeeSchedule, ScheduleState, Shift};
/// use rosterforge_solver::Solver;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let state = ScheduleState::new(7, 14, day, day - chrono::Duration::days(7));
/// let shift = Shift::new(
///     1,
///     day.and_hms_opt(6, 0, 0).unwrap(),
///     day.and_hms_opt(14, 0, 0).unwrap(),
///     "Ambulatory care",
///     ["Nurse"],
/// );
/// let roster = EmployeeSchedule::new(
///     state,
///     vec![Employee::new("Amy Cole", ["Nurse"])],
///     Vec::new(),
///     vec![shift],
/// );
///
/// let config = SolverConfig::default().with_time_limit(Duration::from_millis(200));
/// let outcome = Solver::new(config).solve(roster).unwrap();
/// assert!(outcome.score.is_feasible());
/// assert_eq!(outcome.solution.shifts[0].employee_idx, Some(0));
/// ```
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
    phase: SolverPhase,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            solving: Arc::new(AtomicBool::new(false)),
            phase: SolverPhase::default(),
        }
    }

    /// Uses an externally owned cancellation flag.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = flag;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Handle for cancelling the solve from another thread.
    pub fn terminate_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.terminate_early_flag)
    }

    /// Requests early termination. Returns false if no solve is running.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> SolverPhase {
        self.phase
    }

    pub fn solve(&mut self, schedule: EmployeeSchedule) -> Result<SolveOutcome> {
        self.run(schedule, None)
    }

    /// Solves, calling `listener` with every new best roster.
    pub fn solve_with_listener(
        &mut self,
        schedule: EmployeeSchedule,
        listener: BestSolutionListener,
    ) -> Result<SolveOutcome> {
        self.run(schedule, Some(listener))
    }

    fn run(
        &mut self,
        schedule: EmployeeSchedule,
        listener: Option<BestSolutionListener>,
    ) -> Result<SolveOutcome> {
        self.solving.store(true, Ordering::SeqCst);
        self.phase = SolverPhase::Initializing;
        let result = self.run_phases(schedule, listener);
        self.phase = SolverPhase::Terminated;
        self.solving.store(false, Ordering::SeqCst);
        result
    }

    fn run_phases(
        &mut self,
        schedule: EmployeeSchedule,
        listener: Option<BestSolutionListener>,
    ) -> Result<SolveOutcome> {
        let free_shift_count = schedule.free_shift_count();
        info!(
            event = "solve_start",
            shift_count = schedule.shifts.len(),
            free_shift_count,
            employee_count = schedule.employees.len(),
            availability_count = schedule.availabilities.len(),
            environment_mode = ?self.config.environment_mode,
        );

        let constraints =
            ConstraintSet::for_policy(self.config.score_director.penalize_unassigned);
        let director = ScoreDirector::new(schedule, constraints)?;
        let termination =
            TerminationBuilder::build(&self.config, Arc::clone(&self.terminate_early_flag))?;

        let mut scope = match self.config.effective_seed() {
            Some(seed) => SolverScope::with_seed(director, seed),
            None => SolverScope::new(director),
        };
        if let Some(listener) = listener {
            scope = scope.with_best_listener(listener);
        }
        scope.start_solving();
        scope.update_best_solution();

        let asserted = self.config.environment_mode.is_asserted();
        let reason = if free_shift_count == 0 {
            TerminationReason::NothingToSolve
        } else {
            let mut construction =
                ConstructionPhase::new(self.config.construction_heuristic.construction_heuristic_type)
                    .with_score_assertions(asserted);
            match construction.solve(&mut scope, &termination)? {
                Some(reason) => reason,
                None => {
                    self.phase = SolverPhase::Searching;
                    let acceptor = AcceptorBuilder::build(&self.config.local_search.acceptor);
                    let mut local_search = LocalSearchPhase::new(
                        acceptor,
                        self.config.local_search.move_selector.swap_probability,
                    )
                    .with_score_assertions(asserted);
                    local_search
                        .solve(&mut scope, &termination)?
                        .unwrap_or(TerminationReason::NothingToSolve)
                }
            }
        };

        let (solution, statistics) = scope.take_best_solution()?;
        let score = solution.score.unwrap_or(HardSoftScore::ZERO);
        info!(
            event = "solve_end",
            score = %score,
            feasible = score.is_feasible(),
            reason = %reason,
            steps = statistics.total_step_count,
            moves_evaluated = statistics.total_moves_evaluated,
            duration_ms = statistics.total_duration.as_millis() as u64,
        );

        Ok(SolveOutcome {
            solution,
            score,
            termination_reason: reason,
            statistics,
        })
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
