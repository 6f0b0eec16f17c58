//! Solver-level scope.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use rosterforge_core::{EmployeeSchedule, HardSoftScore, Result};
use rosterforge_scoring::ScoreDirector;

use crate::statistics::SolverStatistics;

/// Callback receiving every new best roster while solving.
pub type BestSolutionListener = Box<dyn FnMut(EmployeeSchedule) + Send>;

/// State of one solve: the working roster, the best assignment seen so far,
/// the random generator, timing and statistics.
///
/// The best roster is kept as a snapshot of assignments rather than a clone
/// of the whole schedule; the working roster is moved back onto it at the end.
///
/// Rosters are ranked first by how many free shifts are still unassigned
/// (fewer is better), then by score. A roster the search has staffed further
/// is therefore never replaced by an emptier one, even if the emptier one
/// scores better.
pub struct SolverScope {
    score_director: ScoreDirector,
    best_assignments: Vec<Option<usize>>,
    best_score: Option<HardSoftScore>,
    best_uninitialized: usize,
    pinned_unassigned: usize,
    rng: StdRng,
    start_time: Option<Instant>,
    last_improvement: Option<Instant>,
    total_step_count: u64,
    statistics: SolverStatistics,
    best_listener: Option<BestSolutionListener>,
}

impl std::fmt::Debug for SolverScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverScope")
            .field("score", &self.score_director.score())
            .field("best_score", &self.best_score)
            .field("total_step_count", &self.total_step_count)
            .finish()
    }
}

impl SolverScope {
    pub fn new(score_director: ScoreDirector) -> Self {
        Self::with_rng(score_director, StdRng::from_os_rng())
    }

    pub fn with_seed(score_director: ScoreDirector, seed: u64) -> Self {
        Self::with_rng(score_director, StdRng::seed_from_u64(seed))
    }

    fn with_rng(score_director: ScoreDirector, rng: StdRng) -> Self {
        let solution = score_director.working_solution();
        let pinned_unassigned = (0..solution.shifts.len())
            .filter(|&i| solution.is_pinned(i) && solution.shifts[i].employee_idx.is_none())
            .count();
        Self {
            score_director,
            best_assignments: Vec::new(),
            best_score: None,
            best_uninitialized: usize::MAX,
            pinned_unassigned,
            rng,
            start_time: None,
            last_improvement: None,
            total_step_count: 0,
            statistics: SolverStatistics::new(),
            best_listener: None,
        }
    }

    pub fn with_best_listener(mut self, listener: BestSolutionListener) -> Self {
        self.best_listener = Some(listener);
        self
    }

    pub fn start_solving(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.last_improvement = Some(now);
        self.total_step_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn time_since_last_improvement(&self) -> Option<Duration> {
        self.last_improvement.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &ScoreDirector {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut ScoreDirector {
        &mut self.score_director
    }

    /// Splits the scope into the director and the random generator.
    pub fn director_and_rng(&mut self) -> (&mut ScoreDirector, &mut StdRng) {
        (&mut self.score_director, &mut self.rng)
    }

    pub fn working_solution(&self) -> &EmployeeSchedule {
        self.score_director.working_solution()
    }

    /// Score of the working roster.
    pub fn score(&self) -> HardSoftScore {
        self.score_director.score()
    }

    pub fn best_score(&self) -> Option<HardSoftScore> {
        self.best_score
    }

    /// Free shifts of the working roster that have no employee.
    pub fn uninitialized_count(&self) -> usize {
        self.score_director
            .unassigned_count()
            .saturating_sub(self.pinned_unassigned)
    }

    /// True once a best roster with every free shift assigned was recorded.
    pub fn is_best_initialized(&self) -> bool {
        self.best_score.is_some() && self.best_uninitialized == 0
    }

    /// Takes a snapshot of the working roster if it beats the best so far.
    ///
    /// Returns true when a new best was recorded.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.score_director.score();
        let uninitialized = self.uninitialized_count();
        let is_better = match self.best_score {
            None => true,
            Some(best) => {
                uninitialized < self.best_uninitialized
                    || (uninitialized == self.best_uninitialized && current_score > best)
            }
        };
        if !is_better {
            return false;
        }

        self.best_assignments = self.score_director.assignments();
        self.best_score = Some(current_score);
        self.best_uninitialized = uninitialized;
        self.last_improvement = Some(Instant::now());
        let offset = self.elapsed().unwrap_or_default();
        self.statistics.record_improvement(offset, current_score);

        debug!(
            event = "new_best",
            score = %current_score,
            uninitialized,
            step = self.total_step_count,
        );

        if let Some(listener) = self.best_listener.as_mut() {
            let mut snapshot = self.score_director.working_solution().clone();
            snapshot.score = Some(current_score);
            listener(snapshot);
        }
        true
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.statistics.record_step();
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut SolverStatistics {
        &mut self.statistics
    }

    /// Moves the working roster back to the best snapshot and releases it.
    pub fn take_best_solution(mut self) -> Result<(EmployeeSchedule, SolverStatistics)> {
        if !self.best_assignments.is_empty() {
            self.score_director
                .restore_assignments(&self.best_assignments)?;
        }
        let mut statistics = self.statistics;
        statistics.total_duration = self.start_time.map(|t| t.elapsed()).unwrap_or_default();
        Ok((self.score_director.into_solution(), statistics))
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
