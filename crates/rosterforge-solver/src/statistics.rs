//! Solver statistics collection and reporting.
//!
//! Tracks move counts, step counts, timing and score progression of one
//! solve. The solver runs on a single worker, so recording takes `&mut self`.

use std::time::Duration;

use rosterforge_core::HardSoftScore;

/// Statistics for a single solver phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStatistics {
    /// Index of this phase (0-based).
    pub phase_index: usize,
    /// Type name of the phase (e.g., "ConstructionHeuristic", "LocalSearch").
    pub phase_type: String,
    pub duration: Duration,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    pub starting_score: Option<HardSoftScore>,
    pub ending_score: Option<HardSoftScore>,
}

impl PhaseStatistics {
    pub fn new(phase_index: usize, phase_type: impl Into<String>) -> Self {
        Self {
            phase_index,
            phase_type: phase_type.into(),
            duration: Duration::ZERO,
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
            starting_score: None,
            ending_score: None,
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

/// Record of a score improvement event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreImprovement {
    /// Time since solving started when improvement occurred.
    pub time_offset: Duration,
    /// Step number when improvement occurred.
    pub step_count: u64,
    /// The new best score.
    pub score: HardSoftScore,
}

/// Complete statistics for a solver run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStatistics {
    pub total_duration: Duration,
    pub total_step_count: u64,
    pub total_moves_evaluated: u64,
    pub total_moves_accepted: u64,
    pub phase_statistics: Vec<PhaseStatistics>,
    /// History of best score improvements, in order.
    pub score_history: Vec<ScoreImprovement>,
}

impl SolverStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the overall acceptance rate.
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_moves_evaluated == 0 {
            0.0
        } else {
            self.total_moves_accepted as f64 / self.total_moves_evaluated as f64
        }
    }

    pub fn phase_count(&self) -> usize {
        self.phase_statistics.len()
    }

    /// Returns the best score achieved (last in history, or None).
    pub fn best_score(&self) -> Option<HardSoftScore> {
        self.score_history.last().map(|s| s.score)
    }

    pub fn improvement_count(&self) -> usize {
        self.score_history.len()
    }

    /// Starts a new phase and returns its index.
    pub fn start_phase(
        &mut self,
        phase_type: impl Into<String>,
        starting_score: HardSoftScore,
    ) -> usize {
        let index = self.phase_statistics.len();
        let mut phase = PhaseStatistics::new(index, phase_type);
        phase.starting_score = Some(starting_score);
        self.phase_statistics.push(phase);
        index
    }

    pub fn end_phase(&mut self, phase_index: usize, duration: Duration, ending_score: HardSoftScore) {
        if let Some(phase) = self.phase_statistics.get_mut(phase_index) {
            phase.duration = duration;
            phase.ending_score = Some(ending_score);
        }
    }

    /// Records an evaluated move against the totals and the current phase.
    pub fn record_move(&mut self, accepted: bool) {
        self.total_moves_evaluated += 1;
        if accepted {
            self.total_moves_accepted += 1;
        }
        if let Some(phase) = self.phase_statistics.last_mut() {
            phase.moves_evaluated += 1;
            if accepted {
                phase.moves_accepted += 1;
            }
        }
    }

    pub fn record_step(&mut self) {
        self.total_step_count += 1;
        if let Some(phase) = self.phase_statistics.last_mut() {
            phase.step_count += 1;
        }
    }

    pub fn record_improvement(&mut self, time_offset: Duration, score: HardSoftScore) {
        self.score_history.push(ScoreImprovement {
            time_offset,
            step_count: self.total_step_count,
            score,
        });
    }
}
