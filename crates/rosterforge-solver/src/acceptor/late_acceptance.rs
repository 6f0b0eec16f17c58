//! Late acceptance acceptor.

use rand::rngs::StdRng;
use rosterforge_core::HardSoftScore;

use super::Acceptor;

/// Late acceptance acceptor - accepts moves that improve on a historical score.
///
/// Maintains a circular buffer of recent step scores and accepts moves that
/// are at least as good as the current score or the score from
/// `late_acceptance_size` steps ago.
///
/// # Example
///
/// ```
/// use rosterforge_solver::LateAcceptanceAcceptor;
///
/// let acceptor = LateAcceptanceAcceptor::new(400);
/// assert_eq!(acceptor.late_acceptance_size(), 400);
/// ```
#[derive(Debug, Clone)]
pub struct LateAcceptanceAcceptor {
    late_acceptance_size: usize,
    score_history: Vec<Option<HardSoftScore>>,
    current_index: usize,
}

impl LateAcceptanceAcceptor {
    /// Creates a new late acceptance acceptor keeping `late_acceptance_size`
    /// historical scores. A size of 0 is treated as 1.
    pub fn new(late_acceptance_size: usize) -> Self {
        let size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size: size,
            score_history: vec![None; size],
            current_index: 0,
        }
    }

    pub fn late_acceptance_size(&self) -> usize {
        self.late_acceptance_size
    }
}

impl Default for LateAcceptanceAcceptor {
    fn default() -> Self {
        Self::new(400)
    }
}

impl Acceptor for LateAcceptanceAcceptor {
    fn is_accepted(
        &self,
        last_step_score: &HardSoftScore,
        move_score: &HardSoftScore,
        _rng: &mut StdRng,
    ) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &HardSoftScore) {
        for slot in &mut self.score_history {
            *slot = Some(*initial_score);
        }
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &HardSoftScore) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}
