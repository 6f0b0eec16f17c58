//! Hill climbing acceptor.

use rand::rngs::StdRng;
use rosterforge_core::HardSoftScore;

use super::Acceptor;

/// Accepts moves that do not worsen the score.
///
/// Equal moves are accepted so the search can walk across plateaus.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Acceptor for HillClimbingAcceptor {
    fn is_accepted(
        &self,
        last_step_score: &HardSoftScore,
        move_score: &HardSoftScore,
        _rng: &mut StdRng,
    ) -> bool {
        move_score >= last_step_score
    }
}
