//! Acceptors for local search move acceptance.
//!
//! Acceptors determine whether a move should be accepted based on
//! comparing the resulting score with the previous step's score. Every
//! acceptor accepts a move that does not worsen the score, so a strictly
//! better hard score is always taken regardless of the soft score.

mod hill_climbing;
mod late_acceptance;
mod simulated_annealing;

use std::fmt::Debug;

use rand::rngs::StdRng;
use rosterforge_core::HardSoftScore;

pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;

/// Trait for accepting or rejecting moves in local search.
pub trait Acceptor: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be accepted,
    /// given the previous step's score.
    fn is_accepted(
        &self,
        last_step_score: &HardSoftScore,
        move_score: &HardSoftScore,
        rng: &mut StdRng,
    ) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &HardSoftScore) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}

    /// Called after every step with the score the step left behind.
    fn step_ended(&mut self, _step_score: &HardSoftScore) {}
}

#[cfg(test)]
mod tests;
