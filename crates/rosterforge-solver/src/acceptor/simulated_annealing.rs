//! Simulated annealing acceptor.

use rand::rngs::StdRng;
use rand::Rng;
use rosterforge_core::HardSoftScore;

use super::Acceptor;

/// Simulated annealing acceptor - accepts worsening moves with a probability
/// of `exp(-delta / temperature)`.
///
/// The delta is measured on the scalar projection of the score (one hard
/// point outweighs a million soft points), so hard worsening is practically
/// never accepted once the temperature has cooled.
///
/// # Example
///
/// ```
/// use rosterforge_solver::SimulatedAnnealingAcceptor;
///
/// let acceptor = SimulatedAnnealingAcceptor::new(1000.0, 0.999);
/// assert_eq!(acceptor.current_temperature(), 1000.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
}

impl SimulatedAnnealingAcceptor {
    /// Creates a new simulated annealing acceptor.
    ///
    /// # Arguments
    /// * `starting_temperature` - Initial temperature (higher = more exploration)
    /// * `decay_rate` - Multiplicative decay per step (e.g., 0.999)
    pub fn new(starting_temperature: f64, decay_rate: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
        }
    }

    pub fn current_temperature(&self) -> f64 {
        self.current_temperature
    }

    /// Probability of accepting a move from `last` to `candidate`.
    pub fn acceptance_probability(&self, last: &HardSoftScore, candidate: &HardSoftScore) -> f64 {
        if candidate >= last {
            return 1.0;
        }
        if self.current_temperature <= 0.0 {
            return 0.0;
        }
        let delta = last.to_scalar() - candidate.to_scalar();
        (-delta / self.current_temperature).exp()
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(1000.0, 0.9999)
    }
}

impl Acceptor for SimulatedAnnealingAcceptor {
    fn is_accepted(
        &self,
        last_step_score: &HardSoftScore,
        move_score: &HardSoftScore,
        rng: &mut StdRng,
    ) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        let probability = self.acceptance_probability(last_step_score, move_score);
        probability > 0.0 && rng.random::<f64>() < probability
    }

    fn phase_started(&mut self, _initial_score: &HardSoftScore) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_score: &HardSoftScore) {
        self.current_temperature *= self.decay_rate;
    }
}
