//! Moves over the shift assignment variable and their random selection.
//!
//! A move is either a change (give one free shift another employee) or a swap
//! (exchange the employees of two free shifts). Pinned shifts are never
//! offered to a move; the director rejects them anyway.

use rand::rngs::StdRng;
use rand::Rng;

use rosterforge_core::{HardSoftScore, Result};
use rosterforge_scoring::ScoreDirector;

/// Attempts the selector makes before reporting that it found nothing.
const SELECTION_ATTEMPTS: usize = 16;

/// A single proposed mutation of the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterMove {
    /// Assigns `employee` to the shift.
    Change { shift_idx: usize, employee: usize },
    /// Exchanges the employees of two shifts.
    Swap { left: usize, right: usize },
}

impl RosterMove {
    /// True if applying the move would change at least one assignment and
    /// touches no pinned shift.
    pub fn is_doable(&self, director: &ScoreDirector) -> bool {
        match *self {
            RosterMove::Change { shift_idx, employee } => {
                !director.is_pinned(shift_idx) && director.assignment(shift_idx) != Some(employee)
            }
            RosterMove::Swap { left, right } => {
                left != right
                    && !director.is_pinned(left)
                    && !director.is_pinned(right)
                    && director.assignment(left) != director.assignment(right)
            }
        }
    }

    /// Score delta the move would cause. The roster is left as it was.
    pub fn evaluate(&self, director: &mut ScoreDirector) -> Result<HardSoftScore> {
        match *self {
            RosterMove::Change { shift_idx, employee } => {
                Ok(director.delta_for_change(shift_idx, Some(employee)))
            }
            RosterMove::Swap { left, right } => {
                let delta = director.do_swap(left, right)?;
                director.do_swap(left, right)?;
                Ok(delta)
            }
        }
    }

    /// Applies the move and returns the score delta.
    pub fn do_move(&self, director: &mut ScoreDirector) -> Result<HardSoftScore> {
        match *self {
            RosterMove::Change { shift_idx, employee } => {
                director.do_change(shift_idx, Some(employee))
            }
            RosterMove::Swap { left, right } => director.do_swap(left, right),
        }
    }
}

/// Picks random moves over the free shifts of a roster.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    free: Vec<usize>,
    employee_count: usize,
    swap_probability: f64,
}

impl MoveSelector {
    pub fn new(director: &ScoreDirector, swap_probability: f64) -> Self {
        Self {
            free: director.working_solution().free_shift_indices(),
            employee_count: director.employee_count(),
            swap_probability: swap_probability.clamp(0.0, 1.0),
        }
    }

    pub fn free_shift_count(&self) -> usize {
        self.free.len()
    }

    /// True if at least one doable move exists.
    ///
    /// With a single employee and every free shift already given to them,
    /// neither changes nor swaps can alter the roster.
    pub fn has_moves(&self, director: &ScoreDirector) -> bool {
        if self.free.is_empty() || self.employee_count == 0 {
            return false;
        }
        self.employee_count > 1 || self.free.iter().any(|&s| director.assignment(s).is_none())
    }

    /// Draws a doable move, or `None` if none turned up.
    pub fn select(&self, rng: &mut StdRng, director: &ScoreDirector) -> Option<RosterMove> {
        if self.free.is_empty() || self.employee_count == 0 {
            return None;
        }
        for _ in 0..SELECTION_ATTEMPTS {
            let shift_idx = self.free[rng.random_range(0..self.free.len())];
            let candidate = if self.free.len() > 1 && rng.random_bool(self.swap_probability) {
                let right = self.free[rng.random_range(0..self.free.len())];
                RosterMove::Swap {
                    left: shift_idx,
                    right,
                }
            } else {
                RosterMove::Change {
                    shift_idx,
                    employee: rng.random_range(0..self.employee_count),
                }
            };
            if candidate.is_doable(director) {
                return Some(candidate);
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod tests;
