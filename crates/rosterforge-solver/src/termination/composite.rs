//! Composite termination.

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates when any child terminates; the first child to fire names the reason.
#[derive(Debug, Default)]
pub struct OrTermination {
    terminations: Vec<Box<dyn Termination>>,
}

impl OrTermination {
    pub fn new(terminations: Vec<Box<dyn Termination>>) -> Self {
        Self { terminations }
    }

    pub fn push(&mut self, termination: impl Termination + 'static) {
        self.terminations.push(Box::new(termination));
    }

    pub fn len(&self) -> usize {
        self.terminations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminations.is_empty()
    }
}

impl Termination for OrTermination {
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
        self.terminations.iter().find_map(|t| t.check(solver_scope))
    }
}
