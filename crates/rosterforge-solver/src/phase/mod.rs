//! Solver phases.
//!
//! - [`ConstructionPhase`]: staffs every free shift that has no employee yet
//! - [`LocalSearchPhase`]: improves the staffed roster move by move

mod construction;
mod local_search;

use std::fmt::Debug;

use rosterforge_core::Result;

use crate::scope::SolverScope;
use crate::termination::{Termination, TerminationReason};

pub use construction::ConstructionPhase;
pub use local_search::LocalSearchPhase;

/// A phase of the solving process.
///
/// Phases run in sequence and poll `termination` at every step. A phase that
/// stops because a termination fired returns its reason; a phase that ran to
/// completion returns `None`.
pub trait Phase: Send + Debug {
    fn solve(
        &mut self,
        solver_scope: &mut SolverScope,
        termination: &dyn Termination,
    ) -> Result<Option<TerminationReason>>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}
