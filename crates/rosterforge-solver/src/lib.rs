//! RosterForge Solver Engine
//!
//! This crate provides the optimizer that drives a roster towards a better
//! score, and the lifecycle that runs it in the background:
//! - Acceptors (hill climbing, late acceptance, simulated annealing)
//! - Termination conditions
//! - Change and swap moves over non-pinned shifts
//! - Construction heuristic and local search phases
//! - The [`Solver`] state machine and its [`SolveOutcome`]
//! - The per-roster [`SolverManager`]

pub mod acceptor;
pub mod builder;
pub mod manager;
pub mod moves;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod statistics;
pub mod termination;

pub use acceptor::{
    Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor, SimulatedAnnealingAcceptor,
};
pub use builder::{AcceptorBuilder, TerminationBuilder};
pub use manager::SolverManager;
pub use moves::{MoveSelector, RosterMove};
pub use phase::{ConstructionPhase, LocalSearchPhase, Phase};
pub use scope::{BestSolutionListener, SolverScope};
pub use solver::{SolveOutcome, Solver, SolverPhase};
pub use statistics::{PhaseStatistics, ScoreImprovement, SolverStatistics};
pub use termination::{Termination, TerminationReason};
