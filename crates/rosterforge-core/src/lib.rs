//! RosterForge Core - score, error and domain types for shift rostering
//!
//! This crate provides the fundamental building blocks shared by the
//! scoring engine, the solver and the roster service:
//! - The lexicographic [`HardSoftScore`]
//! - The workspace error type [`RosterForgeError`]
//! - Constraint identification ([`ConstraintRef`], [`ImpactType`])
//! - The roster domain model (employees, availabilities, shifts, schedule)

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

pub use constraint::{ConstraintRef, ImpactType};
pub use domain::{
    Availability, AvailabilityType, Employee, EmployeeSchedule, PublishWindow, RosterId, ScheduleState,
    Shift, SolverStatus,
};
pub use error::{Result, RosterForgeError};
pub use score::{HardSoftScore, ScoreLevel, ScoreParseError};
