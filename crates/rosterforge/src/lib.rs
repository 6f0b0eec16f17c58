//! RosterForge - rolling shift rostering
//!
//! Employees are assigned to shifts under hard rules (skills, overlaps,
//! rest, availability) and soft preferences. Published days are frozen;
//! the draft horizon is optimized in the background and rolled forward on
//! publish.
//!
//! # Example
//!
//! ```rust
//! use rosterforge::prelude::*;
//!
//! let score = HardSoftScore::of(0, -100);
//! assert!(score.is_feasible());
//! assert_eq!(score.to_string(), "0hard/-100soft");
//! ```

pub mod horizon;
pub mod logging;
pub mod service;

pub use rosterforge_core::{
    Availability, AvailabilityType, ConstraintRef, Employee, EmployeeSchedule, HardSoftScore,
    ImpactType, PublishWindow, Result, RosterForgeError, RosterId, ScheduleState, Shift,
    SolverStatus,
};

pub use rosterforge_config::{
    AcceptorConfig, ConfigError, ConstructionHeuristicType, EnvironmentMode, SolverConfig,
};

pub use rosterforge_scoring::{
    Constraint, ConstraintAnalysis, ConstraintMatch, ConstraintSet, ScoreAnalysis, ScoreDirector,
};

pub use rosterforge_solver::{
    SolveOutcome, Solver, SolverManager, SolverStatistics, TerminationReason,
};

pub use horizon::{HorizonGenerator, RepeatingHorizon};
pub use service::RosterService;

pub mod prelude {
    pub use super::{
        Availability, AvailabilityType, Employee, EmployeeSchedule, HardSoftScore, ScheduleState,
        Shift, SolverStatus,
    };
    pub use super::{HorizonGenerator, RosterService, SolverConfig};
    pub use super::{Result, RosterForgeError};
}
