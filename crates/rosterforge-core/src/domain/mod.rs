//! Roster domain model.
//!
//! Employees and availabilities are immutable problem facts. A [`Shift`] is
//! the only planning entity: its `employee_idx` is the planning variable the
//! solver mutates. [`EmployeeSchedule`] is the aggregate root owning them all.
//!
//! Facts are referenced by index into the schedule's vectors, so an
//! employee is shared by every shift and availability that points at it.

mod employee;
mod schedule;
mod shift;


pub use employee::{Availability, AvailabilityType, Employee};
pub use schedule::{EmployeeSchedule, PublishWindow, ScheduleState};
pub use shift::Shift;

/// Identifier of a roster managed by the solver manager.
pub type RosterId = String;

/// Lifecycle status of a roster's solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SolverStatus {
    /// Not currently solving.
    #[default]
    NotSolving,
    /// Accepted, waiting for its worker to start.
    SolvingScheduled,
    /// Worker is running the search.
    SolvingActive,
}

impl SolverStatus {
    /// Returns the status as a SCREAMING_SNAKE_CASE string for API responses.
    ///
    /// ```
    /// use rosterforge_core::SolverStatus;
    ///
    /// assert_eq!(SolverStatus::NotSolving.as_str(), "NOT_SOLVING");
    /// assert_eq!(SolverStatus::SolvingActive.as_str(), "SOLVING_ACTIVE");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::NotSolving => "NOT_SOLVING",
            SolverStatus::SolvingScheduled => "SOLVING_SCHEDULED",
            SolverStatus::SolvingActive => "SOLVING_ACTIVE",
        }
    }

    /// Returns true while a solve is scheduled or running.
    pub fn is_solving(self) -> bool {
        self != SolverStatus::NotSolving
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
