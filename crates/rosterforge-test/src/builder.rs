//! Fluent construction of small rosters.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rosterforge_core::{
    Availability, AvailabilityType, Employee, EmployeeSchedule, ScheduleState, Shift,
};

use crate::time::draft_start;

/// Builds an [`EmployeeSchedule`] shift by shift.
///
/// Shift ids are assigned sequentially from 1. Employees are referenced by
/// name; an unknown name panics.
///
/// ```
/// use rosterforge_test::{at, RosterBuilder};
/// use rosterforge_test::time::draft_day;
///
/// let roster = RosterBuilder::new()
///     .employee("Amy Cole", &["Nurse"])
///     .shift(at(draft_day(0), 6), at(draft_day(0), 14), &["Nurse"])
///     .build();
/// assert_eq!(roster.shifts.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RosterBuilder {
    state: ScheduleState,
    location: String,
    employees: Vec<Employee>,
    availabilities: Vec<Availability>,
    shifts: Vec<Shift>,
}

impl Default for RosterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterBuilder {
    /// Weekly publish, two-week draft, drafting from the fixtures' draft start.
    pub fn new() -> Self {
        let first_draft = draft_start();
        Self {
            state: ScheduleState::new(7, 14, first_draft, first_draft - Duration::days(7)),
            location: "Ambulatory care".to_string(),
            employees: Vec::new(),
            availabilities: Vec::new(),
            shifts: Vec::new(),
        }
    }

    pub fn with_state(mut self, state: ScheduleState) -> Self {
        self.state = state;
        self
    }

    /// Location used for shifts added afterwards.
    pub fn at_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn employee(mut self, name: &str, skills: &[&str]) -> Self {
        self.employees
            .push(Employee::new(name, skills.iter().copied()));
        self
    }

    pub fn availability(mut self, employee: &str, date: NaiveDate, kind: AvailabilityType) -> Self {
        let employee_idx = self.employee_idx(employee);
        self.availabilities
            .push(Availability::new(employee_idx, date, kind));
        self
    }

    /// Adds an unassigned shift.
    pub fn shift(mut self, start: NaiveDateTime, end: NaiveDateTime, skills: &[&str]) -> Self {
        let id = self.shifts.len() as i64 + 1;
        self.shifts.push(Shift::new(
            id,
            start,
            end,
            self.location.clone(),
            skills.iter().copied(),
        ));
        self
    }

    /// Adds a shift assigned to the named employee.
    pub fn assigned_shift(
        self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        skills: &[&str],
        employee: &str,
    ) -> Self {
        let employee_idx = self.employee_idx(employee);
        let mut builder = self.shift(start, end, skills);
        if let Some(last) = builder.shifts.last_mut() {
            last.employee_idx = Some(employee_idx);
        }
        builder
    }

    pub fn build(self) -> EmployeeSchedule {
        EmployeeSchedule::new(self.state, self.employees, self.availabilities, self.shifts)
    }

    fn employee_idx(&self, name: &str) -> usize {
        self.employees
            .iter()
            .position(|e| e.name == name)
            .unwrap_or_else(|| panic!("unknown employee {name}"))
    }
}
