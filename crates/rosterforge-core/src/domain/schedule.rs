use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use super::{Availability, Employee, Shift, SolverStatus};
use crate::error::{Result, RosterForgeError};
use crate::score::HardSoftScore;

/// Publication window of a rolling roster.
///
/// Shifts starting before midnight of `first_draft_date` are published and
/// pinned; the solver never reassigns them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleState {
    /// Days moved from draft to published on each publish.
    pub publish_length: u32,
    /// Days in the draft window.
    pub draft_length: u32,
    pub first_draft_date: NaiveDate,
    pub last_historic_date: NaiveDate,
}

/// Dates that a publish added to the end of the draft horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishWindow {
    pub start: NaiveDate,
    pub days: u32,
}

impl PublishWindow {
    /// Iterates the dates of the window in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days).filter_map(move |d| self.start.checked_add_days(Days::new(u64::from(d))))
    }
}

impl ScheduleState {
    pub fn new(
        publish_length: u32,
        draft_length: u32,
        first_draft_date: NaiveDate,
        last_historic_date: NaiveDate,
    ) -> Self {
        Self {
            publish_length,
            draft_length,
            first_draft_date,
            last_historic_date,
        }
    }

    /// Midnight at the start of the draft window.
    #[inline]
    pub fn draft_start(&self) -> NaiveDateTime {
        self.first_draft_date.and_time(NaiveTime::MIN)
    }

    /// True if the shift lies in the draft window and may be reassigned.
    #[inline]
    pub fn is_draft(&self, shift: &Shift) -> bool {
        shift.start >= self.draft_start()
    }

    /// Advances the window by `publish_length` days.
    ///
    /// The previous first draft date becomes the last historic date. Returns
    /// the block of days appended past the old end of the draft horizon so
    /// the caller can generate shifts and availabilities for them.
    pub fn advance(&mut self) -> Result<PublishWindow> {
        let old_first_draft = self.first_draft_date;
        let publish = Days::new(u64::from(self.publish_length));
        let new_first_draft = old_first_draft
            .checked_add_days(publish)
            .ok_or_else(|| RosterForgeError::Internal("publish date overflow".to_string()))?;
        let horizon_end = old_first_draft
            .checked_add_days(Days::new(u64::from(self.draft_length)))
            .ok_or_else(|| RosterForgeError::Internal("draft horizon overflow".to_string()))?;

        self.last_historic_date = old_first_draft;
        self.first_draft_date = new_first_draft;

        Ok(PublishWindow {
            start: horizon_end,
            days: self.publish_length,
        })
    }
}

/// The aggregate root: one roster with its facts, shifts and solve state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmployeeSchedule {
    pub schedule_state: ScheduleState,
    pub employees: Vec<Employee>,
    pub availabilities: Vec<Availability>,
    pub shifts: Vec<Shift>,
    pub score: Option<HardSoftScore>,
    pub solver_status: Option<SolverStatus>,
}

impl EmployeeSchedule {
    pub fn new(
        schedule_state: ScheduleState,
        employees: Vec<Employee>,
        availabilities: Vec<Availability>,
        shifts: Vec<Shift>,
    ) -> Self {
        Self {
            schedule_state,
            employees,
            availabilities,
            shifts,
            score: None,
            solver_status: None,
        }
    }

    /// True if the shift at `shift_idx` is published and must not change.
    pub fn is_pinned(&self, shift_idx: usize) -> bool {
        self.shifts
            .get(shift_idx)
            .is_some_and(|s| !self.schedule_state.is_draft(s))
    }

    /// Indices of every shift the solver may reassign.
    pub fn free_shift_indices(&self) -> Vec<usize> {
        self.shifts
            .iter()
            .enumerate()
            .filter(|(_, s)| self.schedule_state.is_draft(s))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn employee(&self, idx: usize) -> Option<&Employee> {
        self.employees.get(idx)
    }

    /// Employee currently assigned to the shift, if any.
    pub fn assigned_employee(&self, shift_idx: usize) -> Option<&Employee> {
        self.shifts
            .get(shift_idx)
            .and_then(|s| s.employee_idx)
            .and_then(|e| self.employees.get(e))
    }

    pub fn employee_index_by_name(&self, name: &str) -> Option<usize> {
        self.employees.iter().position(|e| e.name == name)
    }

    pub fn shift_index_by_id(&self, id: i64) -> Option<usize> {
        self.shifts.iter().position(|s| s.id == id)
    }

    /// Snapshot of every shift's planning variable.
    pub fn assignments(&self) -> Vec<Option<usize>> {
        self.shifts.iter().map(|s| s.employee_idx).collect()
    }

    /// Overwrites every shift's planning variable from a snapshot.
    ///
    /// The snapshot must have one entry per shift.
    pub fn apply_assignments(&mut self, assignments: &[Option<usize>]) {
        for (shift, assignment) in self.shifts.iter_mut().zip(assignments) {
            shift.employee_idx = *assignment;
        }
    }

    pub fn unassigned_count(&self) -> usize {
        self.shifts.iter().filter(|s| s.employee_idx.is_none()).count()
    }

    /// Number of shifts that are draft and may be reassigned.
    pub fn free_shift_count(&self) -> usize {
        self.shifts
            .iter()
            .filter(|s| self.schedule_state.is_draft(s))
            .count()
    }
}
