//! Lookup structures the incremental director keeps in step with the roster.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use smallvec::SmallVec;

use rosterforge_core::{EmployeeSchedule, Shift};

use crate::constraint::pair_window;

/// Per-employee shift lists sorted by start, plus availability records keyed
/// by (employee, date).
///
/// Availabilities are immutable facts, so their map is built once. The
/// employee lists change with every applied move.
#[derive(Debug, Clone, Default)]
pub struct RosterIndex {
    shifts_by_employee: Vec<BTreeSet<(NaiveDateTime, usize)>>,
    availabilities: HashMap<(usize, NaiveDate), SmallVec<[usize; 1]>>,
    max_shift_minutes: i64,
}

impl RosterIndex {
    /// Builds the index from the current assignments of `schedule`.
    ///
    /// Employee references must already be validated.
    pub fn build(schedule: &EmployeeSchedule) -> Self {
        let mut shifts_by_employee = vec![BTreeSet::new(); schedule.employees.len()];
        let mut max_shift_minutes = 0;
        for (i, shift) in schedule.shifts.iter().enumerate() {
            max_shift_minutes = max_shift_minutes.max(shift.duration_minutes());
            if let Some(e) = shift.employee_idx {
                if let Some(set) = shifts_by_employee.get_mut(e) {
                    set.insert((shift.start, i));
                }
            }
        }

        let mut availabilities: HashMap<(usize, NaiveDate), SmallVec<[usize; 1]>> =
            HashMap::new();
        for (i, a) in schedule.availabilities.iter().enumerate() {
            availabilities
                .entry((a.employee_idx, a.date))
                .or_default()
                .push(i);
        }

        Self {
            shifts_by_employee,
            availabilities,
            max_shift_minutes,
        }
    }

    pub fn insert(&mut self, employee_idx: usize, shift: &Shift, shift_idx: usize) {
        if let Some(set) = self.shifts_by_employee.get_mut(employee_idx) {
            set.insert((shift.start, shift_idx));
        }
    }

    pub fn remove(&mut self, employee_idx: usize, shift: &Shift, shift_idx: usize) {
        if let Some(set) = self.shifts_by_employee.get_mut(employee_idx) {
            set.remove(&(shift.start, shift_idx));
        }
    }

    /// Number of shifts currently assigned to the employee.
    pub fn shift_count(&self, employee_idx: usize) -> usize {
        self.shifts_by_employee
            .get(employee_idx)
            .map_or(0, BTreeSet::len)
    }

    /// Shift indices of the employee, in start order.
    pub fn shifts_of(&self, employee_idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.shifts_by_employee
            .get(employee_idx)
            .into_iter()
            .flat_map(|set| set.iter().map(|&(_, i)| i))
    }

    /// Shifts of the employee that may form a scoring pair with `shift`.
    ///
    /// Covers every overlapping shift, every shift within the minimum rest
    /// on either side, and every shift starting on the same date. The shift
    /// itself is included if it is assigned to this employee.
    pub fn neighbours<'a>(
        &'a self,
        employee_idx: usize,
        shift: &Shift,
    ) -> impl Iterator<Item = usize> + 'a {
        let (lower, upper) = pair_window(shift.start, shift.end, self.max_shift_minutes);
        self.shifts_by_employee
            .get(employee_idx)
            .into_iter()
            .flat_map(move |set| set.range((lower, 0)..(upper, 0)).map(|&(_, i)| i))
    }

    /// Availability record indices for an employee on a date.
    pub fn availabilities_on(&self, employee_idx: usize, date: NaiveDate) -> &[usize] {
        self.availabilities
            .get(&(employee_idx, date))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn max_shift_minutes(&self) -> i64 {
        self.max_shift_minutes
    }
}
