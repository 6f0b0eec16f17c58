use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};

/// A time-bounded slot at a location that needs one employee.
///
/// `employee_idx` is the planning variable: the solver only ever changes
/// this field, and only on shifts that are not pinned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shift {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    pub required_skills: HashSet<String>,
    pub employee_idx: Option<usize>,
}

impl Shift {
    pub fn new<I, T>(
        id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: impl Into<String>,
        required_skills: I,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            id,
            start,
            end,
            location: location.into(),
            required_skills: required_skills.into_iter().map(Into::into).collect(),
            employee_idx: None,
        }
    }

    /// Returns a copy assigned to the given employee.
    pub fn with_employee(mut self, employee_idx: usize) -> Self {
        self.employee_idx = Some(employee_idx);
        self
    }

    /// Calendar date the shift starts on.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Length of the shift in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// True if `end > start`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.employee_idx.is_some()
    }
}
