use std::collections::HashSet;

use chrono::NaiveDate;

/// A person who can be assigned to shifts.
///
/// The name is the identity and must be unique within a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Employee {
    pub name: String,
    pub skills: HashSet<String>,
}

impl Employee {
    pub fn new<I, T>(name: impl Into<String>, skills: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the employee holds every skill in `required`.
    ///
    /// An empty requirement is satisfied by anyone.
    pub fn has_all_skills<'a>(&self, required: impl IntoIterator<Item = &'a String>) -> bool {
        required.into_iter().all(|skill| self.skills.contains(skill))
    }
}

/// How an employee feels about working on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AvailabilityType {
    Desired,
    Undesired,
    Unavailable,
}

/// A dated availability preference of one employee.
///
/// Uniqueness per (employee, date) is not enforced: duplicate records each
/// match on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Availability {
    /// Index into [`EmployeeSchedule::employees`](super::EmployeeSchedule::employees).
    pub employee_idx: usize,
    pub date: NaiveDate,
    pub availability_type: AvailabilityType,
}

impl Availability {
    pub fn new(employee_idx: usize, date: NaiveDate, availability_type: AvailabilityType) -> Self {
        Self {
            employee_idx,
            date,
            availability_type,
        }
    }
}
