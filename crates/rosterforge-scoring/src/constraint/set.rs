//! The fixed list of constraints a roster is scored with.

use std::collections::HashMap;

use chrono::NaiveDate;
use rosterforge_core::{EmployeeSchedule, HardSoftScore, Result, RosterForgeError};

use super::{Constraint, ConstraintScope};
use crate::analysis::{ConstraintAnalysis, ConstraintMatch, ScoreAnalysis};

/// An ordered, duplicate-free list of constraints.
///
/// Full scoring through [`ConstraintSet::evaluate_all`] visits every unique
/// pair of shifts that share an employee and is the reference the incremental
/// director is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            constraints: Constraint::DEFAULT.to_vec(),
        }
    }
}

impl ConstraintSet {
    /// Creates a set from the given constraints, dropping duplicates.
    pub fn new(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        let mut list = Vec::new();
        for c in constraints {
            if !list.contains(&c) {
                list.push(c);
            }
        }
        Self { constraints: list }
    }

    /// The default seven plus the hard penalty on unassigned shifts.
    pub fn with_unassigned_penalty() -> Self {
        let mut set = Self::default();
        set.constraints.push(Constraint::UnassignedShift);
        set
    }

    /// Builds the set for the `penalize_unassigned` setting.
    pub fn for_policy(penalize_unassigned: bool) -> Self {
        if penalize_unassigned {
            Self::with_unassigned_penalty()
        } else {
            Self::default()
        }
    }

    pub fn contains(&self, constraint: Constraint) -> bool {
        self.constraints.contains(&constraint)
    }

    pub fn iter(&self) -> impl Iterator<Item = Constraint> + '_ {
        self.constraints.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constraints of the given scope, in set order.
    pub fn of_scope(&self, scope: ConstraintScope) -> impl Iterator<Item = Constraint> + '_ {
        self.iter().filter(move |c| c.scope() == scope)
    }

    /// Checks the data every constraint relies on.
    ///
    /// Rejects shifts with `end <= start` and employee references that point
    /// outside the employee list.
    pub fn validate(&self, schedule: &EmployeeSchedule) -> Result<()> {
        let employee_count = schedule.employees.len();
        for shift in &schedule.shifts {
            if !shift.is_well_formed() {
                return Err(RosterForgeError::ConstraintEvaluation(format!(
                    "shift {} ends at {} which is not after its start {}",
                    shift.id, shift.end, shift.start
                )));
            }
            if let Some(e) = shift.employee_idx {
                if e >= employee_count {
                    return Err(RosterForgeError::ConstraintEvaluation(format!(
                        "shift {} references employee index {} but there are {} employees",
                        shift.id, e, employee_count
                    )));
                }
            }
        }
        for availability in &schedule.availabilities {
            if availability.employee_idx >= employee_count {
                return Err(RosterForgeError::ConstraintEvaluation(format!(
                    "availability on {} references employee index {} but there are {} employees",
                    availability.date, availability.employee_idx, employee_count
                )));
            }
        }
        Ok(())
    }

    /// Scores the schedule from scratch.
    pub fn evaluate_all(&self, schedule: &EmployeeSchedule) -> HardSoftScore {
        self.analyze(schedule).score
    }

    /// Scores the schedule from scratch, keeping every match.
    ///
    /// The schedule is expected to have passed [`ConstraintSet::validate`];
    /// dangling employee indices are treated as unassigned.
    pub fn analyze(&self, schedule: &EmployeeSchedule) -> ScoreAnalysis {
        let shifts = &schedule.shifts;
        let employee_of = |idx: usize| shifts[idx].employee_idx.and_then(|e| schedule.employee(e));

        let mut by_employee: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, shift) in shifts.iter().enumerate() {
            if let Some(e) = shift.employee_idx {
                by_employee.entry(e).or_default().push(i);
            }
        }
        let mut availability_by_key: HashMap<(usize, NaiveDate), Vec<usize>> = HashMap::new();
        for (i, a) in schedule.availabilities.iter().enumerate() {
            availability_by_key
                .entry((a.employee_idx, a.date))
                .or_default()
                .push(i);
        }

        let mut analyses = Vec::with_capacity(self.len());
        for constraint in self.iter() {
            let mut matches = Vec::new();
            match constraint.scope() {
                ConstraintScope::Shift => {
                    for (i, shift) in shifts.iter().enumerate() {
                        let employee = employee_of(i);
                        let weight = constraint.match_shift(shift, employee);
                        if weight != 0 {
                            matches.push(ConstraintMatch::new(
                                vec![shift.id],
                                employee.map(|e| e.name.clone()),
                                constraint.score_for(weight),
                            ));
                        }
                    }
                }
                ConstraintScope::ShiftPair => {
                    let mut employees: Vec<_> = by_employee.keys().copied().collect();
                    employees.sort_unstable();
                    for e in employees {
                        let indices = &by_employee[&e];
                        for (pos, &a) in indices.iter().enumerate() {
                            for &b in &indices[pos + 1..] {
                                let weight = constraint.match_pair(&shifts[a], &shifts[b]);
                                if weight != 0 {
                                    matches.push(ConstraintMatch::new(
                                        vec![shifts[a].id, shifts[b].id],
                                        schedule.employee(e).map(|emp| emp.name.clone()),
                                        constraint.score_for(weight),
                                    ));
                                }
                            }
                        }
                    }
                }
                ConstraintScope::ShiftAvailability => {
                    for shift in shifts {
                        let Some(e) = shift.employee_idx else {
                            continue;
                        };
                        let Some(records) = availability_by_key.get(&(e, shift.date())) else {
                            continue;
                        };
                        for &r in records {
                            let weight =
                                constraint.match_availability(shift, &schedule.availabilities[r]);
                            if weight != 0 {
                                matches.push(ConstraintMatch::new(
                                    vec![shift.id],
                                    schedule.employee(e).map(|emp| emp.name.clone()),
                                    constraint.score_for(weight),
                                ));
                            }
                        }
                    }
                }
            }
            analyses.push(ConstraintAnalysis::new(constraint, matches));
        }
        ScoreAnalysis::new(analyses)
    }
}
