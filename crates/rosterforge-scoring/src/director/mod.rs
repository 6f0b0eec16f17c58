//! Incremental score director.
//!
//! The director owns the working roster and keeps its score current as shift
//! assignments change. A change of one shift only re-evaluates that shift:
//! its own single-shift rules, the availability records of its employee on
//! its date, and the pair rules against the employee's shifts inside the pair
//! window. Everything else is untouched, so a move costs O(k) in the number
//! of nearby shifts of the two employees involved.


use rosterforge_core::{EmployeeSchedule, HardSoftScore, Result, RosterForgeError};
use tracing::debug;

use crate::analysis::ScoreAnalysis;
use crate::constraint::{Constraint, ConstraintScope, ConstraintSet};
use crate::index::RosterIndex;

/// Owns a working roster and its incrementally maintained score.
#[derive(Debug, Clone)]
pub struct ScoreDirector {
    working_solution: EmployeeSchedule,
    constraints: ConstraintSet,
    index: RosterIndex,
    score: HardSoftScore,
    unassigned_count: usize,
    shift_rules: Vec<Constraint>,
    pair_rules: Vec<Constraint>,
    availability_rules: Vec<Constraint>,
}

impl ScoreDirector {
    /// Validates the roster, builds the indices and computes the baseline score.
    ///
    /// Fails with [`RosterForgeError::ConstraintEvaluation`] on malformed data.
    pub fn new(solution: EmployeeSchedule, constraints: ConstraintSet) -> Result<Self> {
        constraints.validate(&solution)?;
        let index = RosterIndex::build(&solution);
        let score = constraints.evaluate_all(&solution);
        let unassigned_count = solution.unassigned_count();
        let shift_rules = constraints.of_scope(ConstraintScope::Shift).collect();
        let pair_rules = constraints.of_scope(ConstraintScope::ShiftPair).collect();
        let availability_rules = constraints
            .of_scope(ConstraintScope::ShiftAvailability)
            .collect();

        debug!(
            event = "director_built",
            shift_count = solution.shifts.len(),
            employee_count = solution.employees.len(),
            availability_count = solution.availabilities.len(),
            score = %score,
        );

        Ok(Self {
            working_solution: solution,
            constraints,
            index,
            score,
            unassigned_count,
            shift_rules,
            pair_rules,
            availability_rules,
        })
    }

    pub fn working_solution(&self) -> &EmployeeSchedule {
        &self.working_solution
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn index(&self) -> &RosterIndex {
        &self.index
    }

    /// The current score, kept up to date by every applied change.
    #[inline]
    pub fn score(&self) -> HardSoftScore {
        self.score
    }

    /// Number of shifts without an employee, pinned ones included.
    pub fn unassigned_count(&self) -> usize {
        self.unassigned_count
    }

    pub fn shift_count(&self) -> usize {
        self.working_solution.shifts.len()
    }

    pub fn employee_count(&self) -> usize {
        self.working_solution.employees.len()
    }

    pub fn is_pinned(&self, shift_idx: usize) -> bool {
        self.working_solution.is_pinned(shift_idx)
    }

    /// Current planning value of a shift; `None` if unassigned or out of range.
    #[inline]
    pub fn assignment(&self, shift_idx: usize) -> Option<usize> {
        self.working_solution
            .shifts
            .get(shift_idx)
            .and_then(|s| s.employee_idx)
    }

    /// Score the shift contributes when assigned to `employee`, measured
    /// against every other shift as it currently stands.
    pub fn contribution(&self, shift_idx: usize, employee: Option<usize>) -> HardSoftScore {
        let solution = &self.working_solution;
        let Some(shift) = solution.shifts.get(shift_idx) else {
            return HardSoftScore::ZERO;
        };
        let assigned = employee.and_then(|e| solution.employee(e));

        let mut score = HardSoftScore::ZERO;
        for &c in &self.shift_rules {
            score += c.score_for(c.match_shift(shift, assigned));
        }

        let Some(e) = employee else {
            return score;
        };

        if !self.pair_rules.is_empty() {
            for other_idx in self.index.neighbours(e, shift) {
                if other_idx == shift_idx {
                    continue;
                }
                let other = &solution.shifts[other_idx];
                for &c in &self.pair_rules {
                    score += c.score_for(c.match_pair(shift, other));
                }
            }
        }

        for &r in self.index.availabilities_on(e, shift.date()) {
            let availability = &solution.availabilities[r];
            for &c in &self.availability_rules {
                score += c.score_for(c.match_availability(shift, availability));
            }
        }
        score
    }

    /// Score change that assigning `employee` to the shift would cause.
    ///
    /// Does not touch the working roster.
    pub fn delta_for_change(&self, shift_idx: usize, employee: Option<usize>) -> HardSoftScore {
        let current = self.assignment(shift_idx);
        if current == employee {
            return HardSoftScore::ZERO;
        }
        self.contribution(shift_idx, employee) - self.contribution(shift_idx, current)
    }

    /// Assigns `employee` to the shift and returns the score delta.
    ///
    /// Pinned shifts, unknown shift indices and unknown employees are rejected
    /// with [`RosterForgeError::InvalidMove`] and leave the roster untouched.
    pub fn do_change(&mut self, shift_idx: usize, employee: Option<usize>) -> Result<HardSoftScore> {
        self.check_change(shift_idx, employee)?;
        Ok(self.apply_change(shift_idx, employee))
    }

    /// Exchanges the employees of two shifts and returns the score delta.
    pub fn do_swap(&mut self, left: usize, right: usize) -> Result<HardSoftScore> {
        let left_employee = self.assignment(left);
        let right_employee = self.assignment(right);
        self.check_change(left, right_employee)?;
        self.check_change(right, left_employee)?;
        let delta = self.apply_change(left, right_employee) + self.apply_change(right, left_employee);
        Ok(delta)
    }

    fn check_change(&self, shift_idx: usize, employee: Option<usize>) -> Result<()> {
        let Some(shift) = self.working_solution.shifts.get(shift_idx) else {
            return Err(RosterForgeError::Internal(format!(
                "shift index {shift_idx} out of range"
            )));
        };
        if self.is_pinned(shift_idx) && shift.employee_idx != employee {
            return Err(RosterForgeError::InvalidMove {
                shift_id: shift.id,
                reason: "shift is pinned".to_string(),
            });
        }
        if let Some(e) = employee {
            if e >= self.employee_count() {
                return Err(RosterForgeError::InvalidMove {
                    shift_id: shift.id,
                    reason: format!("employee index {e} out of range"),
                });
            }
        }
        Ok(())
    }

    fn apply_change(&mut self, shift_idx: usize, employee: Option<usize>) -> HardSoftScore {
        let old = self.assignment(shift_idx);
        if old == employee {
            return HardSoftScore::ZERO;
        }
        let before = self.contribution(shift_idx, old);

        match old {
            Some(e) => self
                .index
                .remove(e, &self.working_solution.shifts[shift_idx], shift_idx),
            None => self.unassigned_count -= 1,
        }
        self.working_solution.shifts[shift_idx].employee_idx = employee;
        match employee {
            Some(e) => self
                .index
                .insert(e, &self.working_solution.shifts[shift_idx], shift_idx),
            None => self.unassigned_count += 1,
        }

        let after = self.contribution(shift_idx, employee);
        let delta = after - before;
        self.score += delta;
        delta
    }

    /// Recomputes the score by visiting every shift and pair.
    pub fn calculate_score_from_scratch(&self) -> HardSoftScore {
        self.constraints.evaluate_all(&self.working_solution)
    }

    /// Fails with [`RosterForgeError::ConstraintEvaluation`] if the
    /// incremental score has drifted from a full recomputation.
    pub fn assert_score_consistent(&self) -> Result<()> {
        let expected = self.calculate_score_from_scratch();
        if expected != self.score {
            return Err(RosterForgeError::ConstraintEvaluation(format!(
                "score corruption: incremental score {} differs from recalculated {}",
                self.score, expected
            )));
        }
        Ok(())
    }

    pub fn analyze(&self) -> ScoreAnalysis {
        self.constraints.analyze(&self.working_solution)
    }

    /// Snapshot of every shift's planning variable.
    pub fn assignments(&self) -> Vec<Option<usize>> {
        self.working_solution.assignments()
    }

    /// Moves the roster to a previously taken snapshot, incrementally.
    pub fn restore_assignments(&mut self, snapshot: &[Option<usize>]) -> Result<()> {
        if snapshot.len() != self.shift_count() {
            return Err(RosterForgeError::Internal(format!(
                "snapshot has {} entries for {} shifts",
                snapshot.len(),
                self.shift_count()
            )));
        }
        for (shift_idx, &employee) in snapshot.iter().enumerate() {
            if self.assignment(shift_idx) != employee {
                self.do_change(shift_idx, employee)?;
            }
        }
        Ok(())
    }

    /// Releases the working roster with its score filled in.
    pub fn into_solution(self) -> EmployeeSchedule {
        let mut solution = self.working_solution;
        solution.score = Some(self.score);
        solution
    }
}
