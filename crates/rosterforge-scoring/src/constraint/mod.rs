//! The rostering constraints.
//!
//! Every constraint is a variant of [`Constraint`]. A variant knows its name,
//! whether it is hard, whether it penalizes or rewards, and how to compute the
//! match weight for the entities in its scope. Match weights are always
//! non-negative; the impact sign is applied by [`Constraint::score_for`].

mod set;

#[cfg(test)]
mod tests;

pub use set::ConstraintSet;

use chrono::{Duration, NaiveDateTime};
use rosterforge_core::{
    Availability, AvailabilityType, ConstraintRef, Employee, HardSoftScore, ImpactType, Shift,
};

/// Package used for every built-in constraint reference.
pub const CONSTRAINT_PACKAGE: &str = "rosterforge";

/// Minimum rest between two shifts of the same employee, in minutes.
pub const MIN_REST_MINUTES: i64 = 10 * 60;

/// The entities a constraint is evaluated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintScope {
    /// One shift and its assigned employee.
    Shift,
    /// A unique pair of shifts assigned to the same employee.
    ShiftPair,
    /// A shift joined with an availability of the same employee and date.
    ShiftAvailability,
}

/// A rostering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    RequiredSkill,
    OverlappingShifts,
    MinimumRest,
    OneShiftPerDay,
    UnavailableDay,
    DesiredDay,
    UndesiredDay,
    /// Opt-in: one hard point per shift without an employee.
    UnassignedShift,
}

impl Constraint {
    /// The seven rules every roster is scored with.
    pub const DEFAULT: [Constraint; 7] = [
        Constraint::RequiredSkill,
        Constraint::OverlappingShifts,
        Constraint::MinimumRest,
        Constraint::OneShiftPerDay,
        Constraint::UnavailableDay,
        Constraint::DesiredDay,
        Constraint::UndesiredDay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Constraint::RequiredSkill => "Missing required skill",
            Constraint::OverlappingShifts => "Overlapping shift",
            Constraint::MinimumRest => "At least 10 hours between 2 shifts",
            Constraint::OneShiftPerDay => "Max one shift per day",
            Constraint::UnavailableDay => "Unavailable employee",
            Constraint::DesiredDay => "Desired day for employee",
            Constraint::UndesiredDay => "Undesired day for employee",
            Constraint::UnassignedShift => "Unassigned shift",
        }
    }

    pub fn constraint_ref(self) -> ConstraintRef {
        ConstraintRef::new(CONSTRAINT_PACKAGE, self.name())
    }

    pub fn impact(self) -> ImpactType {
        match self {
            Constraint::DesiredDay => ImpactType::Reward,
            _ => ImpactType::Penalty,
        }
    }

    pub fn is_hard(self) -> bool {
        !matches!(self, Constraint::DesiredDay | Constraint::UndesiredDay)
    }

    pub fn scope(self) -> ConstraintScope {
        match self {
            Constraint::RequiredSkill | Constraint::UnassignedShift => ConstraintScope::Shift,
            Constraint::OverlappingShifts | Constraint::MinimumRest | Constraint::OneShiftPerDay => {
                ConstraintScope::ShiftPair
            }
            Constraint::UnavailableDay | Constraint::DesiredDay | Constraint::UndesiredDay => {
                ConstraintScope::ShiftAvailability
            }
        }
    }

    /// Score of a single match of weight one.
    pub fn weight(self) -> HardSoftScore {
        if self.is_hard() {
            HardSoftScore::ONE_HARD
        } else {
            HardSoftScore::ONE_SOFT
        }
    }

    /// Signed score for a match of the given weight.
    #[inline]
    pub fn score_for(self, match_weight: i64) -> HardSoftScore {
        self.weight().multiply(match_weight * self.impact().sign())
    }

    /// Match weight of a single shift given its assigned employee.
    ///
    /// Returns 0 for constraints outside the shift scope.
    pub fn match_shift(self, shift: &Shift, employee: Option<&Employee>) -> i64 {
        match self {
            Constraint::RequiredSkill => match employee {
                Some(e) if !e.has_all_skills(&shift.required_skills) => 1,
                _ => 0,
            },
            Constraint::UnassignedShift => i64::from(employee.is_none()),
            _ => 0,
        }
    }

    /// Match weight of two distinct shifts already known to share an employee.
    ///
    /// The result does not depend on argument order.
    pub fn match_pair(self, a: &Shift, b: &Shift) -> i64 {
        match self {
            Constraint::OverlappingShifts => overlap_minutes(a, b),
            Constraint::MinimumRest => rest_shortfall_minutes(a, b),
            Constraint::OneShiftPerDay => i64::from(a.date() == b.date()),
            _ => 0,
        }
    }

    /// Match weight of a shift joined with one availability record of its
    /// employee on the shift's start date.
    pub fn match_availability(self, shift: &Shift, availability: &Availability) -> i64 {
        let wanted = match self {
            Constraint::UnavailableDay => AvailabilityType::Unavailable,
            Constraint::DesiredDay => AvailabilityType::Desired,
            Constraint::UndesiredDay => AvailabilityType::Undesired,
            _ => return 0,
        };
        if availability.availability_type == wanted {
            shift.duration_minutes()
        } else {
            0
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Minutes during which both `[start, end)` intervals run, or 0.
#[inline]
pub fn overlap_minutes(a: &Shift, b: &Shift) -> i64 {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    if start < end {
        (end - start).num_minutes()
    } else {
        0
    }
}

/// Minutes missing from the 10 hour rest between two non-overlapping shifts.
///
/// The shift that ends first is the earlier one. Overlapping pairs yield 0;
/// they are scored by the overlap rule alone.
#[inline]
pub fn rest_shortfall_minutes(a: &Shift, b: &Shift) -> i64 {
    let (first, second) = if a.end <= b.start {
        (a, b)
    } else if b.end <= a.start {
        (b, a)
    } else {
        return 0;
    };
    let gap_seconds = (second.start - first.end).num_seconds();
    let min_rest_seconds = MIN_REST_MINUTES * 60;
    if gap_seconds < min_rest_seconds {
        (min_rest_seconds - gap_seconds) / 60
    } else {
        0
    }
}

/// Earliest and latest (exclusive) start time of any shift that can form a
/// scoring pair with a shift spanning `[start, end)`.
///
/// `max_shift_minutes` bounds how far back an earlier shift can reach.
pub fn pair_window(
    start: NaiveDateTime,
    end: NaiveDateTime,
    max_shift_minutes: i64,
) -> (NaiveDateTime, NaiveDateTime) {
    let rest = Duration::minutes(MIN_REST_MINUTES);
    let day_start = start.date().and_time(chrono::NaiveTime::MIN);
    let next_day = day_start + Duration::days(1);
    let lower = (start - rest - Duration::minutes(max_shift_minutes)).min(day_start);
    let upper = (end + rest).max(next_day);
    (lower, upper)
}
