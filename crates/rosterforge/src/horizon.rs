//! Extending the draft horizon when a roster is published.

use chrono::Days;
use rosterforge_core::{EmployeeSchedule, PublishWindow, Result, RosterForgeError, Shift};

/// Adds facts and shifts for the days a publish opened.
///
/// Implementations append to `schedule`; they must not remove or reassign
/// existing shifts. Any closure with the same signature is a generator.
pub trait HorizonGenerator: Send + Sync + 'static {
    fn extend_horizon(&self, schedule: &mut EmployeeSchedule, window: PublishWindow) -> Result<()>;
}

impl<F> HorizonGenerator for F
where
    F: Fn(&mut EmployeeSchedule, PublishWindow) -> Result<()> + Send + Sync + 'static,
{
    fn extend_horizon(&self, schedule: &mut EmployeeSchedule, window: PublishWindow) -> Result<()> {
        self(schedule, window)
    }
}

/// Repeats the shift pattern of the `window.days` days before the window.
///
/// Copies are unassigned and get fresh ids above the current maximum.
/// Availabilities are not copied.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepeatingHorizon;

impl HorizonGenerator for RepeatingHorizon {
    fn extend_horizon(&self, schedule: &mut EmployeeSchedule, window: PublishWindow) -> Result<()> {
        let period = Days::new(u64::from(window.days));
        let source_start = window
            .start
            .checked_sub_days(period)
            .ok_or_else(|| RosterForgeError::Internal("horizon date underflow".to_string()))?;

        let mut next_id = schedule.shifts.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let mut added = Vec::new();
        for shift in &schedule.shifts {
            let date = shift.date();
            if date < source_start || date >= window.start {
                continue;
            }
            let (Some(start), Some(end)) = (
                shift.start.checked_add_days(period),
                shift.end.checked_add_days(period),
            ) else {
                return Err(RosterForgeError::Internal(
                    "horizon date overflow".to_string(),
                ));
            };
            added.push(Shift {
                id: next_id,
                start,
                end,
                location: shift.location.clone(),
                required_skills: shift.required_skills.clone(),
                employee_idx: None,
            });
            next_id += 1;
        }
        schedule.shifts.extend(added);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rosterforge_test::time::draft_day;
    use rosterforge_test::{at, RosterBuilder};

    use super::*;

    #[test]
    fn test_repeating_horizon_copies_previous_period() {
        let mut roster = RosterBuilder::new()
            .employee("Amy Cole", &["Nurse"])
            .assigned_shift(at(draft_day(6), 6), at(draft_day(6), 14), &["Nurse"], "Amy Cole")
            .shift(at(draft_day(13), 22), at(draft_day(14), 6), &["Nurse"])
            .shift(at(draft_day(14), 6), at(draft_day(14), 14), &[])
            .build();
        let window = PublishWindow {
            start: draft_day(14),
            days: 7,
        };

        RepeatingHorizon.extend_horizon(&mut roster, window).unwrap();

        assert_eq!(roster.shifts.len(), 4);
        let copy = &roster.shifts[3];
        assert_eq!(copy.id, 4);
        assert_eq!(copy.start, at(draft_day(20), 22));
        assert_eq!(copy.end, at(draft_day(21), 6));
        assert_eq!(copy.employee_idx, None);
        assert!(copy.required_skills.contains("Nurse"));
    }

    #[test]
    fn test_closure_generator() {
        let generator = |schedule: &mut EmployeeSchedule, window: PublishWindow| -> Result<()> {
            schedule.shifts.push(Shift::new(
                99,
                window.start.and_hms_opt(8, 0, 0).unwrap(),
                window.start.and_hms_opt(16, 0, 0).unwrap(),
                "Critical care",
                ["Doctor"],
            ));
            Ok(())
        };
        let mut roster = RosterBuilder::new().build();
        let window = PublishWindow {
            start: draft_day(14),
            days: 7,
        };
        generator.extend_horizon(&mut roster, window).unwrap();
        assert_eq!(roster.shifts[0].id, 99);
    }
}
