//! Seeded random rosters.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rosterforge_core::{
    Availability, AvailabilityType, Employee, EmployeeSchedule, ScheduleState, Shift,
};

use crate::time::{at, draft_start};

const LOCATIONS: [&str; 3] = ["Ambulatory care", "Critical care", "Pediatric care"];
const REQUIRED_SKILLS: [&str; 2] = ["Doctor", "Nurse"];
const OPTIONAL_SKILLS: [&str; 2] = ["Anaesthetics", "Cardiology"];
const FIRST_NAMES: [&str; 6] = ["Amy", "Beth", "Chad", "Dan", "Elsa", "Flo"];
const LAST_NAMES: [&str; 6] = ["Cole", "Fox", "Green", "Jones", "King", "Li"];

/// (start hour, length in hours). The night slot crosses midnight.
const SLOTS: [(u32, i64); 4] = [(6, 8), (9, 8), (14, 8), (22, 8)];

/// Shape of a generated roster.
#[derive(Debug, Clone)]
pub struct RandomRosterConfig {
    pub employee_count: usize,
    /// Days generated before the first draft date; their shifts are pinned.
    pub published_days: i64,
    pub draft_days: i64,
    /// Chance that a slot at a location has a shift.
    pub shift_density: f64,
    /// Chance that a generated shift starts out assigned.
    pub assigned_ratio: f64,
    /// Chance of an availability record per employee and day.
    pub availability_ratio: f64,
}

impl Default for RandomRosterConfig {
    fn default() -> Self {
        Self {
            employee_count: 8,
            published_days: 2,
            draft_days: 5,
            shift_density: 0.5,
            assigned_ratio: 0.6,
            availability_ratio: 0.3,
        }
    }
}

/// Generates a roster deterministically from `seed`.
pub fn random_schedule(seed: u64, config: &RandomRosterConfig) -> EmployeeSchedule {
    let mut rng = StdRng::seed_from_u64(seed);
    let first_draft = draft_start();
    let first_day = first_draft - Duration::days(config.published_days);
    let total_days = config.published_days + config.draft_days;

    let employees: Vec<Employee> = (0..config.employee_count)
        .map(|i| {
            let name = format!(
                "{} {} {}",
                FIRST_NAMES[i % FIRST_NAMES.len()],
                LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()],
                i
            );
            let mut skills = vec![REQUIRED_SKILLS[rng.random_range(0..REQUIRED_SKILLS.len())]];
            if rng.random_bool(0.5) {
                skills.push(OPTIONAL_SKILLS[rng.random_range(0..OPTIONAL_SKILLS.len())]);
            }
            Employee::new(name, skills)
        })
        .collect();

    let mut availabilities = Vec::new();
    for e in 0..employees.len() {
        for d in 0..total_days {
            if rng.random_bool(config.availability_ratio) {
                let kind = match rng.random_range(0..3) {
                    0 => AvailabilityType::Desired,
                    1 => AvailabilityType::Undesired,
                    _ => AvailabilityType::Unavailable,
                };
                availabilities.push(Availability::new(e, first_day + Duration::days(d), kind));
            }
        }
    }

    let mut shifts = Vec::new();
    for d in 0..total_days {
        let day = first_day + Duration::days(d);
        for location in LOCATIONS {
            for (hour, hours) in SLOTS {
                if !rng.random_bool(config.shift_density) {
                    continue;
                }
                let start = at(day, hour);
                let mut skills = vec![REQUIRED_SKILLS[rng.random_range(0..REQUIRED_SKILLS.len())]];
                if rng.random_bool(0.2) {
                    skills.push(OPTIONAL_SKILLS[rng.random_range(0..OPTIONAL_SKILLS.len())]);
                }
                let mut shift = Shift::new(
                    shifts.len() as i64 + 1,
                    start,
                    start + Duration::hours(hours),
                    location,
                    skills,
                );
                if !employees.is_empty() && rng.random_bool(config.assigned_ratio) {
                    shift.employee_idx = Some(rng.random_range(0..employees.len()));
                }
                shifts.push(shift);
            }
        }
    }

    let state = ScheduleState::new(
        7,
        config.draft_days.max(0) as u32,
        first_draft,
        first_day,
    );
    EmployeeSchedule::new(state, employees, availabilities, shifts)
}
