//! Incremental scoring must always agree with full recomputation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rosterforge_scoring::{ConstraintSet, ScoreDirector};
use rosterforge_test::{random_schedule, RandomRosterConfig};

fn run_random_changes(seed: u64, constraints: ConstraintSet, steps: usize) {
    let config = RandomRosterConfig {
        employee_count: 5,
        shift_density: 0.7,
        ..RandomRosterConfig::default()
    };
    let roster = random_schedule(seed, &config);
    let free = roster.free_shift_indices();
    let employee_count = roster.employees.len();
    let mut director = ScoreDirector::new(roster, constraints).unwrap();
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);

    assert_eq!(director.score(), director.calculate_score_from_scratch());

    for step in 0..steps {
        let shift = free[rng.random_range(0..free.len())];
        if rng.random_bool(0.2) {
            let other = free[rng.random_range(0..free.len())];
            director.do_swap(shift, other).unwrap();
        } else {
            let employee = if rng.random_bool(0.1) {
                None
            } else {
                Some(rng.random_range(0..employee_count))
            };
            let predicted = director.delta_for_change(shift, employee);
            let before = director.score();
            director.do_change(shift, employee).unwrap();
            assert_eq!(director.score(), before + predicted, "seed {seed} step {step}");
        }
        assert_eq!(
            director.score(),
            director.calculate_score_from_scratch(),
            "seed {seed} step {step}"
        );
    }
}

#[test]
fn test_incremental_matches_full_default_constraints() {
    for seed in 0..10 {
        run_random_changes(seed, ConstraintSet::default(), 300);
    }
}

#[test]
fn test_incremental_matches_full_with_unassigned_penalty() {
    for seed in 100..105 {
        run_random_changes(seed, ConstraintSet::with_unassigned_penalty(), 200);
    }
}

#[test]
fn test_pinned_shifts_never_accept_changes() {
    let roster = random_schedule(42, &RandomRosterConfig::default());
    let pinned: Vec<usize> = (0..roster.shifts.len())
        .filter(|&i| roster.is_pinned(i))
        .collect();
    assert!(!pinned.is_empty());
    let mut director = ScoreDirector::new(roster, ConstraintSet::default()).unwrap();
    let before = director.assignments();

    for &i in &pinned {
        let other = match before[i] {
            Some(0) => Some(1),
            _ => Some(0),
        };
        assert!(director.do_change(i, other).is_err());
    }
    assert_eq!(director.assignments(), before);
}
