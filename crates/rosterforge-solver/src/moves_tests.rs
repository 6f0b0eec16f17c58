use rand::rngs::StdRng;
use rand::SeedableRng;

use rosterforge_core::HardSoftScore;
use rosterforge_scoring::{ConstraintSet, ScoreDirector};
use rosterforge_test::time::draft_day;
use rosterforge_test::{at, random_schedule, RandomRosterConfig, RosterBuilder};

use super::*;

fn director(roster: rosterforge_core::EmployeeSchedule) -> ScoreDirector {
    ScoreDirector::new(roster, ConstraintSet::default()).unwrap()
}

#[test]
fn test_change_evaluate_leaves_roster_untouched() {
    let mut d = director(
        RosterBuilder::new()
            .employee("Amy Cole", &["Nurse"])
            .employee("Beth Fox", &["Doctor"])
            .shift(at(draft_day(0), 6), at(draft_day(0), 14), &["Nurse"])
            .build(),
    );
    let m = RosterMove::Change {
        shift_idx: 0,
        employee: 1,
    };
    assert_eq!(m.evaluate(&mut d).unwrap(), HardSoftScore::of_hard(-1));
    assert_eq!(d.assignment(0), None);

    assert_eq!(m.do_move(&mut d).unwrap(), HardSoftScore::of_hard(-1));
    assert_eq!(d.assignment(0), Some(1));
    assert_eq!(d.score(), HardSoftScore::of_hard(-1));
}

#[test]
fn test_swap_evaluate_restores_assignments() {
    let mut d = director(
        RosterBuilder::new()
            .employee("Amy Cole", &["Nurse"])
            .employee("Beth Fox", &["Doctor"])
            .assigned_shift(at(draft_day(0), 6), at(draft_day(0), 14), &["Doctor"], "Amy Cole")
            .assigned_shift(at(draft_day(1), 6), at(draft_day(1), 14), &["Nurse"], "Beth Fox")
            .build(),
    );
    assert_eq!(d.score(), HardSoftScore::of_hard(-2));
    let m = RosterMove::Swap { left: 0, right: 1 };
    assert!(m.is_doable(&d));

    assert_eq!(m.evaluate(&mut d).unwrap(), HardSoftScore::of_hard(2));
    assert_eq!(d.assignments(), vec![Some(0), Some(1)]);
    assert_eq!(d.score(), HardSoftScore::of_hard(-2));

    m.do_move(&mut d).unwrap();
    assert_eq!(d.assignments(), vec![Some(1), Some(0)]);
    assert_eq!(d.score(), HardSoftScore::ZERO);
}

#[test]
fn test_pinned_shift_moves_are_not_doable() {
    let d = director(
        RosterBuilder::new()
            .employee("Amy Cole", &[])
            .employee("Beth Fox", &[])
            .assigned_shift(at(draft_day(-1), 6), at(draft_day(-1), 14), &[], "Amy Cole")
            .shift(at(draft_day(0), 6), at(draft_day(0), 14), &[])
            .build(),
    );
    assert!(!RosterMove::Change {
        shift_idx: 0,
        employee: 1
    }
    .is_doable(&d));
    assert!(!RosterMove::Swap { left: 0, right: 1 }.is_doable(&d));
    assert!(RosterMove::Change {
        shift_idx: 1,
        employee: 1
    }
    .is_doable(&d));
}

#[test]
fn test_selector_only_offers_free_shifts() {
    let roster = random_schedule(11, &RandomRosterConfig::default());
    let d = director(roster);
    let selector = MoveSelector::new(&d, 0.5);
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..500 {
        let Some(m) = selector.select(&mut rng, &d) else {
            continue;
        };
        assert!(m.is_doable(&d));
        match m {
            RosterMove::Change { shift_idx, .. } => assert!(!d.is_pinned(shift_idx)),
            RosterMove::Swap { left, right } => {
                assert!(!d.is_pinned(left));
                assert!(!d.is_pinned(right));
            }
        }
    }
}

#[test]
fn test_single_employee_runs_out_of_moves() {
    let mut d = director(
        RosterBuilder::new()
            .employee("Amy Cole", &["Notaufnahme"])
            .shift(at(draft_day(0), 6), at(draft_day(0), 14), &["Notaufnahme"])
            .build(),
    );
    let selector = MoveSelector::new(&d, 0.2);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(selector.has_moves(&d));
    assert_eq!(
        selector.select(&mut rng, &d),
        Some(RosterMove::Change {
            shift_idx: 0,
            employee: 0
        })
    );

    d.do_change(0, Some(0)).unwrap();
    assert!(!selector.has_moves(&d));
    assert_eq!(selector.select(&mut rng, &d), None);
}

#[test]
fn test_no_free_shifts_has_no_moves() {
    let d = director(
        RosterBuilder::new()
            .employee("Amy Cole", &[])
            .shift(at(draft_day(-3), 6), at(draft_day(-3), 14), &[])
            .build(),
    );
    let selector = MoveSelector::new(&d, 0.2);
    assert_eq!(selector.free_shift_count(), 0);
    assert!(!selector.has_moves(&d));
}
