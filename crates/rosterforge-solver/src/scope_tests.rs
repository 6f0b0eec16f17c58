use std::sync::{Arc, Mutex};

use rosterforge_core::{EmployeeSchedule, HardSoftScore};
use rosterforge_scoring::{ConstraintSet, ScoreDirector};
use rosterforge_test::time::draft_day;
use rosterforge_test::{at, RosterBuilder};

use super::*;

/// Two nurse shifts; the first is given to Beth, who is not a nurse.
fn staffed_scope() -> SolverScope {
    let roster = RosterBuilder::new()
        .employee("Amy Cole", &["Nurse"])
        .employee("Beth Fox", &["Doctor"])
        .assigned_shift(at(draft_day(0), 6), at(draft_day(0), 14), &["Nurse"], "Beth Fox")
        .assigned_shift(at(draft_day(1), 6), at(draft_day(1), 14), &["Nurse"], "Amy Cole")
        .build();
    let director = ScoreDirector::new(roster, ConstraintSet::default()).unwrap();
    SolverScope::with_seed(director, 7)
}

fn open_scope() -> SolverScope {
    let roster = RosterBuilder::new()
        .employee("Amy Cole", &["Nurse"])
        .employee("Beth Fox", &["Doctor"])
        .assigned_shift(at(draft_day(-1), 6), at(draft_day(-1), 14), &["Nurse"], "Amy Cole")
        .shift(at(draft_day(-1), 14), at(draft_day(-1), 22), &["Nurse"])
        .shift(at(draft_day(0), 6), at(draft_day(0), 14), &["Nurse"])
        .build();
    let director = ScoreDirector::new(roster, ConstraintSet::default()).unwrap();
    SolverScope::with_seed(director, 7)
}

#[test]
fn test_timing_unset_before_start() {
    let scope = staffed_scope();
    assert!(scope.elapsed().is_none());
    assert!(scope.time_since_last_improvement().is_none());
}

#[test]
fn test_first_update_always_records_best() {
    let mut scope = staffed_scope();
    scope.start_solving();
    assert_eq!(scope.best_score(), None);
    assert!(scope.update_best_solution());
    assert_eq!(scope.best_score(), Some(HardSoftScore::of_hard(-1)));
    assert!(scope.is_best_initialized());
    assert!(!scope.update_best_solution());
    assert_eq!(scope.statistics().improvement_count(), 1);
}

#[test]
fn test_worse_score_keeps_best_snapshot() {
    let mut scope = staffed_scope();
    scope.start_solving();
    scope.update_best_solution();

    scope.score_director_mut().do_change(1, Some(1)).unwrap();
    assert_eq!(scope.score(), HardSoftScore::of_hard(-2));
    assert!(!scope.update_best_solution());

    let (solution, _) = scope.take_best_solution().unwrap();
    assert_eq!(solution.shifts[1].employee_idx, Some(0));
    assert_eq!(solution.score, Some(HardSoftScore::of_hard(-1)));
}

#[test]
fn test_pinned_unassigned_shifts_do_not_count_as_uninitialized() {
    let mut scope = open_scope();
    scope.start_solving();
    assert_eq!(scope.uninitialized_count(), 1);
    scope.update_best_solution();
    assert!(!scope.is_best_initialized());

    scope.score_director_mut().do_change(2, Some(0)).unwrap();
    assert_eq!(scope.uninitialized_count(), 0);
    assert!(scope.update_best_solution());
    assert!(scope.is_best_initialized());
}

#[test]
fn test_fewer_unassigned_beats_better_score() {
    let mut scope = open_scope();
    scope.start_solving();
    scope.update_best_solution();
    assert_eq!(scope.best_score(), Some(HardSoftScore::ZERO));

    // Beth lacks the skill, but the free shift is now staffed.
    scope.score_director_mut().do_change(2, Some(1)).unwrap();
    assert!(scope.update_best_solution());
    assert_eq!(scope.best_score(), Some(HardSoftScore::of_hard(-1)));

    scope.score_director_mut().do_change(2, None).unwrap();
    assert!(!scope.update_best_solution());
}

#[test]
fn test_listener_sees_scored_snapshot() {
    let seen: Arc<Mutex<Vec<EmployeeSchedule>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut scope = staffed_scope().with_best_listener(Box::new(move |s| {
        sink.lock().unwrap().push(s);
    }));
    scope.start_solving();
    scope.update_best_solution();
    scope.score_director_mut().do_change(0, Some(0)).unwrap();
    scope.update_best_solution();

    let seen = seen.lock().unwrap();
    let scores: Vec<_> = seen.iter().map(|s| s.score).collect();
    assert_eq!(
        scores,
        vec![Some(HardSoftScore::of_hard(-1)), Some(HardSoftScore::ZERO)]
    );
    assert_eq!(seen[1].shifts[0].employee_idx, Some(0));
}

#[test]
fn test_step_count_feeds_statistics() {
    let mut scope = staffed_scope();
    scope.start_solving();
    assert_eq!(scope.increment_step_count(), 1);
    assert_eq!(scope.increment_step_count(), 2);
    assert_eq!(scope.total_step_count(), 2);
    assert_eq!(scope.statistics().total_step_count, 2);
}
