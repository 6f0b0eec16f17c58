use rosterforge_core::{AvailabilityType, HardSoftScore, ImpactType};
use rosterforge_test::time::draft_day;
use rosterforge_test::{at, at_hm, RosterBuilder};

use super::*;

fn shift(id: i64, start: NaiveDateTime, end: NaiveDateTime) -> Shift {
    Shift::new(id, start, end, "Critical care", Vec::<String>::new())
}

#[test]
fn test_constraint_metadata() {
    assert!(Constraint::RequiredSkill.is_hard());
    assert!(!Constraint::DesiredDay.is_hard());
    assert_eq!(Constraint::DesiredDay.impact(), ImpactType::Reward);
    assert_eq!(Constraint::UndesiredDay.impact(), ImpactType::Penalty);
    assert_eq!(Constraint::MinimumRest.scope(), ConstraintScope::ShiftPair);
    assert_eq!(
        Constraint::OverlappingShifts.constraint_ref().full_name(),
        "rosterforge/Overlapping shift"
    );
    assert_eq!(Constraint::DEFAULT.len(), 7);
    assert!(!Constraint::DEFAULT.contains(&Constraint::UnassignedShift));
}

#[test]
fn test_score_for_applies_sign_and_level() {
    assert_eq!(Constraint::OverlappingShifts.score_for(30), HardSoftScore::of_hard(-30));
    assert_eq!(Constraint::DesiredDay.score_for(480), HardSoftScore::of_soft(480));
    assert_eq!(Constraint::UndesiredDay.score_for(480), HardSoftScore::of_soft(-480));
    assert_eq!(Constraint::RequiredSkill.score_for(0), HardSoftScore::ZERO);
}

#[test]
fn test_required_skill_subset() {
    let doctor = Employee::new("Amy", ["Doctor", "Cardiology"]);
    let d = draft_day(0);
    let mut s = shift(1, at(d, 6), at(d, 14));

    assert_eq!(Constraint::RequiredSkill.match_shift(&s, Some(&doctor)), 0);
    s.required_skills = ["Doctor", "Cardiology"].iter().map(|x| x.to_string()).collect();
    assert_eq!(Constraint::RequiredSkill.match_shift(&s, Some(&doctor)), 0);
    s.required_skills.insert("Nurse".to_string());
    assert_eq!(Constraint::RequiredSkill.match_shift(&s, Some(&doctor)), 1);
    assert_eq!(Constraint::RequiredSkill.match_shift(&s, None), 0);
}

#[test]
fn test_unassigned_match() {
    let d = draft_day(0);
    let s = shift(1, at(d, 6), at(d, 14));
    let amy = Employee::new("Amy", ["Doctor"]);

    assert_eq!(Constraint::UnassignedShift.match_shift(&s, None), 1);
    assert_eq!(Constraint::UnassignedShift.match_shift(&s, Some(&amy)), 0);
}

#[test]
fn test_overlap_minutes() {
    let d = draft_day(0);
    let a = shift(1, at(d, 6), at(d, 14));
    let b = shift(2, at_hm(d, 13, 30), at(d, 22));
    let c = shift(3, at(d, 14), at(d, 22));

    assert_eq!(overlap_minutes(&a, &b), 30);
    assert_eq!(overlap_minutes(&b, &a), 30);
    assert_eq!(overlap_minutes(&a, &c), 0);
}

#[test]
fn test_rest_shortfall_nine_hour_gap() {
    let a = shift(1, at(draft_day(0), 12), at(draft_day(0), 20));
    let b = shift(2, at(draft_day(1), 5), at(draft_day(1), 13));

    assert_eq!(rest_shortfall_minutes(&a, &b), 60);
    assert_eq!(rest_shortfall_minutes(&b, &a), 60);
}

#[test]
fn test_rest_shortfall_edges() {
    let d = draft_day(0);
    let a = shift(1, at(d, 6), at(d, 14));
    let back_to_back = shift(2, at(d, 14), at(d, 22));
    let exactly_ten = shift(3, at(draft_day(1), 0), at(draft_day(1), 8));
    let overlapping = shift(4, at(d, 10), at(d, 18));

    assert_eq!(rest_shortfall_minutes(&a, &back_to_back), 600);
    assert_eq!(rest_shortfall_minutes(&a, &exactly_ten), 0);
    assert_eq!(rest_shortfall_minutes(&a, &overlapping), 0);
}

#[test]
fn test_one_shift_per_day_uses_start_date() {
    let d = draft_day(0);
    let morning = shift(1, at(d, 6), at(d, 10));
    let evening = shift(2, at(d, 22), at(draft_day(1), 6));
    let next = shift(3, at(draft_day(1), 8), at(draft_day(1), 12));

    assert_eq!(Constraint::OneShiftPerDay.match_pair(&morning, &evening), 1);
    assert_eq!(Constraint::OneShiftPerDay.match_pair(&evening, &next), 0);
}

#[test]
fn test_availability_matches_by_type() {
    let d = draft_day(0);
    let s = shift(1, at(d, 6), at(d, 14));
    let unavailable = Availability::new(0, d, AvailabilityType::Unavailable);
    let desired = Availability::new(0, d, AvailabilityType::Desired);

    assert_eq!(Constraint::UnavailableDay.match_availability(&s, &unavailable), 480);
    assert_eq!(Constraint::DesiredDay.match_availability(&s, &unavailable), 0);
    assert_eq!(Constraint::DesiredDay.match_availability(&s, &desired), 480);
    assert_eq!(Constraint::UndesiredDay.match_availability(&s, &desired), 0);
}

#[test]
fn test_pair_window_covers_day_and_rest() {
    let d = draft_day(0);
    let (lower, upper) = pair_window(at(d, 6), at(d, 14), 8 * 60);

    assert_eq!(lower, at(d, 0) - chrono::Duration::hours(12));
    assert_eq!(upper, at(draft_day(1), 0));
}

#[test]
fn test_constraint_set_dedup_and_policy() {
    let set = ConstraintSet::new([Constraint::RequiredSkill, Constraint::RequiredSkill]);
    assert_eq!(set.len(), 1);
    assert_eq!(ConstraintSet::default().len(), 7);
    assert!(ConstraintSet::for_policy(true).contains(Constraint::UnassignedShift));
    assert!(!ConstraintSet::for_policy(false).contains(Constraint::UnassignedShift));
}

#[test]
fn test_validate_rejects_malformed_shift() {
    let d = draft_day(0);
    let roster = RosterBuilder::new()
        .employee("Amy", &["Nurse"])
        .shift(at(d, 14), at(d, 14), &[])
        .build();

    let err = ConstraintSet::default().validate(&roster).unwrap_err();
    assert!(matches!(err, rosterforge_core::RosterForgeError::ConstraintEvaluation(_)));
}

#[test]
fn test_validate_rejects_dangling_employee() {
    let d = draft_day(0);
    let mut roster = RosterBuilder::new()
        .employee("Amy", &["Nurse"])
        .shift(at(d, 6), at(d, 14), &[])
        .build();
    roster.shifts[0].employee_idx = Some(5);

    assert!(ConstraintSet::default().validate(&roster).is_err());
}

#[test]
fn test_evaluate_all_overlap_scenario() {
    let d = draft_day(0);
    let roster = RosterBuilder::new()
        .employee("Amy", &["Nurse"])
        .assigned_shift(at(d, 6), at(d, 14), &["Nurse"], "Amy")
        .assigned_shift(at_hm(d, 13, 30), at(d, 22), &["Nurse"], "Amy")
        .build();

    let analysis = ConstraintSet::default().analyze(&roster);
    let overlap = analysis.get(Constraint::OverlappingShifts).unwrap();
    assert_eq!(overlap.score, HardSoftScore::of_hard(-30));
    assert_eq!(overlap.match_count(), 1);
    // Same day as well, so the pair also counts once for one-shift-per-day.
    assert_eq!(
        analysis.get(Constraint::OneShiftPerDay).unwrap().score,
        HardSoftScore::of_hard(-1)
    );
    assert!(analysis.score.hard() <= -30);
}

#[test]
fn test_duplicate_availabilities_compound() {
    let d = draft_day(0);
    let roster = RosterBuilder::new()
        .employee("Amy", &[])
        .availability("Amy", d, AvailabilityType::Desired)
        .availability("Amy", d, AvailabilityType::Desired)
        .assigned_shift(at(d, 6), at(d, 14), &[], "Amy")
        .build();

    assert_eq!(
        ConstraintSet::default().evaluate_all(&roster),
        HardSoftScore::of_soft(960)
    );
}
