use rand::rngs::StdRng;
use rand::SeedableRng;
use rosterforge_core::HardSoftScore;

use super::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

#[test]
fn test_hill_climbing() {
    let acceptor = HillClimbingAcceptor::new();
    let mut rng = rng();
    let last = HardSoftScore::of(-1, -10);

    assert!(acceptor.is_accepted(&last, &HardSoftScore::of(-1, -5), &mut rng));
    assert!(acceptor.is_accepted(&last, &last, &mut rng));
    assert!(!acceptor.is_accepted(&last, &HardSoftScore::of(-1, -11), &mut rng));
}

#[test]
fn test_hard_improvement_dominates_soft() {
    let last = HardSoftScore::of(-2, 0);
    let better_hard_worse_soft = HardSoftScore::of(-1, -100_000);
    let mut rng = rng();

    let mut la = LateAcceptanceAcceptor::new(3);
    la.phase_started(&last);
    let mut sa = SimulatedAnnealingAcceptor::new(0.0, 1.0);
    sa.phase_started(&last);

    assert!(HillClimbingAcceptor::new().is_accepted(&last, &better_hard_worse_soft, &mut rng));
    assert!(la.is_accepted(&last, &better_hard_worse_soft, &mut rng));
    assert!(sa.is_accepted(&last, &better_hard_worse_soft, &mut rng));
}

#[test]
fn test_late_acceptance_uses_history() {
    let mut acceptor = LateAcceptanceAcceptor::new(2);
    let mut rng = rng();
    acceptor.phase_started(&HardSoftScore::of(0, -100));

    // Worse than last step but as good as the late score.
    assert!(acceptor.is_accepted(&HardSoftScore::of(0, -50), &HardSoftScore::of(0, -100), &mut rng));
    assert!(!acceptor.is_accepted(&HardSoftScore::of(0, -50), &HardSoftScore::of(0, -101), &mut rng));

    acceptor.step_ended(&HardSoftScore::of(0, -50));
    acceptor.step_ended(&HardSoftScore::of(0, -40));
    // History now holds -50 at the current slot.
    assert!(!acceptor.is_accepted(&HardSoftScore::of(0, -40), &HardSoftScore::of(0, -60), &mut rng));
    assert!(acceptor.is_accepted(&HardSoftScore::of(0, -40), &HardSoftScore::of(0, -50), &mut rng));
}

#[test]
fn test_late_acceptance_zero_size_is_one() {
    assert_eq!(LateAcceptanceAcceptor::new(0).late_acceptance_size(), 1);
}

#[test]
fn test_simulated_annealing_probability() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(10.0, 0.5);
    acceptor.phase_started(&HardSoftScore::ZERO);
    let last = HardSoftScore::of(0, 0);

    assert_eq!(acceptor.acceptance_probability(&last, &HardSoftScore::of(0, 1)), 1.0);
    let p = acceptor.acceptance_probability(&last, &HardSoftScore::of(0, -10));
    assert!((p - (-1.0f64).exp()).abs() < 1e-9);
    // A hard point is a million soft points.
    assert!(acceptor.acceptance_probability(&last, &HardSoftScore::of(-1, 0)) < 1e-100);

    acceptor.step_ended(&last);
    assert_eq!(acceptor.current_temperature(), 5.0);
}

#[test]
fn test_simulated_annealing_cold_rejects_worse() {
    let acceptor = SimulatedAnnealingAcceptor::new(0.0, 1.0);
    let mut rng = rng();
    let last = HardSoftScore::of(0, -1);

    assert!(!acceptor.is_accepted(&last, &HardSoftScore::of(0, -2), &mut rng));
    assert!(acceptor.is_accepted(&last, &last, &mut rng));
}

#[test]
fn test_simulated_annealing_hot_accepts_some_worse() {
    let acceptor = SimulatedAnnealingAcceptor::new(1_000_000.0, 1.0);
    let mut rng = rng();
    let last = HardSoftScore::of(0, 0);
    let worse = HardSoftScore::of(0, -1);

    let accepted = (0..100)
        .filter(|_| acceptor.is_accepted(&last, &worse, &mut rng))
        .count();
    assert!(accepted > 90);
}
