//! Builds solver components from configuration.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rosterforge_config::{AcceptorConfig, SolverConfig};
use rosterforge_core::Result;

use crate::acceptor::{
    Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor, SimulatedAnnealingAcceptor,
};
use crate::termination::{
    BestScoreTermination, ExternalTermination, OrTermination, StepCountTermination,
    TimeTermination, UnimprovedTimeTermination,
};

/// Builder for constructing acceptors from configuration.
pub struct AcceptorBuilder;

impl AcceptorBuilder {
    /// Builds an acceptor from configuration.
    pub fn build(config: &AcceptorConfig) -> Box<dyn Acceptor> {
        match config {
            AcceptorConfig::HillClimbing => Box::new(HillClimbingAcceptor::new()),
            AcceptorConfig::SimulatedAnnealing(sa) => Box::new(SimulatedAnnealingAcceptor::new(
                sa.starting_temperature,
                sa.decay_rate,
            )),
            AcceptorConfig::LateAcceptance(la) => {
                Box::new(LateAcceptanceAcceptor::new(la.late_acceptance_size))
            }
        }
    }
}

/// Builder for the composite termination of one solve.
pub struct TerminationBuilder;

impl TerminationBuilder {
    /// Combines the configured limits and the external cancellation flag.
    ///
    /// The flag comes first so a cancellation names the reason even when a
    /// limit fires on the same step. Without any configured limit the
    /// default time budget applies.
    pub fn build(config: &SolverConfig, terminate_flag: Arc<AtomicBool>) -> Result<OrTermination> {
        let limits = &config.termination;
        let mut termination = OrTermination::default();
        termination.push(ExternalTermination::new(terminate_flag));

        if let Some(target) = limits.best_score_limit()? {
            termination.push(BestScoreTermination::new(target));
        }
        if let Some(limit) = config.effective_time_limit() {
            termination.push(TimeTermination::new(limit));
        }
        if let Some(limit) = limits.step_count_limit {
            termination.push(StepCountTermination::new(limit));
        }
        if let Some(limit) = limits.unimproved_time_limit() {
            termination.push(UnimprovedTimeTermination::new(limit));
        }
        Ok(termination)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rosterforge_config::{LateAcceptanceConfig, SimulatedAnnealingConfig};
    use rosterforge_core::{HardSoftScore, RosterForgeError};

    use super::*;

    #[test]
    fn test_acceptor_builder_variants() {
        let _hc = AcceptorBuilder::build(&AcceptorConfig::HillClimbing);
        let _sa = AcceptorBuilder::build(&AcceptorConfig::SimulatedAnnealing(
            SimulatedAnnealingConfig {
                starting_temperature: 10.0,
                decay_rate: 0.5,
            },
        ));
        let la = AcceptorBuilder::build(&AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: 5,
        }));
        assert!(format!("{la:?}").contains("late_acceptance_size: 5"));
    }

    #[test]
    fn test_default_config_has_flag_and_time_budget() {
        let flag = Arc::new(AtomicBool::new(false));
        let termination = TerminationBuilder::build(&SolverConfig::default(), flag).unwrap();
        assert_eq!(termination.len(), 2);
    }

    #[test]
    fn test_all_limits() {
        let mut config = SolverConfig::default()
            .with_time_limit(Duration::from_secs(5))
            .with_best_score_limit(HardSoftScore::ZERO);
        config.termination.step_count_limit = Some(100);
        config.termination.unimproved_seconds_spent_limit = Some(2);

        let flag = Arc::new(AtomicBool::new(false));
        let termination = TerminationBuilder::build(&config, flag).unwrap();
        assert_eq!(termination.len(), 5);
    }

    #[test]
    fn test_step_limit_alone_drops_default_time_budget() {
        let mut config = SolverConfig::default();
        config.termination.step_count_limit = Some(10);
        let flag = Arc::new(AtomicBool::new(false));
        assert_eq!(TerminationBuilder::build(&config, flag).unwrap().len(), 2);
    }

    #[test]
    fn test_best_score_limit_alone_keeps_time_budget() {
        let config = SolverConfig::default().with_best_score_limit(HardSoftScore::of(0, 1));
        let flag = Arc::new(AtomicBool::new(false));
        let termination = TerminationBuilder::build(&config, flag).unwrap();
        assert_eq!(termination.len(), 3);
        assert!(format!("{termination:?}").contains("TimeTermination"));
    }

    #[test]
    fn test_bad_best_score_limit_is_config_error() {
        let mut config = SolverConfig::default();
        config.termination.best_score_limit = Some("zero".to_string());
        let flag = Arc::new(AtomicBool::new(false));
        let err = TerminationBuilder::build(&config, flag).unwrap_err();
        assert!(matches!(err, RosterForgeError::Config(_)));
    }
}
