//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"
        random_seed = 42

        [termination]
        seconds_spent_limit = 30
        step_count_limit = 10000

        [construction_heuristic]
        construction_heuristic_type = "first_fit"

        [local_search.acceptor]
        type = "late_acceptance"
        late_acceptance_size = 200

        [local_search.move_selector]
        swap_probability = 0.5

        [score_director]
        penalize_unassigned = true
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.termination.seconds_spent_limit, Some(30));
    assert_eq!(config.termination.step_count_limit, Some(10000));
    assert_eq!(
        config.construction_heuristic.construction_heuristic_type,
        ConstructionHeuristicType::FirstFit
    );
    assert_eq!(
        config.local_search.acceptor,
        AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: 200
        })
    );
    assert_eq!(config.local_search.move_selector.swap_probability, 0.5);
    assert!(config.score_director.penalize_unassigned);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: full_assert
        termination:
          millis_spent_limit: 500
          best_score_limit: "0hard/-100soft"
        local_search:
          acceptor:
            type: simulated_annealing
            starting_temperature: 50
            decay_rate: 0.99
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(500)));
    assert_eq!(
        config.termination.best_score_limit().unwrap(),
        Some(HardSoftScore::of(0, -100))
    );
    assert_eq!(
        config.local_search.acceptor,
        AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig {
            starting_temperature: 50.0,
            decay_rate: 0.99,
        })
    );
}

#[test]
fn test_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();

    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.environment_mode, EnvironmentMode::NonReproducible);
    assert_eq!(
        config.construction_heuristic.construction_heuristic_type,
        ConstructionHeuristicType::BestFit
    );
    assert_eq!(
        config.local_search.acceptor,
        AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: 400
        })
    );
    assert_eq!(config.local_search.move_selector.swap_probability, 0.2);
    assert!(!config.score_director.penalize_unassigned);
    assert_eq!(config.time_limit(), None);
    assert_eq!(config.effective_time_limit(), Some(DEFAULT_TIME_LIMIT));
    assert_eq!(config.effective_seed(), None);
}

#[test]
fn test_effective_time_limit_with_other_limit() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        step_count_limit = 100
    "#,
    )
    .unwrap();

    assert_eq!(config.effective_time_limit(), None);
}

#[test]
fn test_best_score_limit_alone_keeps_default_budget() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        best_score_limit = "0hard/1soft"
    "#,
    )
    .unwrap();

    assert!(config.termination.has_any_limit());
    assert!(!config.termination.has_bounding_limit());
    assert_eq!(config.effective_time_limit(), Some(DEFAULT_TIME_LIMIT));
}

#[test]
fn test_huge_time_limit_saturates() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(u64::MAX),
        millis_spent_limit: Some(500),
        ..TerminationConfig::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(u64::MAX)));
}

#[test]
fn test_seconds_and_millis_add_up() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(2),
        millis_spent_limit: Some(250),
        ..TerminationConfig::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(2250)));
}

#[test]
fn test_effective_seed() {
    let reproducible = SolverConfig {
        environment_mode: EnvironmentMode::Reproducible,
        ..SolverConfig::default()
    };
    assert_eq!(reproducible.effective_seed(), Some(0));
    assert_eq!(reproducible.with_random_seed(9).effective_seed(), Some(9));
}

#[test]
fn test_invalid_values_rejected() {
    let bad_probability = r#"
        [local_search.move_selector]
        swap_probability = 1.5
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(bad_probability),
        Err(ConfigError::Invalid(_))
    ));

    let bad_size = r#"
        [local_search.acceptor]
        type = "late_acceptance"
        late_acceptance_size = 0
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(bad_size),
        Err(ConfigError::Invalid(_))
    ));

    let bad_score = r#"
        [termination]
        best_score_limit = "zero"
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(bad_score),
        Err(ConfigError::Invalid(_))
    ));

    assert!(matches!(
        SolverConfig::from_toml_str("environment_mode = \"turbo\""),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_time_limit(Duration::from_millis(1500))
        .with_acceptor(AcceptorConfig::HillClimbing)
        .with_best_score_limit(HardSoftScore::ZERO)
        .with_construction_heuristic(ConstructionHeuristicType::None)
        .with_penalize_unassigned(true);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
    assert_eq!(config.local_search.acceptor, AcceptorConfig::HillClimbing);
    assert_eq!(
        config.termination.best_score_limit().unwrap(),
        Some(HardSoftScore::ZERO)
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_by_extension() {
    let dir = std::env::temp_dir();
    let toml_path = dir.join(format!("rosterforge-config-{}.toml", std::process::id()));
    let yaml_path = dir.join(format!("rosterforge-config-{}.yaml", std::process::id()));
    std::fs::write(&toml_path, "random_seed = 5\n").unwrap();
    std::fs::write(&yaml_path, "random_seed: 6\n").unwrap();

    assert_eq!(SolverConfig::load(&toml_path).unwrap().random_seed, Some(5));
    assert_eq!(SolverConfig::load(&yaml_path).unwrap().random_seed, Some(6));

    std::fs::remove_file(&toml_path).unwrap();
    std::fs::remove_file(&yaml_path).unwrap();
}

#[test]
fn test_missing_file_is_io_error() {
    let result = SolverConfig::load("/nonexistent/rosterforge/solver.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_into_roster_error() {
    let err: RosterForgeError = ConfigError::Invalid("bad".to_string()).into();
    assert!(matches!(err, RosterForgeError::Config(msg) if msg.contains("bad")));
}
