//! Configuration system for RosterForge.
//!
//! Load solver configuration from TOML or YAML to control termination,
//! construction, the local search acceptor and the scoring policy without
//! code changes.
//!
//! # Examples
//!
//! ```
//! use rosterforge_config::{AcceptorConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     best_score_limit = "0hard/0soft"
//!
//!     [local_search.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert!(matches!(config.local_search.acceptor, AcceptorConfig::LateAcceptance(_)));
//! ```
//!
//! Use default config when the file is missing:
//!
//! ```
//! use rosterforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use rosterforge_core::{HardSoftScore, RosterForgeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time budget used when no termination limit is configured.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for RosterForgeError {
    fn from(err: ConfigError) -> Self {
        RosterForgeError::Config(err.to_string())
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(default)]
    pub termination: TerminationConfig,

    #[serde(default)]
    pub construction_heuristic: ConstructionHeuristicConfig,

    #[serde(default)]
    pub local_search: LocalSearchConfig,

    #[serde(default)]
    pub score_director: ScoreDirectorConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` are parsed as YAML, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses and validates configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.termination.best_score_limit()?;
        match &self.local_search.acceptor {
            AcceptorConfig::LateAcceptance(la) if la.late_acceptance_size == 0 => {
                return Err(ConfigError::Invalid(
                    "late_acceptance_size must be at least 1".to_string(),
                ));
            }
            AcceptorConfig::SimulatedAnnealing(sa) => {
                if !(sa.starting_temperature > 0.0) {
                    return Err(ConfigError::Invalid(
                        "starting_temperature must be positive".to_string(),
                    ));
                }
                if !(sa.decay_rate > 0.0 && sa.decay_rate <= 1.0) {
                    return Err(ConfigError::Invalid(
                        "decay_rate must be in (0, 1]".to_string(),
                    ));
                }
            }
            _ => {}
        }
        let p = self.local_search.move_selector.swap_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid(format!(
                "swap_probability must be within [0, 1], got {p}"
            )));
        }
        Ok(())
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.termination.seconds_spent_limit = None;
        self.termination.millis_spent_limit = Some(limit.as_millis() as u64);
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_acceptor(mut self, acceptor: AcceptorConfig) -> Self {
        self.local_search.acceptor = acceptor;
        self
    }

    /// Stops the solve as soon as this score is reached.
    pub fn with_best_score_limit(mut self, score: HardSoftScore) -> Self {
        self.termination.best_score_limit = Some(score.to_string());
        self
    }

    pub fn with_construction_heuristic(mut self, kind: ConstructionHeuristicType) -> Self {
        self.construction_heuristic.construction_heuristic_type = kind;
        self
    }

    pub fn with_penalize_unassigned(mut self, penalize: bool) -> Self {
        self.score_director.penalize_unassigned = penalize;
        self
    }

    /// Returns the configured time limit, if any.
    ///
    /// ```
    /// use rosterforge_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::from_toml_str(r#"
    ///     [termination]
    ///     seconds_spent_limit = 30
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }

    /// The time limit that actually bounds the solve.
    ///
    /// Falls back to [`DEFAULT_TIME_LIMIT`] unless a step count or unimproved
    /// limit is configured. A best score limit alone may never be reached.
    pub fn effective_time_limit(&self) -> Option<Duration> {
        match self.termination.time_limit() {
            Some(limit) => Some(limit),
            None if !self.termination.has_bounding_limit() => Some(DEFAULT_TIME_LIMIT),
            None => None,
        }
    }

    /// Seed to use for the solver's random generator, if deterministic.
    ///
    /// Reproducible modes without an explicit seed use seed 0.
    pub fn effective_seed(&self) -> Option<u64> {
        match (self.random_seed, self.environment_mode) {
            (Some(seed), _) => Some(seed),
            (None, EnvironmentMode::NonReproducible) => None,
            (None, _) => Some(0),
        }
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Reproducible mode with deterministic behavior.
    Reproducible,

    /// Reproducible, and re-scores from scratch after every step.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_asserted(self) -> bool {
        self == EnvironmentMode::FullAssert
    }
}

/// Termination configuration. All set limits combine with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds.
    pub millis_spent_limit: Option<u64>,

    /// Maximum seconds without a new best score.
    pub unimproved_seconds_spent_limit: Option<u64>,

    /// Maximum number of local search steps.
    pub step_count_limit: Option<u64>,

    /// Target best score to achieve (as string, e.g., "0hard/0soft").
    pub best_score_limit: Option<String>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if self.seconds_spent_limit.is_some() || self.millis_spent_limit.is_some() {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    /// Returns the unimproved time limit as a Duration, if any.
    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        self.unimproved_seconds_spent_limit.map(Duration::from_secs)
    }

    /// Parses the best score limit.
    pub fn best_score_limit(&self) -> Result<Option<HardSoftScore>, ConfigError> {
        self.best_score_limit
            .as_deref()
            .map(|s| {
                s.parse::<HardSoftScore>()
                    .map_err(|e| ConfigError::Invalid(format!("best_score_limit: {e}")))
            })
            .transpose()
    }

    /// True if a limit is set that fires eventually on every solve.
    pub fn has_bounding_limit(&self) -> bool {
        self.seconds_spent_limit.is_some()
            || self.millis_spent_limit.is_some()
            || self.unimproved_seconds_spent_limit.is_some()
            || self.step_count_limit.is_some()
    }

    pub fn has_any_limit(&self) -> bool {
        self.seconds_spent_limit.is_some()
            || self.millis_spent_limit.is_some()
            || self.unimproved_seconds_spent_limit.is_some()
            || self.step_count_limit.is_some()
            || self.best_score_limit.is_some()
    }
}

/// Construction heuristic configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionHeuristicConfig {
    #[serde(default)]
    pub construction_heuristic_type: ConstructionHeuristicType,
}

/// Construction heuristic types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristicType {
    /// First employee whose assignment adds no hard penalty.
    FirstFit,

    /// Employee with the best score delta.
    #[default]
    BestFit,

    /// Leave unassigned shifts unassigned.
    None,
}

/// Local search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    #[serde(default)]
    pub acceptor: AcceptorConfig,

    #[serde(default)]
    pub move_selector: MoveSelectorConfig,
}

/// Acceptor configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Hill climbing (only accept non-worsening moves).
    HillClimbing,

    /// Simulated annealing acceptor.
    SimulatedAnnealing(SimulatedAnnealingConfig),

    /// Late acceptance acceptor.
    LateAcceptance(LateAcceptanceConfig),
}

impl Default for AcceptorConfig {
    fn default() -> Self {
        AcceptorConfig::LateAcceptance(LateAcceptanceConfig::default())
    }
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Starting temperature, in soft score units.
    #[serde(default = "default_starting_temperature")]
    pub starting_temperature: f64,

    /// Multiplier applied to the temperature after every step.
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,
}

fn default_starting_temperature() -> f64 {
    1000.0
}

fn default_decay_rate() -> f64 {
    0.9999
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            starting_temperature: default_starting_temperature(),
            decay_rate: default_decay_rate(),
        }
    }
}

/// Late acceptance configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    /// Size of late acceptance list.
    #[serde(default = "default_late_acceptance_size")]
    pub late_acceptance_size: usize,
}

fn default_late_acceptance_size() -> usize {
    400
}

impl Default for LateAcceptanceConfig {
    fn default() -> Self {
        Self {
            late_acceptance_size: default_late_acceptance_size(),
        }
    }
}

/// Move selector configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MoveSelectorConfig {
    /// Chance of proposing a swap instead of a change move.
    #[serde(default = "default_swap_probability")]
    pub swap_probability: f64,
}

fn default_swap_probability() -> f64 {
    0.2
}

impl Default for MoveSelectorConfig {
    fn default() -> Self {
        Self {
            swap_probability: default_swap_probability(),
        }
    }
}

/// Score director configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreDirectorConfig {
    /// Adds a hard penalty of one per unassigned shift.
    #[serde(default)]
    pub penalize_unassigned: bool,
}

#[cfg(test)]
mod tests;
