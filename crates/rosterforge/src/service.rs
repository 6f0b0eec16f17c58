//! The roster registry and the operations an API layer calls.
//!
//! Each roster id maps to its current schedule. A running solve writes every
//! new best roster back into the registry, so `get_current_solution` shows
//! progress while solving. Lock order is registry first, then the solver
//! manager's job map.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rosterforge_config::SolverConfig;
use rosterforge_core::{
    EmployeeSchedule, HardSoftScore, PublishWindow, Result, RosterForgeError, RosterId,
    SolverStatus,
};
use rosterforge_scoring::{ConstraintSet, ScoreAnalysis, ScoreDirector};
use rosterforge_solver::{SolveOutcome, SolverManager};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::horizon::HorizonGenerator;

struct RosterEntry {
    schedule: EmployeeSchedule,
    score_tx: watch::Sender<Option<HardSoftScore>>,
    last_error: Option<String>,
}

type Registry = Arc<RwLock<HashMap<RosterId, RosterEntry>>>;

/// Owns the rosters, solves them in the background and publishes them.
pub struct RosterService<G: HorizonGenerator> {
    manager: SolverManager,
    rosters: Registry,
    generator: G,
}

impl<G: HorizonGenerator> RosterService<G> {
    pub fn new(config: SolverConfig, generator: G) -> Self {
        Self {
            manager: SolverManager::new(config),
            rosters: Arc::new(RwLock::new(HashMap::new())),
            generator,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        self.manager.config()
    }

    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::for_policy(self.config().score_director.penalize_unassigned)
    }

    /// Validates and scores a schedule.
    fn rescore(&self, schedule: EmployeeSchedule) -> Result<EmployeeSchedule> {
        Ok(ScoreDirector::new(schedule, self.constraints())?.into_solution())
    }

    /// Adds a roster or replaces the stored one, returning its score.
    ///
    /// Fails with `SolveInProgress` while the roster is being solved.
    pub fn register(
        &self,
        roster_id: impl Into<RosterId>,
        schedule: EmployeeSchedule,
    ) -> Result<HardSoftScore> {
        let roster_id = roster_id.into();
        let mut rosters = self.rosters.write();
        if self.manager.is_solving(&roster_id) {
            return Err(RosterForgeError::SolveInProgress(roster_id));
        }

        let mut schedule = self.rescore(schedule)?;
        schedule.solver_status = None;
        let score = schedule.score.unwrap_or(HardSoftScore::ZERO);
        match rosters.get_mut(&roster_id) {
            Some(entry) => {
                entry.schedule = schedule;
                entry.last_error = None;
                entry.score_tx.send_replace(Some(score));
            }
            None => {
                let (score_tx, _) = watch::channel(Some(score));
                rosters.insert(
                    roster_id.clone(),
                    RosterEntry {
                        schedule,
                        score_tx,
                        last_error: None,
                    },
                );
            }
        }
        info!(event = "register", roster_id = %roster_id, score = %score);
        Ok(score)
    }

    /// Snapshot of the roster with its current score and solver status.
    pub fn get_current_solution(&self, roster_id: &str) -> Result<EmployeeSchedule> {
        let rosters = self.rosters.read();
        let entry = rosters
            .get(roster_id)
            .ok_or_else(|| RosterForgeError::UnknownRoster(roster_id.to_string()))?;
        let mut snapshot = entry.schedule.clone();
        snapshot.solver_status = Some(self.manager.status(roster_id));
        Ok(snapshot)
    }

    /// Starts solving the roster in the background.
    ///
    /// Fails with `AlreadySolving` if a solve for this id is active.
    pub fn start_solve(&self, roster_id: &str) -> Result<()> {
        let rosters = self.rosters.write();
        let entry = rosters
            .get(roster_id)
            .ok_or_else(|| RosterForgeError::UnknownRoster(roster_id.to_string()))?;
        let schedule = entry.schedule.clone();

        let on_best = {
            let registry = Arc::clone(&self.rosters);
            let id = roster_id.to_string();
            move |best: EmployeeSchedule| store(&registry, &id, best)
        };
        let on_complete = {
            let registry = Arc::clone(&self.rosters);
            let id = roster_id.to_string();
            move |outcome: SolveOutcome| {
                info!(
                    event = "solve_complete",
                    roster_id = %id,
                    score = %outcome.score,
                    reason = %outcome.termination_reason,
                );
                store(&registry, &id, outcome.solution);
            }
        };
        let on_error = {
            let registry = Arc::clone(&self.rosters);
            move |id: RosterId, err: RosterForgeError| {
                warn!(event = "solve_error", roster_id = %id, error = %err);
                if let Some(entry) = registry.write().get_mut(&id) {
                    entry.last_error = Some(err.to_string());
                }
            }
        };

        self.manager
            .solve_and_listen(roster_id, schedule, on_best, on_complete, on_error)
    }

    /// Requests cancellation of an active solve. A no-op when idle.
    pub fn request_cancel(&self, roster_id: &str) -> Result<()> {
        if !self.rosters.read().contains_key(roster_id) {
            return Err(RosterForgeError::UnknownRoster(roster_id.to_string()));
        }
        self.manager.terminate(roster_id);
        Ok(())
    }

    /// Moves the draft window forward by the publish length and asks the
    /// generator to fill the days that opened at the end of the horizon.
    ///
    /// Fails with `SolveInProgress` unless the roster is `NotSolving`; the
    /// stored roster is only replaced once the generator succeeded.
    pub fn publish(&self, roster_id: &str) -> Result<PublishWindow> {
        let mut rosters = self.rosters.write();
        let entry = rosters
            .get_mut(roster_id)
            .ok_or_else(|| RosterForgeError::UnknownRoster(roster_id.to_string()))?;
        if self.manager.is_solving(roster_id) {
            return Err(RosterForgeError::SolveInProgress(roster_id.to_string()));
        }

        let mut next = entry.schedule.clone();
        let window = next.schedule_state.advance()?;
        self.generator.extend_horizon(&mut next, window)?;
        let next = self.rescore(next)?;
        let score = next.score.unwrap_or(HardSoftScore::ZERO);

        info!(
            event = "publish",
            roster_id = %roster_id,
            first_draft_date = %next.schedule_state.first_draft_date,
            window_start = %window.start,
            window_days = window.days,
            shift_count = next.shifts.len(),
            score = %score,
        );
        entry.schedule = next;
        entry.score_tx.send_replace(Some(score));
        Ok(window)
    }

    /// Per-constraint breakdown of the roster's current score.
    pub fn explain(&self, roster_id: &str) -> Result<ScoreAnalysis> {
        let schedule = {
            let rosters = self.rosters.read();
            rosters
                .get(roster_id)
                .ok_or_else(|| RosterForgeError::UnknownRoster(roster_id.to_string()))?
                .schedule
                .clone()
        };
        Ok(ScoreDirector::new(schedule, self.constraints())?.analyze())
    }

    pub fn status(&self, roster_id: &str) -> SolverStatus {
        self.manager.status(roster_id)
    }

    /// Receiver that sees the roster's score change on every new best,
    /// on completion and on publish.
    pub fn watch_score(&self, roster_id: &str) -> Result<watch::Receiver<Option<HardSoftScore>>> {
        self.rosters
            .read()
            .get(roster_id)
            .map(|entry| entry.score_tx.subscribe())
            .ok_or_else(|| RosterForgeError::UnknownRoster(roster_id.to_string()))
    }

    /// Message of the last failed solve, cleared by the next register.
    pub fn last_error(&self, roster_id: &str) -> Option<String> {
        self.rosters
            .read()
            .get(roster_id)
            .and_then(|entry| entry.last_error.clone())
    }

    /// Registered roster ids, sorted.
    pub fn roster_ids(&self) -> Vec<RosterId> {
        let mut ids: Vec<RosterId> = self.rosters.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// Writes a roster produced by a solve back into the registry.
fn store(registry: &Registry, roster_id: &str, schedule: EmployeeSchedule) {
    let mut rosters = registry.write();
    if let Some(entry) = rosters.get_mut(roster_id) {
        let score = schedule.score;
        entry.schedule = schedule;
        entry.score_tx.send_replace(score);
    }
}
