//! Solve lifecycle per roster id.
//!
//! Every solve runs on its own worker thread. The job map holds at most one
//! job per roster id; a second start while one is active is rejected, not
//! queued. Status queries and cancellation only take the job map lock for a
//! lookup, so they never wait on a running solve.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;
use rosterforge_config::SolverConfig;
use rosterforge_core::{EmployeeSchedule, Result, RosterForgeError, RosterId, SolverStatus};
use tracing::{debug, error};

use crate::scope::BestSolutionListener;
use crate::solver::{SolveOutcome, Solver};

/// Internal job state.
struct SolveJob {
    status: SolverStatus,
    terminate_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

type JobMap = Arc<Mutex<HashMap<RosterId, SolveJob>>>;

/// Runs solves asynchronously, one at a time per roster id.
///
/// Status moves `NotSolving -> SolvingScheduled -> SolvingActive` and back to
/// `NotSolving` once the completion or error callback has returned, also
/// when the solve panicked.
pub struct SolverManager {
    config: SolverConfig,
    jobs: JobMap,
}

impl SolverManager {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Starts solving `schedule` on a worker thread.
    ///
    /// `on_complete` receives the best roster found, including after a
    /// cancellation. `on_error` receives failures; the status still returns
    /// to `NotSolving` afterwards.
    pub fn solve<C, E>(
        &self,
        roster_id: impl Into<RosterId>,
        schedule: EmployeeSchedule,
        on_complete: C,
        on_error: E,
    ) -> Result<()>
    where
        C: FnOnce(SolveOutcome) + Send + 'static,
        E: FnOnce(RosterId, RosterForgeError) + Send + 'static,
    {
        self.spawn(roster_id.into(), schedule, None, on_complete, on_error)
    }

    /// Like [`SolverManager::solve`], also calling `on_best` on the worker
    /// with every new best roster.
    pub fn solve_and_listen<L, C, E>(
        &self,
        roster_id: impl Into<RosterId>,
        schedule: EmployeeSchedule,
        on_best: L,
        on_complete: C,
        on_error: E,
    ) -> Result<()>
    where
        L: FnMut(EmployeeSchedule) + Send + 'static,
        C: FnOnce(SolveOutcome) + Send + 'static,
        E: FnOnce(RosterId, RosterForgeError) + Send + 'static,
    {
        self.spawn(
            roster_id.into(),
            schedule,
            Some(Box::new(on_best)),
            on_complete,
            on_error,
        )
    }

    fn spawn<C, E>(
        &self,
        roster_id: RosterId,
        schedule: EmployeeSchedule,
        listener: Option<BestSolutionListener>,
        on_complete: C,
        on_error: E,
    ) -> Result<()>
    where
        C: FnOnce(SolveOutcome) + Send + 'static,
        E: FnOnce(RosterId, RosterForgeError) + Send + 'static,
    {
        let mut jobs = self.jobs.lock();
        if jobs
            .get(&roster_id)
            .is_some_and(|job| job.status.is_solving())
        {
            return Err(RosterForgeError::AlreadySolving(roster_id));
        }

        let terminate_flag = Arc::new(AtomicBool::new(false));
        let worker = Worker {
            jobs: Arc::clone(&self.jobs),
            roster_id: roster_id.clone(),
            terminate_flag: Arc::clone(&terminate_flag),
        };
        let config = self.config.clone();

        // The worker blocks on the job map lock until the job is inserted.
        let handle = thread::Builder::new()
            .name(format!("rosterforge-solve-{roster_id}"))
            .spawn(move || worker.run(config, schedule, listener, on_complete, on_error))
            .map_err(|e| RosterForgeError::Internal(format!("failed to spawn solver thread: {e}")))?;

        jobs.insert(
            roster_id.clone(),
            SolveJob {
                status: SolverStatus::SolvingScheduled,
                terminate_flag,
                handle: Some(handle),
            },
        );
        debug!(event = "solve_scheduled", roster_id = %roster_id);
        Ok(())
    }

    /// Current status; `NotSolving` for unknown ids.
    pub fn status(&self, roster_id: &str) -> SolverStatus {
        self.jobs
            .lock()
            .get(roster_id)
            .map_or(SolverStatus::NotSolving, |job| job.status)
    }

    pub fn is_solving(&self, roster_id: &str) -> bool {
        self.status(roster_id).is_solving()
    }

    /// Requests cooperative cancellation. Returns false if nothing was solving.
    pub fn terminate(&self, roster_id: &str) -> bool {
        let jobs = self.jobs.lock();
        match jobs.get(roster_id) {
            Some(job) if job.status.is_solving() => {
                job.terminate_flag.store(true, Ordering::SeqCst);
                debug!(event = "terminate_requested", roster_id = %roster_id);
                true
            }
            _ => false,
        }
    }

    /// Waits for the worker of `roster_id` to exit. Returns false if there
    /// was no worker to wait for.
    pub fn join(&self, roster_id: &str) -> bool {
        let handle = self
            .jobs
            .lock()
            .get_mut(roster_id)
            .and_then(|job| job.handle.take());
        match handle {
            Some(handle) => {
                let _ = handle.join();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for SolverManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverManager")
            .field("config", &self.config)
            .field("job_count", &self.jobs.lock().len())
            .finish()
    }
}

/// The worker side of one job.
///
/// Dropping it marks the job `NotSolving`, so a panicking callback cannot
/// leave the roster stuck in a solving state.
struct Worker {
    jobs: JobMap,
    roster_id: RosterId,
    terminate_flag: Arc<AtomicBool>,
}

impl Worker {
    fn run<C, E>(
        self,
        config: SolverConfig,
        schedule: EmployeeSchedule,
        listener: Option<BestSolutionListener>,
        on_complete: C,
        on_error: E,
    ) where
        C: FnOnce(SolveOutcome),
        E: FnOnce(RosterId, RosterForgeError),
    {
        self.set_status(SolverStatus::SolvingActive);
        debug!(event = "solve_active", roster_id = %self.roster_id);

        let mut solver = Solver::new(config).with_terminate_flag(Arc::clone(&self.terminate_flag));
        let result = panic::catch_unwind(AssertUnwindSafe(|| match listener {
            Some(listener) => solver.solve_with_listener(schedule, listener),
            None => solver.solve(schedule),
        }))
        .unwrap_or_else(|payload| {
            Err(RosterForgeError::Internal(format!(
                "solver panicked: {}",
                panic_message(payload.as_ref())
            )))
        });

        match result {
            Ok(outcome) => on_complete(outcome),
            Err(err) => {
                error!(event = "solve_failed", roster_id = %self.roster_id, error = %err);
                on_error(self.roster_id.clone(), err);
            }
        }
    }

    /// Updates the job only if it still belongs to this worker.
    fn set_status(&self, status: SolverStatus) {
        let mut jobs = self.jobs.lock();
        if let Some(job) = jobs.get_mut(&self.roster_id) {
            if Arc::ptr_eq(&job.terminate_flag, &self.terminate_flag) {
                job.status = status;
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.set_status(SolverStatus::NotSolving);
        debug!(event = "solve_finished", roster_id = %self.roster_id);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
