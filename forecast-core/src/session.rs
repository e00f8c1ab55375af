//! Orchestrator for one forecast screen.
//!
//! Owns the published state for the currently selected city: it invokes the
//! forecast client, feeds the decoded response through the projection engine,
//! and publishes the resulting projection set in a single step so observers
//! never see a partial update.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::client::{FetchError, FetchForecast};
use crate::projection::{self, Projections};

/// City used when no prior selection exists.
pub const DEFAULT_CITY: &str = "Asan";

/// Lifecycle of the session: `Failed` and `Ready` both re-enter `Loading`
/// on the next `request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// One published failure. `seq` increments once per failed fetch, so
/// observers can tell a fresh failure from a stale one.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNotice {
    pub seq: u64,
    pub message: String,
}

/// The state-holder handed to the UI collaborator.
///
/// `projections` keeps the last successful set across failures; it is only
/// replaced wholesale, never field by field.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: Phase,
    pub city: Option<String>,
    pub projections: Option<Projections>,
    pub error: Option<ErrorNotice>,
}

impl SessionState {
    fn new() -> Self {
        Self { phase: Phase::Idle, city: None, projections: None, error: None }
    }
}

/// Forecast orchestrator with last-request-wins supersession.
///
/// At most one outstanding result is acted on: each `request` stamps a new
/// generation before awaiting the network, and a completion whose generation
/// is no longer current is discarded without touching the published state.
#[derive(Debug)]
pub struct ForecastSession {
    fetcher: Box<dyn FetchForecast>,
    hourly_cap: usize,
    generation: AtomicU64,
    state: Mutex<SessionState>,
}

impl ForecastSession {
    pub fn new(fetcher: Box<dyn FetchForecast>) -> Self {
        Self::with_hourly_cap(fetcher, projection::DEFAULT_HOURLY_CAP)
    }

    pub fn with_hourly_cap(fetcher: Box<dyn FetchForecast>, hourly_cap: usize) -> Self {
        Self {
            fetcher,
            hourly_cap,
            generation: AtomicU64::new(0),
            state: Mutex::new(SessionState::new()),
        }
    }

    /// Snapshot of the published state, cloned under the lock so observers
    /// never read a torn update.
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().expect("session state lock poisoned").clone()
    }

    /// Fetch and publish projections for `city`.
    ///
    /// Supersedes any in-flight request: the superseded call is not
    /// cancelled, its result is simply ignored on completion.
    pub async fn request(&self, city: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.lock().expect("session state lock poisoned");
            state.phase = Phase::Loading;
            state.city = Some(city.to_string());
        }

        // The network call runs outside the lock; publication below is the
        // single synchronization point.
        let result = self.fetcher.fetch(city).await;

        let mut state = self.state.lock().expect("session state lock poisoned");
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Discarding superseded forecast result for '{city}'");
            return;
        }

        match result {
            Ok(response) => {
                state.phase = Phase::Ready;
                state.projections = Some(projection::derive(&response, self.hourly_cap));
                log::info!("Published forecast projections for '{city}'");
            }
            Err(err) => {
                state.phase = Phase::Failed;
                let seq = state.error.as_ref().map_or(0, |e| e.seq) + 1;
                state.error = Some(ErrorNotice { seq, message: user_message(&err) });
                log::warn!("Forecast fetch for '{city}' failed: {err}");
            }
        }
    }

    /// Re-issue the current city's request, falling back to the default city
    /// when nothing was requested yet.
    pub async fn retry(&self) {
        let city = self
            .snapshot()
            .city
            .unwrap_or_else(|| DEFAULT_CITY.to_string());
        self.request(&city).await;
    }
}

fn user_message(err: &FetchError) -> String {
    format!("Error fetching weather: {err}")
}
