//! Submission and polling of installation jobs.
//!
//! Refreshes run on short-lived background threads so the owning context
//! never blocks on the network. Each completed fetch replaces the shared
//! board wholesale; overlapping fetches are not prevented, so the last
//! response to resolve wins. A slow response landing after a newer one can
//! transiently show stale data; accepted limitation, matching the
//! backend-authoritative model.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, InstallRequest, InstallationsResponse};
use crate::selection::SelectionSnapshot;

use super::job::InstallBoard;

/// Fixed period between automatic install refreshes.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Submits install jobs and keeps the job/history board fresh.
pub struct InstallOrchestrator {
    /// Shared API client, also handed to fetch threads.
    client: Arc<ApiClient>,
    /// Latest fetched board. Full replacement on every write.
    board: Arc<Mutex<InstallBoard>>,
    /// Error from the most recent fetch, cleared by the next success.
    last_error: Arc<Mutex<Option<String>>>,
    /// Whether any fetch has ever succeeded.
    fetched: Arc<AtomicBool>,
    /// Fetch thread handles, pruned on each refresh.
    handles: Vec<JoinHandle<()>>,
    /// When the last refresh was started.
    last_refresh: Instant,
    /// Whether the periodic refresh is armed.
    auto_refresh: bool,
}

impl InstallOrchestrator {
    /// Creates an orchestrator with an empty board.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            board: Arc::new(Mutex::new(InstallBoard::default())),
            last_error: Arc::new(Mutex::new(None)),
            fetched: Arc::new(AtomicBool::new(false)),
            handles: Vec::new(),
            last_refresh: Instant::now(),
            auto_refresh: true,
        }
    }

    /// Submits an installation for the given selection.
    ///
    /// An empty selection is a local validation failure and never reaches
    /// the network. On success the server's job ids are returned and an
    /// immediate refresh is started.
    pub fn submit(&mut self, snapshot: &SelectionSnapshot) -> Result<Vec<String>, ApiError> {
        if snapshot.is_empty() {
            return Err(ApiError::Validation(
                "pick at least one manifest entry to install".to_string(),
            ));
        }

        let request = InstallRequest {
            models: snapshot.model_names(),
            loras: snapshot.addon_names(),
        };

        let started = self.client.start_installations(&request)?;
        let ids = started.job_ids();
        info!("Installers started: {}", ids.join(", "));

        self.refresh();
        Ok(ids)
    }

    /// Starts a background fetch of jobs and history.
    ///
    /// Stateless from the caller's perspective: whenever the fetch lands it
    /// fully replaces the previous board. In-flight fetches cannot be
    /// cancelled, only superseded.
    pub fn refresh(&mut self) {
        self.handles.retain(|handle| !handle.is_finished());

        let client = Arc::clone(&self.client);
        let board = Arc::clone(&self.board);
        let last_error = Arc::clone(&self.last_error);
        let fetched = Arc::clone(&self.fetched);

        let handle = thread::spawn(move || {
            let result = client.fetch_installations();
            Self::apply(&board, &last_error, &fetched, result);
        });

        self.handles.push(handle);
        self.last_refresh = Instant::now();
    }

    /// Fetches jobs and history on the calling thread.
    ///
    /// Same replacement semantics as [`refresh`](Self::refresh); used by
    /// one-shot commands that want the result immediately.
    pub fn refresh_blocking(&mut self) -> Result<InstallBoard, ApiError> {
        self.last_refresh = Instant::now();
        match self.client.fetch_installations() {
            Ok(response) => {
                Self::apply(&self.board, &self.last_error, &self.fetched, Ok(response));
                Ok(self.board_snapshot())
            }
            Err(err) => {
                warn!("Install refresh failed: {}", err);
                if let Ok(mut guard) = self.last_error.lock() {
                    *guard = Some(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Applies an already-fetched payload to the board.
    ///
    /// Same full-replacement semantics as a poll landing; lets a harness
    /// drive the board without a live backend.
    pub fn ingest(&self, response: InstallationsResponse) {
        Self::apply(&self.board, &self.last_error, &self.fetched, Ok(response));
    }

    /// Applies a fetch result to the shared state.
    fn apply(
        board: &Mutex<InstallBoard>,
        last_error: &Mutex<Option<String>>,
        fetched: &AtomicBool,
        result: Result<InstallationsResponse, ApiError>,
    ) {
        match result {
            Ok(response) => {
                debug!(
                    "Install refresh: {} job(s), {} history entries",
                    response.jobs.len(),
                    response.history.len()
                );
                if let Ok(mut guard) = board.lock() {
                    *guard = InstallBoard {
                        jobs: response.jobs,
                        history: response.history,
                    };
                }
                if let Ok(mut guard) = last_error.lock() {
                    *guard = None;
                }
                fetched.store(true, Ordering::Relaxed);
            }
            Err(err) => {
                warn!("Install refresh failed: {}", err);
                // Board keeps its last-known-good contents.
                if let Ok(mut guard) = last_error.lock() {
                    *guard = Some(err.to_string());
                }
            }
        }
    }

    /// A copy of the latest board.
    #[must_use]
    pub fn board_snapshot(&self) -> InstallBoard {
        self.board
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Error message from the most recent fetch, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// True once at least one fetch has succeeded.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.fetched.load(Ordering::Relaxed)
    }

    /// True while a background fetch is still in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.handles.iter().any(|handle| !handle.is_finished())
    }

    /// True when the fixed poll period has elapsed since the last refresh.
    #[must_use]
    pub fn needs_refresh(&self) -> bool {
        self.auto_refresh && self.last_refresh.elapsed() >= POLL_INTERVAL
    }

    /// Enables or disables the periodic refresh.
    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.auto_refresh = enabled;
    }

    /// Whether the periodic refresh is armed.
    #[must_use]
    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// Waits for any in-flight fetches to settle.
    ///
    /// Only used by tests and shutdown paths; normal operation never joins.
    pub fn join_pending(&mut self) {
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}
