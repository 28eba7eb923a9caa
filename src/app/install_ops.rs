//! Selection and installation operations for the App.

use tracing::{debug, info};

use crate::api::ApiError;
use crate::install::InstallBoard;
use crate::manifest::AssetKind;

use super::{App, PanelView};

impl App {
    /// Flips one entry in or out of the selection.
    ///
    /// Returns whether the entry is now selected. Names outside the
    /// catalog are accepted; selection is purely name-based.
    pub fn on_toggle_selection(&mut self, kind: AssetKind, name: &str) -> bool {
        let selected = self.selection.toggle(kind, name);
        debug!(
            "Selection toggled: {} '{}' -> {}",
            kind.label(),
            name,
            if selected { "on" } else { "off" }
        );
        selected
    }

    /// Submits an installation for the current selection.
    ///
    /// An empty selection fails locally without touching the network; the
    /// message lands in the status line. On success the started job ids
    /// are returned and the board refresh is already underway.
    pub fn on_submit_install(&mut self) -> Result<Vec<String>, ApiError> {
        let snapshot = self.selection.snapshot();
        match self.installs.submit(&snapshot) {
            Ok(ids) => {
                self.set_status(format!("Installers started ({}).", ids.join(", ")));
                Ok(ids)
            }
            Err(err) => {
                if err.is_local() {
                    // Validation failure: no request was made, panels stay.
                    self.set_status(err.to_string());
                } else {
                    self.set_status(format!("Failed to start installers: {}", err));
                }
                Err(err)
            }
        }
    }

    /// Replays a history entry's selection into the tracker.
    ///
    /// Replaces the whole selection with the entry's names; does not
    /// resubmit anything. Returns false when the index is out of range.
    pub fn on_reuse_history(&mut self, index: usize) -> bool {
        let board = self.installs.board_snapshot();
        let Some(entry) = board.history.get(index) else {
            return false;
        };

        info!(
            "Reusing history selection from {} ({} models, {} add-ons)",
            entry.started_at,
            entry.models.len(),
            entry.loras.len()
        );
        self.selection
            .replace(entry.models.iter().cloned(), entry.loras.iter().cloned());
        self.set_status("Loaded selection from history.");
        true
    }

    /// Periodic tick: surfaces the latest poll outcome and re-arms.
    ///
    /// Called by the driving loop on its own cadence; the fixed 5 s poll
    /// period is enforced here, not by the caller.
    pub fn on_refresh_tick(&mut self) {
        if let Some(message) = self.installs.last_error() {
            self.install_view =
                PanelView::Error(format!("Failed to load installers: {}", message));
        } else if self.installs.has_data() {
            self.install_view = PanelView::Ready;
        }

        if self.installs.needs_refresh() {
            self.installs.refresh();
        }
    }

    /// The latest install board (jobs + history).
    #[must_use]
    pub fn board(&self) -> InstallBoard {
        self.installs.board_snapshot()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use std::sync::Arc;
    use std::time::Duration;

    fn offline_app() -> App {
        let client = Arc::new(ApiClient::new(
            "http://192.0.2.1:9",
            None,
            Duration::from_millis(50),
        ));
        App::with_client(client)
    }

    #[test]
    fn test_submit_with_empty_selection_fails_locally() {
        let mut app = offline_app();
        let err = app.on_submit_install().unwrap_err();

        assert!(err.is_local());
        assert_eq!(app.status(), "pick at least one manifest entry to install");
        assert!(!app.installs().is_fetching());
    }

    #[test]
    fn test_toggle_pair_restores_snapshot() {
        let mut app = offline_app();
        let before = app.selection().snapshot();

        app.on_toggle_selection(AssetKind::AddOn, "detail-tweaker");
        app.on_toggle_selection(AssetKind::AddOn, "detail-tweaker");

        assert_eq!(app.selection().snapshot(), before);
    }

    #[test]
    fn test_reuse_history_out_of_range() {
        let mut app = offline_app();
        assert!(!app.on_reuse_history(0));
    }

    #[test]
    fn test_reuse_history_replaces_selection() {
        let mut app = offline_app();
        app.on_toggle_selection(AssetKind::Model, "stale-model");

        // Seed the board the way a poll would.
        app.installs().ingest(
            serde_json::from_str(
                r#"{"jobs": [],
                    "history": [{"id": "h1", "started_at": "20250101T000000Z",
                                 "status": "completed",
                                 "models": ["m1"], "loras": ["l2"],
                                 "log_path": "/tmp/h1.log"}]}"#,
            )
            .unwrap(),
        );

        assert!(app.on_reuse_history(0));
        let snapshot = app.selection().snapshot();
        assert_eq!(snapshot.model_names(), vec!["m1"]);
        assert_eq!(snapshot.addon_names(), vec!["l2"]);
        assert!(!snapshot.models.contains("stale-model"));
        assert_eq!(app.status(), "Loaded selection from history.");
    }
}
