//! Dashboard session state and command handlers.
//!
//! [`App`] is the context object owning every core component for one
//! session: catalog, filter, selection, pairing cache, and the install
//! orchestrator. Interface layers (the CLI, a test harness) drive it
//! exclusively through the command handlers in the ops submodules and
//! render from its accessors; the core never knows how commands arrive.

mod catalog_ops;
mod install_ops;
mod pairing_ops;

use std::sync::Arc;

use tracing::info;

use crate::api::{ApiClient, ManifestDetail};
use crate::config::Config;
use crate::install::InstallOrchestrator;
use crate::manifest::{Catalog, FilterState};
use crate::pairing::PairingStore;
use crate::selection::SelectionTracker;

/// Load state of one dashboard panel.
///
/// A failed operation degrades only its own panel to `Error`; the message
/// is shown with a retry affordance and the other panels keep serving
/// their cached data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PanelView {
    /// Initial fetch not finished yet.
    #[default]
    Loading,
    /// Data available.
    Ready,
    /// Last operation failed; retry by re-invoking it.
    Error(String),
}

impl PanelView {
    /// True when data is available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self == PanelView::Ready
    }

    /// The error message, when the panel is degraded.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            PanelView::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// One dashboard session.
///
/// Created at session start, torn down at session end. All state is
/// single-owner and mutated only through the command handlers.
pub struct App {
    client: Arc<ApiClient>,
    catalog: Catalog,
    filter: FilterState,
    selection: SelectionTracker,
    pairing: PairingStore,
    installs: InstallOrchestrator,
    /// Last manifest detail the user opened.
    detail: Option<ManifestDetail>,
    manifest_view: PanelView,
    install_view: PanelView,
    pairing_view: PanelView,
    /// One-line status shown by the interface layer.
    status: String,
}

impl App {
    /// Creates a session from the loaded configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let client = Arc::new(ApiClient::new(
            &config.server_url,
            config.auth_token.clone(),
            config.request_timeout(),
        ));
        Self::with_client(client)
    }

    /// Creates a session around an existing API client.
    #[must_use]
    pub fn with_client(client: Arc<ApiClient>) -> Self {
        let installs = InstallOrchestrator::new(Arc::clone(&client));
        Self {
            client,
            catalog: Catalog::new(),
            filter: FilterState::new(),
            selection: SelectionTracker::new(),
            pairing: PairingStore::new(),
            installs,
            detail: None,
            manifest_view: PanelView::Loading,
            install_view: PanelView::Loading,
            pairing_view: PanelView::Loading,
            status: String::new(),
        }
    }

    /// Initial load: manifests, pairing, and an eager install refresh.
    ///
    /// Each load is caught independently so one failing endpoint degrades
    /// only its own panel. Returns true when everything succeeded.
    pub fn bootstrap(&mut self) -> bool {
        info!("Session bootstrap against {}", self.client.base_url());
        self.status = "Loading…".to_string();

        let mut ok = true;
        if self.load_manifests().is_err() {
            ok = false;
        }
        if self.on_load_pairing().is_err() {
            ok = false;
        }
        // Eager first poll; later ones are driven by on_refresh_tick.
        self.installs.refresh();

        self.status = if ok {
            format!("Ready • {} manifest entries", self.catalog.len())
        } else {
            "API error".to_string()
        };
        ok
    }

    /// The loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current filter.
    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// The install orchestrator.
    #[must_use]
    pub fn installs(&self) -> &InstallOrchestrator {
        &self.installs
    }

    /// Mutable access for interface layers that pace their own refreshes.
    pub fn installs_mut(&mut self) -> &mut InstallOrchestrator {
        &mut self.installs
    }

    /// Manifest panel state.
    #[must_use]
    pub fn manifest_view(&self) -> &PanelView {
        &self.manifest_view
    }

    /// Install panel state.
    #[must_use]
    pub fn install_view(&self) -> &PanelView {
        &self.install_view
    }

    /// Pairing panel state.
    #[must_use]
    pub fn pairing_view(&self) -> &PanelView {
        &self.pairing_view
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Sets the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_new_session_is_empty() {
        let app = offline_app();
        assert!(!app.catalog().is_loaded());
        assert!(app.selection().is_empty());
        assert_eq!(*app.manifest_view(), PanelView::Loading);
    }

    #[test]
    fn test_panel_view_error_accessor() {
        let view = PanelView::Error("boom".to_string());
        assert!(!view.is_ready());
        assert_eq!(view.error(), Some("boom"));
        assert_eq!(PanelView::Ready.error(), None);
    }
}
