//! Pairing operations for the App.

use tracing::warn;

use crate::api::ApiError;
use crate::pairing::PairingSelection;

use super::{App, PanelView};

impl App {
    /// Fetches the persisted pairing into the cache.
    pub fn on_load_pairing(&mut self) -> Result<(), ApiError> {
        self.pairing_view = PanelView::Loading;
        match self.pairing.load(&self.client) {
            Ok(_) => {
                self.pairing_view = PanelView::Ready;
                Ok(())
            }
            Err(err) => {
                warn!("Pairing load failed: {}", err);
                self.pairing_view =
                    PanelView::Error(format!("Failed to load pairings: {}", err));
                Err(err)
            }
        }
    }

    /// Persists the current selection as the default pairing.
    ///
    /// More than one selected model fails locally (status line only, no
    /// request); other failures degrade the pairing panel. The cached
    /// value afterwards is exactly the backend's echo.
    pub fn on_save_pairing(&mut self) -> Result<(), ApiError> {
        let snapshot = self.selection.snapshot();
        match self.pairing.save(&self.client, &snapshot) {
            Ok(selection) => {
                let label = if selection.has_model() {
                    selection.model.clone()
                } else {
                    "no model".to_string()
                };
                self.pairing_view = PanelView::Ready;
                self.set_status(format!("Saved pairing for {}.", label));
                Ok(())
            }
            Err(err) => {
                if err.is_local() {
                    self.set_status(err.to_string());
                } else {
                    warn!("Pairing save failed: {}", err);
                    self.pairing_view =
                        PanelView::Error(format!("Failed to save pairing: {}", err));
                }
                Err(err)
            }
        }
    }

    /// The cached pairing, when one has been fetched or saved.
    #[must_use]
    pub fn pairing_selection(&self) -> Option<&PairingSelection> {
        self.pairing.current()
    }
}
