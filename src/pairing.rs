//! Client view of the persisted default pairing.
//!
//! A pairing is one base model plus any number of add-ons, stored by the
//! backend as the installer's default selection. The backend is
//! authoritative: after a save, the cache holds exactly what the backend
//! echoed back, never the locally optimistic value.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{ApiClient, ApiError, PairingRequest};
use crate::selection::SelectionSnapshot;

/// The persisted default selection.
///
/// `model` is the empty string when no model is paired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingSelection {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub loras: Vec<String>,
}

impl PairingSelection {
    /// True when a base model is paired.
    #[must_use]
    pub fn has_model(&self) -> bool {
        !self.model.is_empty()
    }
}

/// Cache of the persisted pairing, with save/reload against the backend.
#[derive(Debug, Default)]
pub struct PairingStore {
    current: Option<PairingSelection>,
}

impl PairingStore {
    /// Creates an empty store (nothing fetched yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last value the backend reported, if any.
    #[must_use]
    pub fn current(&self) -> Option<&PairingSelection> {
        self.current.as_ref()
    }

    /// Fetches the persisted pairing and caches it.
    pub fn load(&mut self, client: &ApiClient) -> Result<&PairingSelection, ApiError> {
        let response = client.fetch_pairing()?;
        Ok(self.current.insert(response.selection))
    }

    /// Persists the given selection as the new pairing.
    ///
    /// Validates locally first: more than one selected model never reaches
    /// the network. The cached value is the backend's echo.
    pub fn save(
        &mut self,
        client: &ApiClient,
        snapshot: &SelectionSnapshot,
    ) -> Result<&PairingSelection, ApiError> {
        let request = Self::build_request(snapshot)?;
        let response = client.save_pairing(&request)?;
        info!(
            "Pairing saved: model='{}', {} add-on(s)",
            response.selection.model,
            response.selection.loras.len()
        );
        Ok(self.current.insert(response.selection))
    }

    /// Builds the wire request for a pairing save.
    ///
    /// Zero selected models is allowed (clears the paired model); two or
    /// more is a local validation failure.
    pub fn build_request(snapshot: &SelectionSnapshot) -> Result<PairingRequest, ApiError> {
        if snapshot.models.len() > 1 {
            return Err(ApiError::Validation(
                "select only one model when pairing".to_string(),
            ));
        }

        Ok(PairingRequest {
            model: snapshot.models.iter().next().cloned().unwrap_or_default(),
            loras: snapshot.addon_names(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::manifest::AssetKind;
    use crate::selection::SelectionTracker;

    #[test]
    fn test_build_request_single_model() {
        let mut tracker = SelectionTracker::new();
        tracker.toggle(AssetKind::Model, "m1");
        tracker.toggle(AssetKind::AddOn, "l1");
        tracker.toggle(AssetKind::AddOn, "l2");

        let request = PairingStore::build_request(&tracker.snapshot()).unwrap();
        assert_eq!(request.model, "m1");
        assert_eq!(request.loras, vec!["l1", "l2"]);
    }

    #[test]
    fn test_build_request_no_model_clears() {
        let mut tracker = SelectionTracker::new();
        tracker.toggle(AssetKind::AddOn, "l1");

        let request = PairingStore::build_request(&tracker.snapshot()).unwrap();
        assert_eq!(request.model, "");
        assert_eq!(request.loras, vec!["l1"]);
    }

    #[test]
    fn test_build_request_rejects_two_models() {
        let mut tracker = SelectionTracker::new();
        tracker.toggle(AssetKind::Model, "m1");
        tracker.toggle(AssetKind::Model, "m2");

        let err = PairingStore::build_request(&tracker.snapshot()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_selection_roundtrip_parse() {
        let parsed: PairingSelection =
            serde_json::from_str(r#"{"model": "deliberate", "loras": ["detail-tweaker"]}"#)
                .unwrap();
        assert!(parsed.has_model());
        assert_eq!(parsed.loras.len(), 1);
    }
}
