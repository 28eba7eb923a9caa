//! Wire types for the backend JSON API.
//!
//! Response structs are deserialized leniently: collection and list fields
//! default to empty so a sparse payload never fails the whole fetch.

use serde::{Deserialize, Serialize};

use crate::install::{InstallHistoryEntry, InstallJob};
use crate::manifest::ManifestItem;
use crate::pairing::PairingSelection;

/// One manifest collection (`models` or `loras`) as served by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestCollection {
    /// Where the collection was curated from, if the backend reports it.
    #[serde(default)]
    pub source: Option<String>,
    /// Catalog entries.
    #[serde(default)]
    pub items: Vec<ManifestItem>,
    /// Validation problems the backend found while loading the manifest.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// `GET /api/manifests` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestsResponse {
    #[serde(default)]
    pub models: ManifestCollection,
    #[serde(default)]
    pub loras: ManifestCollection,
}

/// `GET /api/manifests/{models|loras}/{slug-or-name}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestDetail {
    /// The resolved catalog entry.
    pub item: ManifestItem,
    /// Asset class label as reported by the backend.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Validation errors specific to this entry.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// `POST /api/installations` request body.
#[derive(Debug, Clone, Serialize)]
pub struct InstallRequest {
    /// Selected model names.
    pub models: Vec<String>,
    /// Selected add-on names.
    pub loras: Vec<String>,
}

/// `POST /api/installations` response: the jobs the installer spawned.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstallStarted {
    #[serde(default)]
    pub jobs: Vec<InstallJob>,
}

impl InstallStarted {
    /// Server-assigned identifiers of the spawned jobs.
    #[must_use]
    pub fn job_ids(&self) -> Vec<String> {
        self.jobs.iter().map(|job| job.id.clone()).collect()
    }
}

/// `GET /api/installations` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstallationsResponse {
    /// Jobs the installer currently tracks, running or finished.
    #[serde(default)]
    pub jobs: Vec<InstallJob>,
    /// Past installations, most recent first (backend ordering).
    #[serde(default)]
    pub history: Vec<InstallHistoryEntry>,
}

/// `POST /api/pairings` request body.
///
/// `model` is the empty string when no model is selected; the backend treats
/// that as "clear the paired model".
#[derive(Debug, Clone, Serialize)]
pub struct PairingRequest {
    pub model: String,
    pub loras: Vec<String>,
}

/// `GET`/`POST /api/pairings` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairingResponse {
    #[serde(default)]
    pub selection: PairingSelection,
}
