//! HTTP API layer for the manifest/install backend.
//!
//! Wraps the backend's JSON surface behind typed request/response methods
//! and a single error taxonomy shared by every caller.

pub mod client;
pub mod types;

use thiserror::Error;

pub use client::ApiClient;
pub use types::{
    InstallRequest, InstallStarted, InstallationsResponse, ManifestCollection, ManifestDetail,
    ManifestsResponse, PairingRequest, PairingResponse,
};

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the JSON shape we expected.
    #[error("invalid response: {0}")]
    Json(#[from] serde_json::Error),

    /// The server rejected the request with 401.
    #[error("unauthorized: set the API token in the configuration")]
    Unauthorized,

    /// Non-2xx response; carries the response body verbatim.
    #[error("{0}")]
    Server(String),

    /// Local validation failure. Raised before any network call is made.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Returns true when re-invoking the same operation may succeed.
    ///
    /// Validation failures need different input, not a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApiError::Validation(_))
    }

    /// Returns true for errors that never touched the network.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}
