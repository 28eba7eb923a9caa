//! Blocking HTTP client for the backend API.
//!
//! One method per endpoint. Every request attaches the configured bearer
//! token; every non-2xx response is mapped to [`ApiError`] with the body
//! text kept verbatim as the message (401 gets a dedicated variant).

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{
    InstallRequest, InstallStarted, InstallationsResponse, ManifestDetail, ManifestsResponse,
    PairingRequest, PairingResponse,
};
use super::ApiError;
use crate::manifest::AssetKind;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Typed client for the manifest/install backend.
pub struct ApiClient {
    /// HTTP client for API requests.
    http: reqwest::blocking::Client,
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:3939`.
    base_url: String,
    /// Bearer token attached to every request when present.
    auth_token: Option<String>,
}

impl ApiClient {
    /// Creates a client for the given backend.
    #[must_use]
    pub fn new(base_url: &str, auth_token: Option<String>, timeout: Duration) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("modstack/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            auth_token,
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the full manifest catalog (models and add-ons).
    pub fn fetch_manifests(&self) -> Result<ManifestsResponse, ApiError> {
        self.get_json("/api/manifests")
    }

    /// Fetches detail and validation errors for one catalog entry.
    pub fn fetch_manifest_detail(
        &self,
        kind: AssetKind,
        key: &str,
    ) -> Result<ManifestDetail, ApiError> {
        let path = format!("/api/manifests/{}/{}", kind.api_segment(), key);
        self.get_json(&path)
    }

    /// Starts installation jobs for the named models and add-ons.
    pub fn start_installations(&self, request: &InstallRequest) -> Result<InstallStarted, ApiError> {
        self.post_json("/api/installations", request)
    }

    /// Fetches the current install jobs and the installation history.
    pub fn fetch_installations(&self) -> Result<InstallationsResponse, ApiError> {
        self.get_json("/api/installations")
    }

    /// Fetches the persisted default pairing.
    pub fn fetch_pairing(&self) -> Result<PairingResponse, ApiError> {
        self.get_json("/api/pairings")
    }

    /// Persists a pairing; the response echoes the canonical stored value.
    pub fn save_pairing(&self, request: &PairingRequest) -> Result<PairingResponse, ApiError> {
        self.post_json("/api/pairings", request)
    }

    /// Sends a GET request and decodes the JSON response body.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self.http.get(&url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        Self::decode(request.send()?)
    }

    /// Sends a POST request with a JSON body and decodes the response.
    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        Self::decode(request.send()?)
    }

    /// Maps the response status, then parses the body.
    ///
    /// The body of a failed response is surfaced verbatim; an empty body
    /// falls back to a generic message carrying the status code.
    fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, ApiError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!("request failed with status {}", status.as_u16())
            } else {
                body
            };
            return Err(ApiError::Server(message));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
