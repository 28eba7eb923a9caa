//! modstack
//!
//! Client-side orchestration for an asset-install dashboard: browse a
//! read-only catalog of base models and add-on modules, select entries
//! across both classes, submit asynchronous installation jobs, and follow
//! them against the backend's installation history.
//!
//! # Architecture
//!
//! - **Api Module**: typed blocking HTTP client over the backend JSON API
//! - **Manifest Module**: catalog, filtering, and tag derivation
//! - **Selection Module**: name-based selection bookkeeping
//! - **Pairing Module**: persisted default selection (one model + add-ons)
//! - **Install Module**: job submission and 5-second polling
//! - **App Module**: session context and command handlers
//!
//! # Usage
//!
//! ```no_run
//! use modstack::{App, Config};
//!
//! let config = Config::load().expect("config");
//! let mut app = App::new(&config);
//! app.bootstrap();
//! ```

// Clippy configuration - allow common patterns
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

pub mod api;
pub mod app;
pub mod config;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod pairing;
pub mod selection;

// Re-export main types
pub use api::{ApiClient, ApiError};
pub use app::{App, PanelView};
pub use config::Config;
pub use install::{InstallBoard, InstallOrchestrator, JobStatus, POLL_INTERVAL};
pub use manifest::{AssetKind, Catalog, FilterState, ManifestItem};
pub use pairing::{PairingSelection, PairingStore};
pub use selection::{SelectionSnapshot, SelectionTracker};
