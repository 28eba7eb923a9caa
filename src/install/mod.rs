//! Installation jobs: submission, polling, and history reconciliation.

mod job;
mod orchestrator;

pub use job::{InstallBoard, InstallHistoryEntry, InstallJob, JobStatus};
pub use orchestrator::{InstallOrchestrator, POLL_INTERVAL};
