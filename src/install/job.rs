//! Install job and history records as reported by the backend.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an installation job.
///
/// Anything outside the documented set deserializes to `Unknown` so a
/// surprising backend string stays displayable without ever counting as
/// running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
    #[serde(other)]
    #[default]
    Unknown,
}

impl JobStatus {
    /// Only exactly `"running"` on the wire classifies as running.
    #[must_use]
    pub fn is_running(self) -> bool {
        self == JobStatus::Running
    }

    /// Display label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }
}

/// One installer invocation, live or finished.
///
/// Created by a submission; read-only for the client afterwards and
/// refreshed wholesale by polling. `id` is server-assigned and never
/// reused: two jobs with the same id are the same entity.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallJob {
    pub id: String,
    #[serde(default)]
    pub status: JobStatus,
    /// Model names captured at submission time.
    #[serde(default)]
    pub models: Vec<String>,
    /// Add-on names captured at submission time.
    #[serde(default)]
    pub loras: Vec<String>,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub returncode: Option<i32>,
    /// Last lines of the installer log.
    #[serde(default)]
    pub log_tail: String,
}

impl InstallJob {
    /// True while the installer process is still going.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }
}

/// Immutable record of a past installation.
///
/// The backend owns these; the client only reads them and can replay their
/// selection. Ordering is the backend's (most recent first) and is never
/// re-sorted client-side.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallHistoryEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub loras: Vec<String>,
    #[serde(default)]
    pub log_path: String,
}

/// The install view as of the latest poll: live jobs plus history.
///
/// Every refresh replaces the whole board; there is no client-side merge.
#[derive(Debug, Clone, Default)]
pub struct InstallBoard {
    pub jobs: Vec<InstallJob>,
    pub history: Vec<InstallHistoryEntry>,
}

impl InstallBoard {
    /// Jobs whose status is exactly `running`.
    #[must_use]
    pub fn running(&self) -> Vec<&InstallJob> {
        self.jobs.iter().filter(|job| job.is_running()).collect()
    }

    /// True when no jobs and no history entries are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty() && self.history.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_documented_values() {
        assert_eq!(
            serde_json::from_str::<JobStatus>("\"running\"").unwrap(),
            JobStatus::Running
        );
        assert_eq!(
            serde_json::from_str::<JobStatus>("\"completed\"").unwrap(),
            JobStatus::Completed
        );
        assert_eq!(
            serde_json::from_str::<JobStatus>("\"failed\"").unwrap(),
            JobStatus::Failed
        );
    }

    #[test]
    fn test_status_match_is_case_sensitive() {
        // "Running" is not "running"; it must not classify as running.
        let status: JobStatus = serde_json::from_str("\"Running\"").unwrap();
        assert_eq!(status, JobStatus::Unknown);
        assert!(!status.is_running());
    }

    #[test]
    fn test_unrecognized_status_goes_to_unknown() {
        let status: JobStatus = serde_json::from_str("\"succeeded\"").unwrap();
        assert_eq!(status, JobStatus::Unknown);
    }

    #[test]
    fn test_board_running_filter() {
        let board: InstallBoard = InstallBoard {
            jobs: serde_json::from_str(
                r#"[{"id": "a", "status": "running"},
                    {"id": "b", "status": "failed"},
                    {"id": "c", "status": "completed"}]"#,
            )
            .unwrap(),
            history: Vec::new(),
        };

        let running = board.running();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].id, "a");
    }

    #[test]
    fn test_job_tolerates_sparse_payload() {
        let job: InstallJob = serde_json::from_str(r#"{"id": "only-id"}"#).unwrap();
        assert_eq!(job.status, JobStatus::Unknown);
        assert!(job.returncode.is_none());
        assert!(job.log_tail.is_empty());
    }
}
