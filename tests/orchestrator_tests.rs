//! Tests for install submission, board classification, and pairing.
//!
//! Network-facing paths are exercised up to their local validation
//! boundary; board state is driven through `ingest`, the same replacement
//! path a poll response takes.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use modstack::manifest::AssetKind;
use modstack::pairing::PairingStore;
use modstack::{ApiClient, ApiError, App, JobStatus, PanelView};

fn offline_app() -> App {
    let client = Arc::new(ApiClient::new(
        "http://192.0.2.1:9",
        None,
        Duration::from_millis(50),
    ));
    App::with_client(client)
}

// ============================================================================
// Submission validation
// ============================================================================

#[test]
fn test_empty_submit_is_local_and_makes_no_request() {
    let mut app = offline_app();

    let err = app.on_submit_install().unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    // No fetch was spawned by the rejected submit.
    assert!(!app.installs().is_fetching());
    assert_eq!(app.status(), "pick at least one manifest entry to install");
}

#[test]
fn test_submit_validation_leaves_panels_untouched() {
    let mut app = offline_app();
    let before = app.install_view().clone();

    let _ = app.on_submit_install();
    assert_eq!(*app.install_view(), before);
}

// ============================================================================
// Board classification
// ============================================================================

#[test]
fn test_zero_running_jobs_with_history_populates_only_history() {
    let app = offline_app();
    app.installs().ingest(
        serde_json::from_str(
            r#"{"jobs": [{"id": "done-1", "status": "completed"},
                         {"id": "done-2", "status": "failed"}],
                "history": [{"id": "h0", "started_at": "20250101T000000Z",
                             "status": "completed"}]}"#,
        )
        .unwrap(),
    );

    let board = app.board();
    assert!(board.running().is_empty());
    assert_eq!(board.history.len(), 1);
}

#[test]
fn test_running_classification_requires_exact_status() {
    let app = offline_app();
    app.installs().ingest(
        serde_json::from_str(
            r#"{"jobs": [{"id": "live", "status": "running"},
                         {"id": "odd", "status": "Running"},
                         {"id": "legacy", "status": "succeeded"}],
                "history": []}"#,
        )
        .unwrap(),
    );

    let board = app.board();
    let running: Vec<&str> = board.running().iter().map(|j| j.id.as_str()).collect();
    assert_eq!(running, vec!["live"]);

    // The surprising statuses stay visible, just not as running.
    assert_eq!(board.jobs[1].status, JobStatus::Unknown);
    assert_eq!(board.jobs[2].status, JobStatus::Unknown);
}

#[test]
fn test_refresh_tick_surfaces_data_once_available() {
    let mut app = offline_app();
    assert_eq!(*app.install_view(), PanelView::Loading);

    app.installs()
        .ingest(serde_json::from_str(r#"{"jobs": [], "history": []}"#).unwrap());
    app.on_refresh_tick();

    assert!(app.install_view().is_ready());
}

#[test]
fn test_each_ingest_fully_replaces_previous_board() {
    let app = offline_app();
    app.installs().ingest(
        serde_json::from_str(
            r#"{"jobs": [{"id": "a", "status": "running"}],
                "history": [{"id": "h0", "status": "completed"}]}"#,
        )
        .unwrap(),
    );
    app.installs().ingest(
        serde_json::from_str(r#"{"jobs": [{"id": "b", "status": "running"}], "history": []}"#)
            .unwrap(),
    );

    let board = app.board();
    assert_eq!(board.jobs.len(), 1);
    assert_eq!(board.jobs[0].id, "b");
    assert!(board.history.is_empty());
}

// ============================================================================
// Pairing
// ============================================================================

#[test]
fn test_pairing_save_with_two_models_never_reaches_network() {
    let mut app = offline_app();
    app.on_toggle_selection(AssetKind::Model, "m1");
    app.on_toggle_selection(AssetKind::Model, "m2");
    app.on_toggle_selection(AssetKind::AddOn, "l1");

    let err = app.on_save_pairing().unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    // The pairing cache is untouched by the local failure.
    assert!(app.pairing_selection().is_none());
}

#[test]
fn test_pairing_request_body_for_one_model_two_addons() {
    let mut app = offline_app();
    app.on_toggle_selection(AssetKind::Model, "m1");
    app.on_toggle_selection(AssetKind::AddOn, "l1");
    app.on_toggle_selection(AssetKind::AddOn, "l2");

    let request = PairingStore::build_request(&app.selection().snapshot()).unwrap();
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["model"], "m1");
    let loras: Vec<&str> = body["loras"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(loras, vec!["l1", "l2"]);
}

#[test]
fn test_pairing_request_with_no_model_sends_empty_string() {
    let mut app = offline_app();
    app.on_toggle_selection(AssetKind::AddOn, "l1");

    let request = PairingStore::build_request(&app.selection().snapshot()).unwrap();
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["model"], "");
}
