//! Tests for configuration loading.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use modstack::config::{Config, DEFAULT_SERVER_URL};

#[test]
fn test_missing_file_is_created_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".modstackrc");

    let config = Config::load_from(&path).expect("load");

    assert!(path.exists(), "default config file should be written");
    assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    assert!(config.auth_token.is_none());
}

#[test]
fn test_file_settings_are_applied() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".modstackrc");
    fs::write(
        &path,
        "server_url = https://hub.example:8443/\n\
         auth_token = abc123\n\
         request_timeout = 12\n\
         log_enabled = false\n",
    )
    .expect("write config");

    let config = Config::load_from(&path).expect("load");

    assert_eq!(config.server_url, "https://hub.example:8443");
    assert_eq!(config.auth_token.as_deref(), Some("abc123"));
    assert_eq!(config.request_timeout_secs, 12);
    assert!(!config.log_config.enabled);
}

#[test]
fn test_inline_comments_are_stripped() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".modstackrc");
    fs::write(&path, "auth_token = secret # do not commit\n").expect("write config");

    let config = Config::load_from(&path).expect("load");
    assert_eq!(config.auth_token.as_deref(), Some("secret"));
}

#[test]
fn test_reload_picks_up_changes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".modstackrc");
    fs::write(&path, "request_timeout = 5\n").expect("write config");

    let mut config = Config::load_from(&path).expect("load");
    assert_eq!(config.request_timeout_secs, 5);

    fs::write(&path, "request_timeout = 9\n").expect("rewrite config");
    config.reload().expect("reload");
    assert_eq!(config.request_timeout_secs, 9);
}
