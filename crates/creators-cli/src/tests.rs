//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use creators_core::{InsightKey, Locale, Severity};
use serde_json::json;
use tempfile::TempDir;

use crate::commands;

const NOW: &str = "2026-03-12T12:00:00Z";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn write_json(dir: &TempDir, name: &str, value: &serde_json::Value) -> PathBuf {
    write_file(dir, name, &serde_json::to_string(value).unwrap())
}

fn overdue_snapshot() -> serde_json::Value {
    json!({
        "tasks": [
            {"id": "t1", "title": "Edit reel", "dueDate": "2026-01-20", "status": "todo"},
            {"id": "t2", "title": "Send invoice", "dueDate": "2026-01-21", "status": "in_progress"},
            {"id": "t3", "title": "Script", "dueDate": "2026-01-22", "status": "done"},
        ],
        "events": [],
        "companies": [],
    })
}

fn request() -> creators_core::RequestContext {
    commands::request_context(Some(NOW), "en", 0).unwrap()
}

// ========== Request Context Tests ==========

#[test]
fn test_request_context_from_flags() {
    let ctx = commands::request_context(Some("2026-03-12T14:00:00+02:00"), "he", 2).unwrap();
    assert_eq!(ctx.now.to_rfc3339(), "2026-03-12T12:00:00+00:00");
    assert_eq!(ctx.locale, Locale::He);
    assert_eq!(ctx.utc_offset.local_minus_utc(), 7200);
}

#[test]
fn test_request_context_rejects_bad_input() {
    assert!(commands::request_context(Some("yesterday"), "en", 0).is_err());
    assert!(commands::request_context(None, "fr", 0).is_err());
    assert!(commands::request_context(None, "en", 30).is_err());
}

// ========== Insights Command Tests ==========

#[test]
fn test_compute_from_file() {
    let dir = TempDir::new().unwrap();
    let file = write_json(&dir, "snapshot.json", &overdue_snapshot());

    let insights = commands::compute_from_file(None, &file, None, &request(), &[]).unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].insight_key, InsightKey::OverdueTasks);
    assert_eq!(insights[0].message, "2 tasks are past their due date");
}

#[test]
fn test_compute_from_file_with_config_override() {
    let dir = TempDir::new().unwrap();
    let file = write_json(&dir, "snapshot.json", &overdue_snapshot());
    let config = write_file(&dir, "insights.toml", "[overdue]\nrisk_count = 2\n");

    let insights =
        commands::compute_from_file(Some(&config), &file, None, &request(), &[]).unwrap();
    assert_eq!(insights[0].severity, Severity::Risk);
}

#[test]
fn test_compute_from_file_missing_config() {
    let dir = TempDir::new().unwrap();
    let file = write_json(&dir, "snapshot.json", &overdue_snapshot());
    let missing = dir.path().join("missing.toml");

    assert!(commands::compute_from_file(Some(&missing), &file, None, &request(), &[]).is_err());
}

#[test]
fn test_compute_from_file_dismissed() {
    let dir = TempDir::new().unwrap();
    let file = write_json(&dir, "snapshot.json", &overdue_snapshot());

    let first = commands::compute_from_file(None, &file, None, &request(), &[]).unwrap();
    let dismissed = vec![first[0].id.clone()];
    let second = commands::compute_from_file(None, &file, None, &request(), &dismissed).unwrap();
    assert!(second.is_empty());
}

#[test]
fn test_compute_from_file_scope_override() {
    let dir = TempDir::new().unwrap();
    let file = write_json(&dir, "snapshot.json", &overdue_snapshot());

    assert!(commands::compute_from_file(None, &file, Some("agency"), &request(), &[]).is_ok());
    assert!(commands::compute_from_file(None, &file, Some("team"), &request(), &[]).is_err());
}

#[test]
fn test_compute_from_invalid_file() {
    let dir = TempDir::new().unwrap();
    let not_json = write_file(&dir, "broken.json", "{ tasks: ");
    let duplicate = write_json(&dir, "dup.json", &json!({"tasks": [{"id": "a"}, {"id": "a"}]}));

    assert!(commands::compute_from_file(None, &not_json, None, &request(), &[]).is_err());
    assert!(commands::compute_from_file(None, &duplicate, None, &request(), &[]).is_err());
    assert!(
        commands::compute_from_file(None, &dir.path().join("nope.json"), None, &request(), &[])
            .is_err()
    );
}

#[test]
fn test_cmd_insights_prints() {
    let dir = TempDir::new().unwrap();
    let file = write_json(&dir, "snapshot.json", &overdue_snapshot());

    assert!(commands::cmd_insights(None, &file, None, &request(), &[], false).is_ok());
    assert!(commands::cmd_insights(None, &file, None, &request(), &[], true).is_ok());
}

#[test]
fn test_compute_agency_from_file() {
    let dir = TempDir::new().unwrap();
    let noa = json!({
        "name": "Noa",
        "tasks": [
            {"id": "n1", "dueDate": "2026-03-10", "status": "todo"},
            {"id": "n2", "dueDate": "2026-03-11", "status": "review"},
        ],
    });
    let file = write_json(
        &dir,
        "agency.json",
        &json!({"creators": [noa, {"name": "Dan"}]}),
    );

    let insights = commands::compute_agency_from_file(None, &file, &request(), &[]).unwrap();
    let at_risk: Vec<_> = insights
        .iter()
        .filter(|i| i.insight_key == InsightKey::CreatorAtRisk)
        .collect();
    assert_eq!(at_risk.len(), 1);
    assert_eq!(at_risk[0].creator_name.as_deref(), Some("Noa"));
    assert!(commands::cmd_agency(None, &file, &request(), &[], false).is_ok());
}

// ========== Validate Command Tests ==========

#[test]
fn test_cmd_validate() {
    let dir = TempDir::new().unwrap();
    let good = write_json(&dir, "good.json", &overdue_snapshot());
    let bad = write_json(
        &dir,
        "bad.json",
        &json!({"events": [{"id": "e1", "start": "2026-03-10T10:00:00Z", "end": "2026-03-10T09:00:00Z"}]}),
    );
    let agency = write_json(&dir, "agency.json", &json!({"creators": [{"name": " "}]}));

    assert!(commands::cmd_validate(&good, false).is_ok());
    assert!(commands::cmd_validate(&bad, false).is_err());
    assert!(commands::cmd_validate(&agency, true).is_err());
}

// ========== Keys & Config Command Tests ==========

#[test]
fn test_cmd_keys() {
    assert!(commands::cmd_keys().is_ok());
}

#[test]
fn test_cmd_config() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "insights.toml", "[due_soon]\nhours = 24\n");

    assert!(commands::cmd_config(Some(&config)).is_ok());
    assert!(commands::cmd_config(Some(&dir.path().join("missing.toml"))).is_err());
}
