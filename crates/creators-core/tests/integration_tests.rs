//! Integration tests for creators-core
//!
//! These tests exercise the full payload → validate → compute → rank workflow
//! through the public API only.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use creators_core::{
    filter_dismissed, validate_agency_input, validate_input, InsightConfig, InsightEngine,
    InsightInput, InsightKey, Locale, RequestContext, Severity,
};

/// Thursday 2026-03-12 12:00 UTC
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 12, 12, 0, 0).unwrap()
}

fn request() -> RequestContext {
    RequestContext::at(now()).with_locale(Locale::En)
}

fn ts(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn overdue_task(id: &str, days_ago: i64) -> Value {
    json!({"id": id, "title": "Edit", "dueDate": ts(now() - Duration::days(days_ago)), "status": "todo"})
}

fn event(id: &str, start: DateTime<Utc>, company: Option<&str>) -> Value {
    json!({
        "id": id,
        "start": ts(start),
        "end": ts(start + Duration::hours(1)),
        "category": "shoot",
        "companyId": company,
    })
}

fn snapshot(payload: Value) -> InsightInput {
    validate_input(&payload)
        .into_result()
        .expect("fixture should validate")
}

fn compute(input: &InsightInput) -> Vec<creators_core::InsightDisplay> {
    InsightEngine::new().compute_insights(input, &request())
}

// =============================================================================
// Single-scope properties
// =============================================================================

#[test]
fn test_empty_inputs_return_empty() {
    let input = snapshot(json!({"tasks": [], "events": [], "companies": []}));
    assert!(compute(&input).is_empty());

    let agency = validate_agency_input(&json!({"creators": []}))
        .into_result()
        .unwrap();
    assert!(InsightEngine::new()
        .compute_agency_insights(&agency, &request())
        .is_empty());
}

#[test]
fn test_five_overdue_tasks() {
    // Old due dates keep the completion window empty
    let tasks: Vec<Value> = (1..=5).map(|i| overdue_task(&format!("t{}", i), 40 + i)).collect();
    let input = snapshot(json!({"tasks": tasks}));

    let insights = compute(&input);
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].insight_key, InsightKey::OverdueTasks);
    assert_eq!(insights[0].severity, Severity::Warning);
    assert_eq!(insights[0].message, "5 tasks are past their due date");
}

#[test]
fn test_done_and_archived_tasks_are_not_overdue() {
    let input = snapshot(json!({
        "tasks": [
            {"id": "t1", "dueDate": "2026-01-05", "status": "done"},
            {"id": "t2", "dueDate": "2026-01-05", "archived": true},
            {"id": "t3", "status": "in_progress"},
        ]
    }));

    assert!(compute(&input).is_empty());
}

#[test]
fn test_no_events_this_week() {
    let last_week = event("e1", now() - Duration::days(6), None);
    let input = snapshot(json!({"events": [last_week]}));

    let insights = compute(&input);
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].insight_key, InsightKey::NoEventsThisWeek);
    assert_eq!(insights[0].severity, Severity::Info);

    let empty = snapshot(json!({"events": []}));
    assert!(compute(&empty).is_empty());
}

#[test]
fn test_company_concentration() {
    let base = now() - Duration::days(20);
    let mut events = vec![];
    for i in 0..8 {
        events.push(event(&format!("a{}", i), base + Duration::days(i), Some("c1")));
    }
    for i in 0..2 {
        events.push(event(&format!("b{}", i), base + Duration::days(i), Some("c2")));
    }
    let companies = json!([{"id": "c1", "name": "Acme"}, {"id": "c2", "name": "Globex"}]);

    let input = snapshot(json!({"events": events, "companies": companies}));
    let insights = compute(&input);
    let concentration: Vec<_> = insights
        .iter()
        .filter(|i| i.insight_key == InsightKey::CompanyConcentration)
        .collect();
    assert_eq!(concentration.len(), 1);
    assert_eq!(concentration[0].message, "80% of your activity is tied to Acme");

    let mut split = vec![];
    for i in 0..5 {
        split.push(event(&format!("a{}", i), base + Duration::days(i), Some("c1")));
        split.push(event(&format!("b{}", i), base + Duration::days(i), Some("c2")));
    }
    let input = snapshot(json!({"events": split, "companies": companies}));
    assert!(compute(&input)
        .iter()
        .all(|i| i.insight_key != InsightKey::CompanyConcentration));
}

#[test]
fn test_company_concentration_counts_unattributed_activity() {
    let base = now() - Duration::days(20);
    let mut events = vec![];
    for i in 0..5 {
        events.push(event(&format!("a{}", i), base + Duration::days(i), Some("c1")));
    }
    for i in 0..20 {
        events.push(event(&format!("u{}", i), base + Duration::hours(i), None));
    }
    let companies = json!([{"id": "c1", "name": "Acme"}]);

    let input = snapshot(json!({"events": events, "companies": companies}));
    assert!(compute(&input)
        .iter()
        .all(|i| i.insight_key != InsightKey::CompanyConcentration));
}

#[test]
fn test_ranking_and_idempotence() {
    // Overdue (risk at 10), heavy days, and a quiet current week
    let tasks: Vec<Value> = (1..=10).map(|i| overdue_task(&format!("t{}", i), 40 + i)).collect();
    let mut events = vec![];
    for day in 7..10 {
        for n in 0..5 {
            events.push(event(
                &format!("e{}-{}", day, n),
                now() - Duration::days(day) + Duration::minutes(n),
                None,
            ));
        }
    }
    let input = snapshot(json!({"tasks": tasks, "events": events}));

    let first = compute(&input);
    let second = compute(&input);
    assert_eq!(first, second);

    let keys: Vec<InsightKey> = first.iter().map(|i| i.insight_key).collect();
    assert_eq!(
        keys,
        vec![
            InsightKey::OverdueTasks,
            InsightKey::HeavyDaysStreak,
            InsightKey::NoEventsThisWeek,
        ]
    );
    assert_eq!(first[0].severity, Severity::Risk);
    assert_eq!(first[1].severity, Severity::Warning);

    let priorities: Vec<u8> = first.iter().map(|i| i.severity.priority()).collect();
    assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_dismissed_insights_are_filtered() {
    let tasks: Vec<Value> = (1..=3).map(|i| overdue_task(&format!("t{}", i), 40 + i)).collect();
    let events = vec![event("e1", now() - Duration::days(10), None)];
    let input = snapshot(json!({"tasks": tasks, "events": events}));

    let insights = compute(&input);
    assert_eq!(insights.len(), 2);

    let dismissed = vec![insights[0].id.clone()];
    let remaining = filter_dismissed(compute(&input), &dismissed);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0], insights[1]);
}

#[test]
fn test_hebrew_is_default_locale() {
    let tasks = vec![overdue_task("t1", 45)];
    let input = snapshot(json!({"tasks": tasks}));

    let insights = InsightEngine::new().compute_insights(&input, &RequestContext::at(now()));
    assert_eq!(insights[0].title, "משימות באיחור");
}

#[test]
fn test_custom_thresholds() {
    let config = InsightConfig::parse("[overdue]\nrisk_count = 2\n").unwrap();
    let tasks: Vec<Value> = (1..=2).map(|i| overdue_task(&format!("t{}", i), 40 + i)).collect();
    let input = snapshot(json!({"tasks": tasks}));

    let insights = InsightEngine::with_config(config).compute_insights(&input, &request());
    assert_eq!(insights[0].severity, Severity::Risk);
}

#[test]
fn test_extreme_thresholds_do_not_panic() {
    let config = InsightConfig::parse(
        r#"
        [heavy_days]
        lookback_days = 4294967295

        [completion]
        window_days = 200000000

        [due_soon]
        hours = 4294967295

        [creator_risk]
        quiet_days = 4294967295
        "#,
    )
    .unwrap();
    let engine = InsightEngine::with_config(config);

    let tasks: Vec<Value> = (1..=3).map(|i| overdue_task(&format!("t{}", i), i)).collect();
    let events = vec![event("e1", now() - Duration::days(10), None)];
    let input = snapshot(json!({"tasks": tasks, "events": events}));
    let insights = engine.compute_insights(&input, &request());
    assert!(insights
        .iter()
        .any(|i| i.insight_key == InsightKey::OverdueTasks));
    assert!(insights
        .iter()
        .all(|i| i.insight_key != InsightKey::CompletionRateLow));

    let agency = validate_agency_input(&json!({
        "creators": [{"name": "Noa", "tasks": tasks, "events": events}],
    }))
    .into_result()
    .unwrap();
    let insights = engine.compute_agency_insights(&agency, &request());
    assert!(insights
        .iter()
        .all(|i| i.insight_key != InsightKey::AgencyPerformanceUp));
}

// =============================================================================
// Agency properties
// =============================================================================

#[test]
fn test_agency_creator_at_risk() {
    let payload = json!({
        "creators": [
            {"name": "Noa", "tasks": [overdue_task("n1", 2), overdue_task("n2", 3)]},
            {"name": "Dan", "tasks": []},
        ]
    });
    let agency = validate_agency_input(&payload).into_result().unwrap();

    let insights = InsightEngine::new().compute_agency_insights(&agency, &request());
    let at_risk: Vec<_> = insights
        .iter()
        .filter(|i| i.insight_key == InsightKey::CreatorAtRisk)
        .collect();

    assert_eq!(at_risk.len(), 1);
    assert_eq!(at_risk[0].severity, Severity::Risk);
    assert_eq!(at_risk[0].creator_name.as_deref(), Some("Noa"));
    assert!(at_risk[0].message.contains("Noa"));
    assert_eq!(insights[0].severity, Severity::Risk);
}

#[test]
fn test_agency_ids_differ_per_creator() {
    let payload = json!({
        "creators": [
            {"name": "Noa", "tasks": [overdue_task("n1", 45)]},
            {"name": "Dan", "tasks": [overdue_task("d1", 45)]},
        ]
    });
    let agency = validate_agency_input(&payload).into_result().unwrap();

    let insights = InsightEngine::new().compute_agency_insights(&agency, &request());
    let overdue: Vec<_> = insights
        .iter()
        .filter(|i| i.insight_key == InsightKey::OverdueTasks)
        .collect();

    assert_eq!(overdue.len(), 2);
    assert_eq!(overdue[0].creator_name.as_deref(), Some("Noa"));
    assert_eq!(overdue[1].creator_name.as_deref(), Some("Dan"));
    assert_ne!(overdue[0].id, overdue[1].id);
}

#[test]
fn test_agency_performance_up() {
    let mut tasks = vec![];
    for i in 0..5 {
        let at = ts(now() - Duration::days(3 + i));
        let status = if i < 4 { "done" } else { "todo" };
        tasks.push(json!({"id": format!("cur{}", i), "dueDate": at, "completedAt": at, "status": status}));
    }
    for i in 0..5 {
        let at = ts(now() - Duration::days(40 + i));
        let status = if i < 2 { "done" } else { "todo" };
        tasks.push(json!({"id": format!("prev{}", i), "dueDate": at, "completedAt": at, "status": status}));
    }
    let agency = validate_agency_input(&json!({"creators": [{"name": "Noa", "tasks": tasks}]}))
        .into_result()
        .unwrap();

    let insights = InsightEngine::new().compute_agency_insights(&agency, &request());
    let up: Vec<_> = insights
        .iter()
        .filter(|i| i.insight_key == InsightKey::AgencyPerformanceUp)
        .collect();

    assert_eq!(up.len(), 1);
    assert!(up[0].creator_name.is_none());
}
