//! Insight handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use creators_core::{
    filter_dismissed, validate_agency_input, validate_input, InsightDisplay, InsightKey, Locale,
    RequestContext, Severity, SeverityStyle,
};

/// Per-request options that ride alongside the snapshot in the body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    /// Reference time (defaults to the server clock)
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locale: Option<Locale>,
    /// Caller's UTC offset in minutes for day boundaries
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    /// Insight ids the user has dismissed
    #[serde(default)]
    pub dismissed: Vec<String>,
}

impl RequestOptions {
    fn from_body(body: &serde_json::Value) -> Result<Self, AppError> {
        serde_json::from_value(body.clone())
            .map_err(|e| AppError::bad_request(&format!("Invalid request options: {}", e)))
    }

    fn context(&self) -> Result<RequestContext, AppError> {
        let mut ctx = RequestContext::at(self.now.unwrap_or_else(Utc::now))
            .with_locale(self.locale.unwrap_or_default());

        if let Some(minutes) = self.utc_offset_minutes {
            let offset = minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| AppError::bad_request("utcOffsetMinutes out of range"))?;
            ctx = ctx.with_utc_offset(offset);
        }

        Ok(ctx)
    }
}

/// POST /api/insights - Ranked insights for one snapshot
///
/// Body: `{tasks, events, companies, scope, now?, locale?, utcOffsetMinutes?, dismissed?}`.
pub async fn compute_insights(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Vec<InsightDisplay>>, AppError> {
    let input = validate_input(&body)
        .into_result()
        .map_err(AppError::invalid_snapshot)?;

    let options = RequestOptions::from_body(&body)?;
    let request = options.context()?;

    let insights = state.engine.compute_insights(&input, &request);
    let insights = filter_dismissed(insights, &options.dismissed);

    tracing::info!(
        scope = input.scope.as_str(),
        count = insights.len(),
        "Computed insights"
    );

    Ok(Json(insights))
}

/// POST /api/agency/insights - Ranked insights across managed creators
///
/// Body: `{creators: [{name, tasks, events, companies}], now?, locale?, utcOffsetMinutes?, dismissed?}`.
pub async fn compute_agency_insights(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Vec<InsightDisplay>>, AppError> {
    let input = validate_agency_input(&body)
        .into_result()
        .map_err(AppError::invalid_snapshot)?;

    let options = RequestOptions::from_body(&body)?;
    let request = options.context()?;

    let insights = state.engine.compute_agency_insights(&input, &request);
    let insights = filter_dismissed(insights, &options.dismissed);

    tracing::info!(
        creators = input.creators.len(),
        count = insights.len(),
        "Computed agency insights"
    );

    Ok(Json(insights))
}

/// One entry of the insight-key vocabulary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightKeyInfo {
    pub key: InsightKey,
    pub icon: &'static str,
    pub severities: &'static [Severity],
    pub agency_only: bool,
}

/// GET /api/insights/keys - Insight-key vocabulary
pub async fn list_insight_keys(State(state): State<Arc<AppState>>) -> Json<Vec<InsightKeyInfo>> {
    let keys = state
        .engine
        .insight_keys()
        .into_iter()
        .map(|key| InsightKeyInfo {
            key,
            icon: key.icon(),
            severities: key.severities(),
            agency_only: key.agency_only(),
        })
        .collect();

    Json(keys)
}

/// GET /api/insights/styles - Severity display tokens
pub async fn list_severity_styles() -> Json<BTreeMap<&'static str, SeverityStyle>> {
    Json(
        Severity::all()
            .iter()
            .map(|s| (s.as_str(), s.style()))
            .collect(),
    )
}
