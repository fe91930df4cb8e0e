//! Snapshot validation handler

use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::AppError;
use creators_core::{validate_agency_input, validate_input};

#[derive(Debug, Default, Deserialize)]
pub struct ValidateQuery {
    /// Validate as an agency payload
    #[serde(default)]
    pub agency: bool,
}

/// POST /api/snapshots/validate - Check a payload without computing insights
///
/// Always answers 200 with a tagged `{"status": "valid" | "invalid", ...}` body.
pub async fn validate_snapshot(
    Query(params): Query<ValidateQuery>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = if params.agency {
        let validation = validate_agency_input(&body);
        tracing::debug!(valid = validation.is_valid(), "Validated agency payload");
        serde_json::to_value(validation)?
    } else {
        let validation = validate_input(&body);
        tracing::debug!(valid = validation.is_valid(), "Validated snapshot payload");
        serde_json::to_value(validation)?
    };

    Ok(Json(result))
}
