//! Creators OS Insight Server
//!
//! Axum-based REST API over the deterministic insight engine. Callers post a
//! snapshot (or an agency's snapshots) and get back ranked insights.
//!
//! Security features:
//! - Bearer API key authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Schema validation of every snapshot payload
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use creators_core::{FieldError, InsightEngine};

mod handlers;

/// Environment variable holding comma-separated API keys
pub const API_KEYS_ENV: &str = "CREATORS_API_KEYS";

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Routes reachable without credentials (liveness probes)
const PUBLIC_PATHS: &[&str] = &["/api/health"];

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys accepted as `Authorization: Bearer <key>`
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

/// Parse a comma-separated API key list, dropping blanks
pub fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shared application state
pub struct AppState {
    pub engine: InsightEngine,
    pub config: ServerConfig,
}

/// Authentication middleware - validates bearer API keys
///
/// API keys are compared using constant-time comparison to prevent timing attacks.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth || PUBLIC_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        tracing::debug!(path = %request.uri().path(), "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid API key");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Validate an API key against the configured keys using constant-time comparison
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    valid_keys.iter().any(|key| {
        let key_bytes = key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes))
    })
}

/// Create the application router
pub fn create_router(engine: InsightEngine, config: ServerConfig) -> Router {
    let cors = build_cors(&config);

    let state = Arc::new(AppState { engine, config });

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        // Insights
        .route("/insights", post(handlers::compute_insights))
        .route("/insights/keys", get(handlers::list_insight_keys))
        .route("/insights/styles", get(handlers::list_severity_styles))
        .route("/agency/insights", post(handlers::compute_agency_insights))
        // Validation
        .route("/snapshots/validate", post(handlers::validate_snapshot));

    // CSP: API only, nothing to load
    let csp_value = HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'");

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ))
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        return cors;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Start the server with custom configuration
pub async fn serve(
    engine: InsightEngine,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    } else if config.api_keys.is_empty() {
        warn!(
            "⚠️  No API keys configured ({}), every protected request will be rejected",
            API_KEYS_ENV
        );
    }

    let app = create_router(engine, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    errors: Vec<FieldError>,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            errors: vec![],
            internal: None,
        }
    }

    /// Payload failed schema validation
    pub fn invalid_snapshot(errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Snapshot failed validation".to_string(),
            errors,
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = if self.errors.is_empty() {
            serde_json::json!({ "error": self.message })
        } else {
            serde_json::json!({ "error": self.message, "errors": self.errors })
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            errors: vec![],
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
