//! Creators OS Core Library
//!
//! Shared functionality for the Creators OS insight surfaces:
//! - Snapshot data model (tasks, calendar events, companies)
//! - Deterministic insight engine (creator and agency scope)
//! - Hebrew/English insight messages
//! - Threshold configuration loaded from TOML
//! - Schema validation for untyped snapshot payloads

pub mod config;
pub mod context;
pub mod error;
pub mod insights;
pub mod messages;
pub mod models;
pub mod validation;

/// Snapshot fixture builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::InsightConfig;
pub use context::{Locale, RequestContext};
pub use error::{Error, Result};
pub use insights::{
    compute_agency_insights, compute_insights, filter_dismissed, InsightDisplay, InsightEngine,
    InsightKey, Severity, SeverityStyle,
};
pub use models::{
    AgencyInput, CalendarEvent, Company, CreatorSnapshot, EventCategory, InsightInput, Scope,
    Task, TaskStatus,
};
pub use validation::{validate_agency_input, validate_input, FieldError, Validation};
