//! Insight Engine - deterministic creator and agency insights
//!
//! The Insight Engine turns a snapshot of tasks, calendar events and companies
//! into a short, ranked list of insights. Every rule is a pure predicate plus
//! a formatter: no I/O, no randomness, and "now" comes from the request.
//!
//! ## Insight Kinds
//!
//! - **Overdue tasks** / **Tasks due soon** - deadline pressure
//! - **Heavy days streak** / **No events this week** - calendar workload
//! - **Company concentration** - dependence on one client
//! - **Completion rate low** - share of finished work
//! - **Creator at risk** / **Agency performance up** - agency scope only
//!
//! ## Usage
//!
//! ```rust,ignore
//! use creators_core::{InsightEngine, RequestContext};
//!
//! let engine = InsightEngine::with_config(config);
//! let insights = engine.compute_insights(&input, &RequestContext::now());
//! ```

pub mod agency;
pub mod completion;
pub mod concentration;
pub mod deadlines;
pub mod engine;
pub mod types;
pub mod workload;

use std::collections::HashSet;

use crate::context::RequestContext;
use crate::models::{AgencyInput, InsightInput};

pub use agency::{AgencyPerformanceUpInsight, CreatorAtRiskInsight, RiskSignal};
pub use completion::{CompletionRateLowInsight, CompletionStats};
pub use concentration::CompanyConcentrationInsight;
pub use deadlines::{OverdueTasksInsight, TasksDueSoonInsight};
pub use engine::{AnalysisContext, Insight, InsightEngine, SnapshotRef};
pub use types::{Finding, InsightDisplay, InsightKey, Severity, SeverityStyle};
pub use workload::{HeavyDaysStreakInsight, NoEventsThisWeekInsight};

/// Ranked insights for one snapshot, using default thresholds and the system clock
pub fn compute_insights(input: &InsightInput) -> Vec<InsightDisplay> {
    InsightEngine::new().compute_insights(input, &RequestContext::now())
}

/// Ranked insights for an agency, using default thresholds and the system clock
pub fn compute_agency_insights(input: &AgencyInput) -> Vec<InsightDisplay> {
    InsightEngine::new().compute_agency_insights(input, &RequestContext::now())
}

/// Drop insights the user has dismissed, keeping the ranking of the rest
pub fn filter_dismissed(insights: Vec<InsightDisplay>, dismissed: &[String]) -> Vec<InsightDisplay> {
    if dismissed.is_empty() {
        return insights;
    }
    let dismissed: HashSet<&str> = dismissed.iter().map(String::as_str).collect();
    insights
        .into_iter()
        .filter(|i| !dismissed.contains(i.id.as_str()))
        .collect()
}
