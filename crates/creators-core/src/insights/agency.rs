//! Agency insights
//!
//! - Creator at risk: a managed creator shows several warning signals at once
//! - Agency performance up: completion rate improved over the previous window

use chrono::Duration;

use crate::messages;
use crate::models::Scope;

use super::completion::{completion_stats, trailing_window};
use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKey, Severity};

/// One reason a managed creator is considered at risk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskSignal {
    /// Number of overdue tasks
    Overdue(usize),
    /// Completion rate percentage over the completion window
    LowCompletion(u32),
    /// No events for this many days
    Quiet(u32),
}

/// Insight that combines per-creator signals into a single risk alert
pub struct CreatorAtRiskInsight;

impl CreatorAtRiskInsight {
    fn signals(ctx: &AnalysisContext<'_>) -> Vec<RiskSignal> {
        let thresholds = &ctx.config.creator_risk;
        let now = ctx.now();
        let mut signals = vec![];

        let overdue = ctx
            .snapshot
            .tasks
            .iter()
            .filter(|t| t.is_overdue(now))
            .count();
        if overdue > 0 && overdue >= thresholds.min_overdue as usize {
            signals.push(RiskSignal::Overdue(overdue));
        }

        let window = ctx.config.completion.window_days;
        if window > 0 {
            if let Some((start, end)) = trailing_window(now, window) {
                let stats = completion_stats(ctx.snapshot.tasks, start, end);
                if let Some(rate) = stats.rate_with_sample(thresholds.min_sample) {
                    if rate < ctx.config.completion.min_rate {
                        signals.push(RiskSignal::LowCompletion(messages::percent(rate)));
                    }
                }
            }
        }

        let quiet_since = match thresholds.quiet_days {
            0 => None,
            days => now.checked_sub_signed(Duration::days(days as i64)),
        };
        if let Some(quiet_since) = quiet_since {
            let events = ctx.snapshot.events;
            let has_history = events.iter().any(|e| e.start <= quiet_since);
            let recent = events
                .iter()
                .any(|e| e.start > quiet_since && e.start <= now);
            if has_history && !recent {
                signals.push(RiskSignal::Quiet(thresholds.quiet_days));
            }
        }

        signals
    }
}

impl Insight for CreatorAtRiskInsight {
    fn key(&self) -> InsightKey {
        InsightKey::CreatorAtRisk
    }

    fn name(&self) -> &'static str {
        "Creator At Risk"
    }

    fn applies_to(&self, ctx: &AnalysisContext<'_>) -> bool {
        ctx.scope == Scope::Agency && ctx.creator_name.is_some()
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let Some(creator) = ctx.creator_name.filter(|n| !n.trim().is_empty()) else {
            return vec![];
        };

        let signals = Self::signals(ctx);
        if signals.len() < ctx.config.creator_risk.min_signals.max(1) as usize {
            return vec![];
        }

        let text = messages::creator_at_risk(ctx.locale(), creator, &signals);
        vec![Finding::new(self.key(), Severity::Risk, text.title, text.message)]
    }
}

/// Insight that reports an agency-wide completion rate improvement
pub struct AgencyPerformanceUpInsight;

impl Insight for AgencyPerformanceUpInsight {
    fn key(&self) -> InsightKey {
        InsightKey::AgencyPerformanceUp
    }

    fn name(&self) -> &'static str {
        "Agency Performance Up"
    }

    fn applies_to(&self, ctx: &AnalysisContext<'_>) -> bool {
        ctx.scope == Scope::Agency && ctx.creator_name.is_none()
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let completion = &ctx.config.completion;
        if completion.window_days == 0 {
            return vec![];
        }

        let Some((current_start, now)) = trailing_window(ctx.now(), completion.window_days) else {
            return vec![];
        };
        let Some((previous_start, _)) = trailing_window(current_start, completion.window_days) else {
            return vec![];
        };

        let current = completion_stats(ctx.snapshot.tasks, current_start, now);
        let previous = completion_stats(ctx.snapshot.tasks, previous_start, current_start);

        let (Some(current_rate), Some(previous_rate)) = (
            current.rate_with_sample(completion.min_sample),
            previous.rate_with_sample(completion.min_sample),
        ) else {
            return vec![];
        };

        let improvement = current_rate - previous_rate;
        if improvement <= 0.0 || improvement < ctx.config.agency_performance.min_improvement {
            return vec![];
        }

        let text = messages::agency_performance_up(
            ctx.locale(),
            messages::percent(previous_rate),
            messages::percent(current_rate),
        );
        vec![Finding::new(self.key(), Severity::Info, text.title, text.message)]
    }
}
