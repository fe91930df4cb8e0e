//! Insight Engine - orchestrates rule evaluation and ranking

use chrono::{DateTime, Utc};

use crate::config::InsightConfig;
use crate::context::{Locale, RequestContext};
use crate::models::{AgencyInput, CalendarEvent, Company, CreatorSnapshot, InsightInput, Scope, Task};

use super::types::{Finding, InsightDisplay, InsightKey};
use super::{
    AgencyPerformanceUpInsight, CompanyConcentrationInsight, CompletionRateLowInsight,
    CreatorAtRiskInsight, HeavyDaysStreakInsight, NoEventsThisWeekInsight, OverdueTasksInsight,
    TasksDueSoonInsight,
};

/// Borrowed view over the collections one pass evaluates
#[derive(Debug, Clone, Copy)]
pub struct SnapshotRef<'a> {
    pub tasks: &'a [Task],
    pub events: &'a [CalendarEvent],
    pub companies: &'a [Company],
}

impl<'a> From<&'a InsightInput> for SnapshotRef<'a> {
    fn from(input: &'a InsightInput) -> Self {
        Self {
            tasks: &input.tasks,
            events: &input.events,
            companies: &input.companies,
        }
    }
}

impl<'a> From<&'a CreatorSnapshot> for SnapshotRef<'a> {
    fn from(creator: &'a CreatorSnapshot) -> Self {
        Self {
            tasks: &creator.tasks,
            events: &creator.events,
            companies: &creator.companies,
        }
    }
}

/// Context provided to insight rules
pub struct AnalysisContext<'a> {
    pub snapshot: SnapshotRef<'a>,
    pub request: &'a RequestContext,
    pub config: &'a InsightConfig,
    pub scope: Scope,
    /// Set when evaluating one managed creator inside an agency
    pub creator_name: Option<&'a str>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        snapshot: SnapshotRef<'a>,
        request: &'a RequestContext,
        config: &'a InsightConfig,
        scope: Scope,
    ) -> Self {
        Self {
            snapshot,
            request,
            config,
            scope,
            creator_name: None,
        }
    }

    pub fn for_creator(mut self, name: &'a str) -> Self {
        self.creator_name = Some(name);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.request.now
    }

    pub fn locale(&self) -> Locale {
        self.request.locale
    }

    /// Display name of a company, if the snapshot knows it
    pub fn company_name(&self, id: &str) -> Option<&'a str> {
        self.snapshot
            .companies
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }
}

/// A single insight rule: a predicate plus a formatter over the snapshot
///
/// Rules never fail. Missing or insufficient data means an empty result.
pub trait Insight: Send + Sync {
    fn key(&self) -> InsightKey;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Whether this rule runs for the given pass
    fn applies_to(&self, _ctx: &AnalysisContext<'_>) -> bool {
        true
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding>;
}

/// The main insight engine that evaluates and ranks rules
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
    config: InsightConfig,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with built-in rules and default thresholds
    pub fn new() -> Self {
        Self::with_config(InsightConfig::default())
    }

    /// Create an engine with built-in rules and the given thresholds
    pub fn with_config(config: InsightConfig) -> Self {
        let mut engine = Self {
            insights: vec![],
            config,
        };

        // Registration order is the tie-break order within a severity
        engine.register(Box::new(OverdueTasksInsight));
        engine.register(Box::new(HeavyDaysStreakInsight));
        engine.register(Box::new(CompanyConcentrationInsight));
        engine.register(Box::new(CompletionRateLowInsight));
        engine.register(Box::new(NoEventsThisWeekInsight));
        engine.register(Box::new(TasksDueSoonInsight));
        engine.register(Box::new(CreatorAtRiskInsight));
        engine.register(Box::new(AgencyPerformanceUpInsight));

        engine
    }

    /// Create an engine with no rules registered
    pub fn empty(config: InsightConfig) -> Self {
        Self {
            insights: vec![],
            config,
        }
    }

    /// Register an insight rule
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Keys of registered rules, in registration order
    pub fn insight_keys(&self) -> Vec<InsightKey> {
        self.insights.iter().map(|i| i.key()).collect()
    }

    /// Run every applicable rule and rank the findings
    pub fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        self.analyze_filtered(ctx, |_| true)
    }

    fn analyze_filtered(
        &self,
        ctx: &AnalysisContext<'_>,
        include: impl Fn(InsightKey) -> bool,
    ) -> Vec<Finding> {
        let mut all_findings = vec![];

        for insight in &self.insights {
            if !include(insight.key()) || !insight.applies_to(ctx) {
                continue;
            }

            let findings = insight.analyze(ctx);
            tracing::debug!(
                insight = insight.key().as_str(),
                creator = ctx.creator_name.unwrap_or("-"),
                count = findings.len(),
                "Insight rule evaluated"
            );
            all_findings.extend(findings);
        }

        sort_by_severity(&mut all_findings, |f| f.severity.priority());
        all_findings
    }

    /// Compute ranked insights for one snapshot
    pub fn compute_insights(
        &self,
        input: &InsightInput,
        request: &RequestContext,
    ) -> Vec<InsightDisplay> {
        let ctx = AnalysisContext::new(input.into(), request, &self.config, input.scope);

        let insights: Vec<InsightDisplay> = self
            .analyze(&ctx)
            .into_iter()
            .map(|f| f.into_display(None))
            .collect();

        tracing::debug!(
            scope = input.scope.as_str(),
            tasks = input.tasks.len(),
            events = input.events.len(),
            insights = insights.len(),
            "Insight computation complete"
        );
        insights
    }

    /// Compute ranked insights across an agency's managed creators
    ///
    /// Agency-wide insights come first, then each creator's insights in input
    /// order. The concatenation is stable-sorted by severity only, so ties keep
    /// that order and each creator's insights keep their relative order.
    pub fn compute_agency_insights(
        &self,
        input: &AgencyInput,
        request: &RequestContext,
    ) -> Vec<InsightDisplay> {
        let combined = input.combined();
        let wide_ctx = AnalysisContext::new((&combined).into(), request, &self.config, Scope::Agency);

        let mut insights: Vec<InsightDisplay> = self
            .analyze_filtered(&wide_ctx, |key| key.agency_only())
            .into_iter()
            .map(|f| f.into_display(None))
            .collect();

        for creator in &input.creators {
            let ctx = AnalysisContext::new(creator.into(), request, &self.config, Scope::Agency)
                .for_creator(&creator.name);

            insights.extend(
                self.analyze(&ctx)
                    .into_iter()
                    .map(|f| f.into_display(Some(&creator.name))),
            );
        }

        sort_by_severity(&mut insights, |i| i.severity.priority());

        tracing::debug!(
            creators = input.creators.len(),
            insights = insights.len(),
            "Agency insight computation complete"
        );
        insights
    }
}

/// Stable sort, most urgent first
fn sort_by_severity<T>(items: &mut [T], priority: impl Fn(&T) -> u8) {
    items.sort_by(|a, b| priority(b).cmp(&priority(a)));
}
