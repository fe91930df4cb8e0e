//! Company concentration insight
//!
//! Flags a creator whose activity (tasks and events) leans on one company.

use std::collections::HashMap;

use crate::messages;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKey, Severity};

/// Insight that detects dependence on a single company
pub struct CompanyConcentrationInsight;

impl CompanyConcentrationInsight {
    /// Total activity count and per-company counts in order of first appearance
    ///
    /// The total includes activity with no company reference.
    fn counts<'a>(ctx: &AnalysisContext<'a>) -> (u32, Vec<(&'a str, u32)>) {
        let task_refs = ctx
            .snapshot
            .tasks
            .iter()
            .filter(|t| !t.archived)
            .map(|t| t.company_id.as_deref());
        let event_refs = ctx.snapshot.events.iter().map(|e| e.company_id.as_deref());

        let mut total: u32 = 0;
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, u32)> = vec![];

        for company in task_refs.chain(event_refs) {
            total = total.saturating_add(1);
            let Some(id) = company.filter(|id| !id.is_empty()) else {
                continue;
            };
            match index.get(id) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(id, counts.len());
                    counts.push((id, 1));
                }
            }
        }

        (total, counts)
    }
}

impl Insight for CompanyConcentrationInsight {
    fn key(&self) -> InsightKey {
        InsightKey::CompanyConcentration
    }

    fn name(&self) -> &'static str {
        "Company Concentration"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let thresholds = &ctx.config.concentration;
        let (total, counts) = Self::counts(ctx);

        if total == 0 || total < thresholds.min_activities {
            return vec![];
        }

        // First appearance wins ties
        let mut top: Option<(&str, u32)> = None;
        for &(id, n) in &counts {
            if top.map_or(true, |(_, best)| n > best) {
                top = Some((id, n));
            }
        }
        let Some((company_id, count)) = top else {
            return vec![];
        };

        let share = count as f64 / total as f64;
        if share <= thresholds.max_share {
            return vec![];
        }

        let Some(company) = ctx.company_name(company_id) else {
            tracing::debug!(company_id, "Concentrated company has no display name, skipping");
            return vec![];
        };

        let text = messages::company_concentration(ctx.locale(), company, messages::percent(share));
        vec![
            Finding::new(self.key(), Severity::Warning, text.title, text.message)
                .with_subject(company_id),
        ]
    }
}
