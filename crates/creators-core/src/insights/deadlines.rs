//! Deadline insights
//!
//! - Overdue tasks: active tasks whose due date has passed
//! - Tasks due soon: active tasks coming due within the look-ahead window

use chrono::{DateTime, Duration, Utc};

use crate::messages;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKey, Severity};

/// Insight that counts overdue tasks
pub struct OverdueTasksInsight;

impl Insight for OverdueTasksInsight {
    fn key(&self) -> InsightKey {
        InsightKey::OverdueTasks
    }

    fn name(&self) -> &'static str {
        "Overdue Tasks"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let now = ctx.now();
        let count = ctx
            .snapshot
            .tasks
            .iter()
            .filter(|t| t.is_overdue(now))
            .count();

        if count == 0 {
            return vec![];
        }

        let severity = if count as u64 >= ctx.config.overdue.risk_count as u64 {
            Severity::Risk
        } else {
            Severity::Warning
        };

        let text = messages::overdue_tasks(ctx.locale(), count);
        vec![Finding::new(self.key(), severity, text.title, text.message)]
    }
}

/// Insight that counts tasks due within the next few hours
pub struct TasksDueSoonInsight;

impl Insight for TasksDueSoonInsight {
    fn key(&self) -> InsightKey {
        InsightKey::TasksDueSoon
    }

    fn name(&self) -> &'static str {
        "Tasks Due Soon"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let hours = ctx.config.due_soon.hours;
        let now = ctx.now();
        let horizon = now
            .checked_add_signed(Duration::hours(hours as i64))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let count = ctx
            .snapshot
            .tasks
            .iter()
            .filter(|t| t.is_active())
            .filter_map(|t| t.due_date)
            .filter(|due| *due >= now && *due <= horizon)
            .count();

        if count == 0 {
            return vec![];
        }

        let text = messages::tasks_due_soon(ctx.locale(), count, hours);
        vec![Finding::new(self.key(), Severity::Info, text.title, text.message)]
    }
}
