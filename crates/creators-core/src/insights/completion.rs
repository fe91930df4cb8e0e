//! Completion rate insight and shared window statistics

use chrono::{DateTime, Duration, Utc};

use crate::messages;
use crate::models::Task;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKey, Severity};

/// Done vs still-active tasks whose reference time falls in a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionStats {
    pub done: u32,
    pub active: u32,
}

impl CompletionStats {
    pub fn sample(&self) -> u32 {
        self.done + self.active
    }

    /// Completion ratio, or `None` for an empty window
    pub fn rate(&self) -> Option<f64> {
        match self.sample() {
            0 => None,
            n => Some(self.done as f64 / n as f64),
        }
    }

    /// Rate, but only when the window holds at least `min_sample` tasks
    pub fn rate_with_sample(&self, min_sample: u32) -> Option<f64> {
        if self.sample() < min_sample.max(1) {
            return None;
        }
        self.rate()
    }
}

/// Tally tasks in the window `(start, end]`
pub fn completion_stats(tasks: &[Task], start: DateTime<Utc>, end: DateTime<Utc>) -> CompletionStats {
    let mut stats = CompletionStats::default();

    for task in tasks {
        let Some(at) = task.reference_time() else {
            continue;
        };
        if at <= start || at > end {
            continue;
        }
        if task.is_done() {
            stats.done += 1;
        } else {
            stats.active += 1;
        }
    }

    stats
}

/// Trailing window ending at `now`, or `None` when the start is out of range
pub fn trailing_window(now: DateTime<Utc>, days: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = now.checked_sub_signed(Duration::days(days as i64))?;
    Some((start, now))
}

/// Insight that flags a low share of completed tasks
pub struct CompletionRateLowInsight;

impl Insight for CompletionRateLowInsight {
    fn key(&self) -> InsightKey {
        InsightKey::CompletionRateLow
    }

    fn name(&self) -> &'static str {
        "Low Completion Rate"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let thresholds = &ctx.config.completion;
        if thresholds.window_days == 0 {
            return vec![];
        }

        let Some((start, end)) = trailing_window(ctx.now(), thresholds.window_days) else {
            tracing::debug!(window_days = thresholds.window_days, "Completion window out of range");
            return vec![];
        };
        let stats = completion_stats(ctx.snapshot.tasks, start, end);

        let Some(rate) = stats.rate_with_sample(thresholds.min_sample) else {
            return vec![];
        };
        if rate >= thresholds.min_rate {
            return vec![];
        }

        let text = messages::completion_rate_low(
            ctx.locale(),
            messages::percent(rate),
            thresholds.window_days,
        );
        vec![Finding::new(self.key(), Severity::Warning, text.title, text.message)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InsightConfig;
    use crate::context::{Locale, RequestContext};
    use crate::models::{Scope, TaskStatus};
    use crate::test_utils::{fixed_now, task, SnapshotBuilder};

    fn run(builder: SnapshotBuilder) -> Vec<Finding> {
        let input = builder.build();
        let request = RequestContext::at(fixed_now()).with_locale(Locale::En);
        let config = InsightConfig::default();
        let ctx = AnalysisContext::new((&input).into(), &request, &config, Scope::Creator);
        CompletionRateLowInsight.analyze(&ctx)
    }

    #[test]
    fn test_stats_window_bounds() {
        let now = fixed_now();
        let tasks = SnapshotBuilder::new(now)
            .done_tasks(2, 5, None)
            .done_tasks(1, 30, None)
            .overdue_tasks_since(1, 31)
            .overdue_tasks(3, None)
            .build()
            .tasks;

        let (start, end) = trailing_window(now, 30).unwrap();
        let stats = completion_stats(&tasks, start, end);
        assert_eq!(stats, CompletionStats { done: 2, active: 3 });
        assert!((stats.rate().unwrap() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_window_out_of_range() {
        assert!(trailing_window(fixed_now(), u32::MAX).is_none());

        let mut config = InsightConfig::default();
        config.completion.window_days = 200_000_000;
        let input = SnapshotBuilder::new(fixed_now()).overdue_tasks(6, None).build();
        let request = RequestContext::at(fixed_now()).with_locale(Locale::En);
        let ctx = AnalysisContext::new((&input).into(), &request, &config, Scope::Creator);
        assert!(CompletionRateLowInsight.analyze(&ctx).is_empty());
    }

    #[test]
    fn test_stats_skip_archived_and_unplaced() {
        let now = fixed_now();
        let mut archived = task("a", TaskStatus::Done, Some(now - Duration::days(1)));
        archived.archived = true;
        let tasks = vec![archived, task("u", TaskStatus::Todo, None)];

        let (start, end) = trailing_window(now, 30).unwrap();
        let stats = completion_stats(&tasks, start, end);
        assert_eq!(stats.sample(), 0);
        assert!(stats.rate().is_none());
    }

    #[test]
    fn test_low_rate_fires() {
        let builder = SnapshotBuilder::new(fixed_now())
            .done_tasks(1, 2, None)
            .overdue_tasks(4, None);

        let findings = run(builder);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(
            findings[0].message,
            "Only 20% of tasks were completed in the last 30 days"
        );
    }

    #[test]
    fn test_small_sample_does_not_fire() {
        let builder = SnapshotBuilder::new(fixed_now()).overdue_tasks(4, None);
        assert!(run(builder).is_empty());
    }

    #[test]
    fn test_healthy_rate_does_not_fire() {
        let builder = SnapshotBuilder::new(fixed_now())
            .done_tasks(3, 2, None)
            .overdue_tasks(3, None);

        assert!(run(builder).is_empty());
    }
}
