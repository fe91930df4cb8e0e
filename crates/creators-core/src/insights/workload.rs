//! Calendar workload insights
//!
//! - Heavy days streak: consecutive local days with too many events
//! - No events this week: an empty current week for an otherwise active calendar

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::messages;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKey, Severity};

/// Insight that detects runs of overloaded calendar days
pub struct HeavyDaysStreakInsight;

impl HeavyDaysStreakInsight {
    /// Longest run of heavy days inside the lookback window, as (start, length)
    fn longest_streak(ctx: &AnalysisContext<'_>) -> Option<(NaiveDate, u32)> {
        let thresholds = &ctx.config.heavy_days;
        if thresholds.lookback_days == 0 {
            return None;
        }

        let today = ctx.request.today();
        let first_day = today
            .checked_sub_signed(Duration::days(thresholds.lookback_days as i64 - 1))
            .unwrap_or(NaiveDate::MIN);

        let mut per_day: HashMap<NaiveDate, u32> = HashMap::new();
        let now = ctx.now();
        for event in ctx.snapshot.events.iter().filter(|e| e.start <= now) {
            let day = ctx.request.local_date(event.start);
            if day >= first_day && day <= today {
                *per_day.entry(day).or_insert(0) += 1;
            }
        }

        // Days before the earliest event cannot be heavy
        let earliest = per_day.keys().min().copied()?;

        let mut best: Option<(NaiveDate, u32)> = None;
        let mut run: Option<(NaiveDate, u32)> = None;

        for day in earliest.iter_days().take_while(|d| *d <= today) {
            let heavy = per_day.get(&day).copied().unwrap_or(0) > thresholds.events_per_day;
            run = match (heavy, run) {
                (true, Some((start, len))) => Some((start, len + 1)),
                (true, None) => Some((day, 1)),
                (false, _) => None,
            };

            // Ties go to the most recent run
            if let Some((start, len)) = run {
                if best.map_or(true, |(_, best_len)| len >= best_len) {
                    best = Some((start, len));
                }
            }
        }

        best
    }
}

impl Insight for HeavyDaysStreakInsight {
    fn key(&self) -> InsightKey {
        InsightKey::HeavyDaysStreak
    }

    fn name(&self) -> &'static str {
        "Heavy Days Streak"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let thresholds = &ctx.config.heavy_days;

        let Some((start, days)) = Self::longest_streak(ctx) else {
            return vec![];
        };
        if days < thresholds.min_streak {
            return vec![];
        }

        let severity = if days >= thresholds.risk_streak {
            Severity::Risk
        } else {
            Severity::Warning
        };

        let text = messages::heavy_days_streak(ctx.locale(), days, thresholds.events_per_day);
        vec![
            Finding::new(self.key(), severity, text.title, text.message)
                .with_subject(start.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Insight that flags an empty calendar for the current week
pub struct NoEventsThisWeekInsight;

impl Insight for NoEventsThisWeekInsight {
    fn key(&self) -> InsightKey {
        InsightKey::NoEventsThisWeek
    }

    fn name(&self) -> &'static str {
        "No Events This Week"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let events = ctx.snapshot.events;
        let (week_start, week_end) = ctx.request.current_week();

        // Only meaningful for a calendar that has been used before
        let has_history = events.iter().any(|e| e.start < week_start);
        if !has_history {
            return vec![];
        }

        let this_week = events
            .iter()
            .any(|e| e.start >= week_start && e.start < week_end);
        if this_week {
            return vec![];
        }

        let text = messages::no_events_this_week(ctx.locale());
        let subject = ctx.request.local_date(week_start).format("%Y-%m-%d").to_string();
        vec![Finding::new(self.key(), Severity::Info, text.title, text.message).with_subject(subject)]
    }
}
