//! Localized insight titles and messages
//!
//! Hebrew is the product's primary language; English is kept in sync for the
//! agency dashboard and for logs.

use crate::context::Locale;
use crate::insights::agency::RiskSignal;

/// Title and message for one insight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub title: String,
    pub message: String,
}

impl Text {
    fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

pub fn overdue_tasks(locale: Locale, count: usize) -> Text {
    match locale {
        Locale::He => Text::new(
            "משימות באיחור",
            if count == 1 {
                "משימה אחת עברה את מועד היעד".to_string()
            } else {
                format!("{} משימות עברו את מועד היעד", count)
            },
        ),
        Locale::En => Text::new(
            "Overdue tasks",
            if count == 1 {
                "1 task is past its due date".to_string()
            } else {
                format!("{} tasks are past their due date", count)
            },
        ),
    }
}

pub fn heavy_days_streak(locale: Locale, days: u32, events_per_day: u32) -> Text {
    match locale {
        Locale::He => Text::new(
            "רצף ימים עמוסים",
            format!(
                "{} ימים רצופים עם יותר מ-{} אירועים ביום. כדאי לפנות זמן להתאוששות",
                days, events_per_day
            ),
        ),
        Locale::En => Text::new(
            "Heavy days streak",
            format!(
                "{} consecutive days with more than {} events a day. Consider blocking time to recover",
                days, events_per_day
            ),
        ),
    }
}

pub fn company_concentration(locale: Locale, company: &str, percent: u32) -> Text {
    match locale {
        Locale::He => Text::new(
            "תלות בלקוח אחד",
            format!("{}% מהפעילות שלך קשורה ל-{}", percent, company),
        ),
        Locale::En => Text::new(
            "Company concentration",
            format!("{}% of your activity is tied to {}", percent, company),
        ),
    }
}

pub fn completion_rate_low(locale: Locale, percent: u32, window_days: u32) -> Text {
    match locale {
        Locale::He => Text::new(
            "שיעור השלמה נמוך",
            format!(
                "הושלמו רק {}% מהמשימות ב-{} הימים האחרונים",
                percent, window_days
            ),
        ),
        Locale::En => Text::new(
            "Low completion rate",
            format!(
                "Only {}% of tasks were completed in the last {} days",
                percent, window_days
            ),
        ),
    }
}

pub fn no_events_this_week(locale: Locale) -> Text {
    match locale {
        Locale::He => Text::new(
            "אין אירועים השבוע",
            "לא מתוכננים אירועים ביומן לשבוע הנוכחי",
        ),
        Locale::En => Text::new(
            "No events this week",
            "Your calendar has no events scheduled for the current week",
        ),
    }
}

pub fn tasks_due_soon(locale: Locale, count: usize, hours: u32) -> Text {
    match locale {
        Locale::He => Text::new(
            "משימות מתקרבות",
            if count == 1 {
                format!("משימה אחת מגיעה למועד היעד ב-{} השעות הקרובות", hours)
            } else {
                format!(
                    "{} משימות מגיעות למועד היעד ב-{} השעות הקרובות",
                    count, hours
                )
            },
        ),
        Locale::En => Text::new(
            "Tasks due soon",
            if count == 1 {
                format!("1 task is due in the next {} hours", hours)
            } else {
                format!("{} tasks are due in the next {} hours", count, hours)
            },
        ),
    }
}

pub fn creator_at_risk(locale: Locale, creator: &str, signals: &[RiskSignal]) -> Text {
    let parts: Vec<String> = signals
        .iter()
        .map(|signal| match (locale, signal) {
            (Locale::He, RiskSignal::Overdue(n)) => format!("{} משימות באיחור", n),
            (Locale::He, RiskSignal::LowCompletion(pct)) => format!("שיעור השלמה {}%", pct),
            (Locale::He, RiskSignal::Quiet(days)) => {
                format!("אין אירועים ב-{} הימים האחרונים", days)
            }
            (Locale::En, RiskSignal::Overdue(n)) => format!("{} overdue tasks", n),
            (Locale::En, RiskSignal::LowCompletion(pct)) => format!("{}% completion rate", pct),
            (Locale::En, RiskSignal::Quiet(days)) => {
                format!("no events in the last {} days", days)
            }
        })
        .collect();

    match locale {
        Locale::He => Text::new(
            format!("{} בסיכון", creator),
            format!("{}: {}", creator, parts.join(", ")),
        ),
        Locale::En => Text::new(
            format!("{} is at risk", creator),
            format!("{}: {}", creator, parts.join(", ")),
        ),
    }
}

pub fn agency_performance_up(locale: Locale, previous_percent: u32, current_percent: u32) -> Text {
    match locale {
        Locale::He => Text::new(
            "ביצועי הסוכנות בשיפור",
            format!(
                "שיעור ההשלמה עלה מ-{}% ל-{}% לעומת התקופה הקודמת",
                previous_percent, current_percent
            ),
        ),
        Locale::En => Text::new(
            "Agency performance is up",
            format!(
                "Completion rate rose from {}% to {}% compared to the previous period",
                previous_percent, current_percent
            ),
        ),
    }
}

/// Round a 0..=1 ratio to a whole percentage
pub fn percent(ratio: f64) -> u32 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overdue_singular_and_plural() {
        assert_eq!(
            overdue_tasks(Locale::En, 1).message,
            "1 task is past its due date"
        );
        assert!(overdue_tasks(Locale::En, 5).message.contains('5'));
        assert_eq!(
            overdue_tasks(Locale::He, 1).message,
            "משימה אחת עברה את מועד היעד"
        );
        assert!(overdue_tasks(Locale::He, 7).message.starts_with("7 "));
    }

    #[test]
    fn test_creator_at_risk_lists_signals() {
        let text = creator_at_risk(
            Locale::En,
            "Noa",
            &[RiskSignal::Overdue(3), RiskSignal::LowCompletion(0)],
        );
        assert_eq!(text.title, "Noa is at risk");
        assert_eq!(text.message, "Noa: 3 overdue tasks, 0% completion rate");
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(0.666), 67);
        assert_eq!(percent(1.4), 100);
        assert_eq!(percent(-0.2), 0);
    }
}
