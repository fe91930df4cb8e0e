//! Core types for the Insight Engine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Kinds of insights the engine can produce
///
/// The string form of each key is a stable contract: clients persist it for
/// dismissals and route alerts on it. New kinds get new keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKey {
    OverdueTasks,
    HeavyDaysStreak,
    CompanyConcentration,
    CompletionRateLow,
    NoEventsThisWeek,
    TasksDueSoon,
    /// Agency scope only
    CreatorAtRisk,
    /// Agency scope only
    AgencyPerformanceUp,
}

impl InsightKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKey::OverdueTasks => "overdue-tasks",
            InsightKey::HeavyDaysStreak => "heavy-days-streak",
            InsightKey::CompanyConcentration => "company-concentration",
            InsightKey::CompletionRateLow => "completion-rate-low",
            InsightKey::NoEventsThisWeek => "no-events-this-week",
            InsightKey::TasksDueSoon => "tasks-due-soon",
            InsightKey::CreatorAtRisk => "creator-at-risk",
            InsightKey::AgencyPerformanceUp => "agency-performance-up",
        }
    }

    /// Get all insight keys
    pub fn all() -> &'static [InsightKey] {
        &[
            Self::OverdueTasks,
            Self::HeavyDaysStreak,
            Self::CompanyConcentration,
            Self::CompletionRateLow,
            Self::NoEventsThisWeek,
            Self::TasksDueSoon,
            Self::CreatorAtRisk,
            Self::AgencyPerformanceUp,
        ]
    }

    pub fn icon(&self) -> &'static str {
        match self {
            InsightKey::OverdueTasks => "⏰",
            InsightKey::HeavyDaysStreak => "🔥",
            InsightKey::CompanyConcentration => "🏢",
            InsightKey::CompletionRateLow => "📉",
            InsightKey::NoEventsThisWeek => "📭",
            InsightKey::TasksDueSoon => "📌",
            InsightKey::CreatorAtRisk => "🚨",
            InsightKey::AgencyPerformanceUp => "📈",
        }
    }

    /// Severities this kind can be emitted with
    pub fn severities(&self) -> &'static [Severity] {
        match self {
            InsightKey::OverdueTasks | InsightKey::HeavyDaysStreak => {
                &[Severity::Warning, Severity::Risk]
            }
            InsightKey::CompanyConcentration | InsightKey::CompletionRateLow => &[Severity::Warning],
            InsightKey::NoEventsThisWeek
            | InsightKey::TasksDueSoon
            | InsightKey::AgencyPerformanceUp => &[Severity::Info],
            InsightKey::CreatorAtRisk => &[Severity::Risk],
        }
    }

    pub fn agency_only(&self) -> bool {
        matches!(
            self,
            InsightKey::CreatorAtRisk | InsightKey::AgencyPerformanceUp
        )
    }
}

impl fmt::Display for InsightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsightKey::all()
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown insight key: {}", s))
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention
    Warning,
    /// Requires immediate attention
    Risk,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Risk => "risk",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Risk => 3,
        }
    }

    /// Display tokens the dashboard renders this severity with
    pub fn style(&self) -> SeverityStyle {
        match self {
            Severity::Info => SeverityStyle {
                color: "#1d4ed8",
                background: "#eff6ff",
                border: "#bfdbfe",
            },
            Severity::Warning => SeverityStyle {
                color: "#b45309",
                background: "#fffbeb",
                border: "#fde68a",
            },
            Severity::Risk => SeverityStyle {
                color: "#b91c1c",
                background: "#fef2f2",
                border: "#fecaca",
            },
        }
    }

    pub fn all() -> &'static [Severity] {
        &[Severity::Risk, Severity::Warning, Severity::Info]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "risk" => Ok(Severity::Risk),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Color tokens for one severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityStyle {
    pub color: &'static str,
    pub background: &'static str,
    pub border: &'static str,
}

/// A finding produced by a rule (before it is attributed and given an id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub key: InsightKey,
    pub severity: Severity,
    /// What the finding is about (company id, streak end day, ...) for the id
    pub subject: String,
    pub title: String,
    pub message: String,
}

impl Finding {
    pub fn new(
        key: InsightKey,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            key,
            severity,
            subject: "self".to_string(),
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Attach a stable id and (in agency scope) the creator it concerns
    pub fn into_display(self, creator_name: Option<&str>) -> InsightDisplay {
        let fp = fingerprint(&[
            self.key.as_str(),
            creator_name.unwrap_or(""),
            &self.subject,
        ]);

        InsightDisplay {
            id: format!("{}:{}", self.key.as_str(), &fp[..16]),
            severity: self.severity,
            title: self.title,
            message: self.message,
            icon: self.key.icon().to_string(),
            creator_name: creator_name.map(str::to_string),
            insight_key: self.key,
        }
    }
}

/// An insight ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightDisplay {
    /// Stable across recomputation for the same key, creator, and subject
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    pub insight_key: InsightKey,
}

/// Compute a dedup fingerprint from key components
pub fn fingerprint(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(b"|");
    }
    hex::encode(hasher.finalize())
}
