//! Snapshot data model
//!
//! Read-only projections of the records the insight engine consumes. These are
//! loaded by callers from the hosted database and handed to the engine as an
//! in-memory snapshot; nothing here is persisted by the engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Task completion status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    #[serde(alias = "pending")]
    Todo,
    InProgress,
    Review,
    /// Terminal state
    #[serde(alias = "completed")]
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" | "pending" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "done" | "completed" => Ok(TaskStatus::Done),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// Calendar event category
///
/// Unknown categories coming from the calendar sync deserialize as `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    Meeting,
    Shoot,
    Publish,
    Deadline,
    Personal,
    #[default]
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "meeting",
            EventCategory::Shoot => "shoot",
            EventCategory::Publish => "publish",
            EventCategory::Deadline => "deadline",
            EventCategory::Personal => "personal",
            EventCategory::Other => "other",
        }
    }
}

impl From<String> for EventCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "meeting" => EventCategory::Meeting,
            "shoot" => EventCategory::Shoot,
            "publish" => EventCategory::Publish,
            "deadline" => EventCategory::Deadline,
            "personal" => EventCategory::Personal,
            _ => EventCategory::Other,
        }
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whose data an insight computation covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// A single creator's own data
    #[default]
    Creator,
    /// Aggregated across an agency's managed creators
    Agency,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Creator => "creator",
            Scope::Agency => "agency",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creator" => Ok(Scope::Creator),
            "agency" => Ok(Scope::Agency),
            _ => Err(format!("Unknown scope: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Accepts RFC 3339 or a plain `YYYY-MM-DD` (due by end of that day)
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Not archived and not in the terminal state
    pub fn is_active(&self) -> bool {
        !self.archived && self.status != TaskStatus::Done
    }

    pub fn is_done(&self) -> bool {
        !self.archived && self.status == TaskStatus::Done
    }

    /// Active and due strictly before `now`. Tasks without a due date never are.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.due_date.is_some_and(|due| due < now)
    }

    /// Timestamp that places the task in a reporting window
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        if self.archived {
            return None;
        }
        if self.status == TaskStatus::Done {
            self.completed_at.or(self.due_date).or(self.created_at)
        } else {
            self.due_date.or(self.created_at)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub company_id: Option<String>,
}

/// Minimal company projection (identity and display name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

/// Input for a single computation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightInput {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub scope: Scope,
}

/// One managed creator's snapshot inside an agency computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatorSnapshot {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub companies: Vec<Company>,
}

/// Input for an agency-wide computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgencyInput {
    #[serde(default)]
    pub creators: Vec<CreatorSnapshot>,
}

impl AgencyInput {
    /// Union of every creator's data as one agency-scope snapshot
    pub fn combined(&self) -> InsightInput {
        let mut combined = InsightInput {
            scope: Scope::Agency,
            ..Default::default()
        };
        for creator in &self.creators {
            combined.tasks.extend(creator.tasks.iter().cloned());
            combined.events.extend(creator.events.iter().cloned());
            combined.companies.extend(creator.companies.iter().cloned());
        }
        combined
    }
}

/// Parse a due date given either as RFC 3339 or as a plain calendar date
pub fn parse_due_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|dt| dt.and_utc())
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_due_date(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid due date: {}", s))),
    }
}
