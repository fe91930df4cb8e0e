//! Request-scoped evaluation context
//!
//! Everything the engine would otherwise read from ambient state (the clock,
//! the display language, the user's UTC offset) is passed in explicitly. A
//! context lives for one computation or one request.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Display language for insight titles and messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    He,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::He => "he",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "he" | "he-IL" => Ok(Locale::He),
            "en" | "en-US" => Ok(Locale::En),
            _ => Err(format!("Unknown locale: {}", s)),
        }
    }
}

/// Explicit inputs for one computation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Reference instant for every "before now" / "this week" decision
    pub now: DateTime<Utc>,
    pub locale: Locale,
    /// Offset used to bucket timestamps into calendar days
    pub utc_offset: FixedOffset,
}

impl RequestContext {
    /// Context at the current system time, Hebrew locale, UTC days
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Context frozen at `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            locale: Locale::default(),
            utc_offset: utc(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Local calendar day of a timestamp
    pub fn local_date(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.utc_offset).date_naive()
    }

    /// Local calendar day of "now"
    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now)
    }

    /// Start of a local day as a UTC instant
    pub fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        let midnight = day.and_time(NaiveTime::MIN);
        // Fixed offsets have exactly one mapping for every local time.
        self.utc_offset
            .from_local_datetime(&midnight)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| midnight.and_utc())
    }

    /// Current week as `[monday 00:00, next monday 00:00)` in UTC instants
    pub fn current_week(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let today = self.today();
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let start = self.start_of_day(monday);
        (start, start + Duration::days(7))
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::now()
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}
