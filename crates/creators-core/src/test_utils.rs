//! Test utilities for building snapshots
//!
//! Only compiled for tests and with the `test-utils` feature.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{
    CalendarEvent, Company, CreatorSnapshot, EventCategory, InsightInput, Scope, Task, TaskStatus,
};

/// Thursday 2026-03-12 12:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 12, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A bare task with the given status and due date
pub fn task(id: &str, status: TaskStatus, due_date: Option<DateTime<Utc>>) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {}", id),
        due_date,
        status,
        archived: false,
        company_id: None,
        created_at: None,
        completed_at: None,
    }
}

/// A one-hour event starting at `start`
pub fn event(id: &str, start: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        start,
        end: start + Duration::hours(1),
        created_at: None,
        category: EventCategory::Meeting,
        company_id: None,
    }
}

/// Fluent builder for snapshots relative to a fixed "now"
pub struct SnapshotBuilder {
    now: DateTime<Utc>,
    input: InsightInput,
    next_id: usize,
}

impl SnapshotBuilder {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            input: InsightInput::default(),
            next_id: 0,
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.input.scope = scope;
        self
    }

    pub fn company(mut self, id: &str, name: &str) -> Self {
        self.input.companies.push(Company {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn task(mut self, task: Task) -> Self {
        self.input.tasks.push(task);
        self
    }

    pub fn event(mut self, event: CalendarEvent) -> Self {
        self.input.events.push(event);
        self
    }

    /// Active tasks due 1..=n days before now
    pub fn overdue_tasks(mut self, n: usize, company: Option<&str>) -> Self {
        for i in 0..n {
            let id = self.next_id("t");
            let mut t = task(&id, TaskStatus::Todo, Some(self.now - Duration::days(i as i64 + 1)));
            t.company_id = company.map(str::to_string);
            self.input.tasks.push(t);
        }
        self
    }

    /// Active tasks due `days_ago` days before now
    pub fn overdue_tasks_since(mut self, n: usize, days_ago: i64) -> Self {
        for _ in 0..n {
            let id = self.next_id("t");
            let t = task(&id, TaskStatus::InProgress, Some(self.now - Duration::days(days_ago)));
            self.input.tasks.push(t);
        }
        self
    }

    /// Done tasks completed `days_ago` days before now
    pub fn done_tasks(mut self, n: usize, days_ago: i64, company: Option<&str>) -> Self {
        for _ in 0..n {
            let id = self.next_id("t");
            let at = self.now - Duration::days(days_ago);
            let mut t = task(&id, TaskStatus::Done, Some(at));
            t.completed_at = Some(at);
            t.company_id = company.map(str::to_string);
            self.input.tasks.push(t);
        }
        self
    }

    /// Active tasks with neither a due date nor a creation time
    pub fn undated_tasks(mut self, n: usize, company: Option<&str>) -> Self {
        for _ in 0..n {
            let id = self.next_id("t");
            let mut t = task(&id, TaskStatus::Todo, None);
            t.company_id = company.map(str::to_string);
            self.input.tasks.push(t);
        }
        self
    }

    /// `count` events on the day `days_ago` days before now, at or just before
    /// that day's clock time
    pub fn events_on(mut self, days_ago: i64, count: usize, company: Option<&str>) -> Self {
        for i in 0..count {
            let id = self.next_id("e");
            let start = self.now - Duration::days(days_ago) - Duration::minutes(i as i64);
            let mut e = event(&id, start);
            e.company_id = company.map(str::to_string);
            self.input.events.push(e);
        }
        self
    }

    /// `count` events on each of `days` consecutive days ending `end_days_ago` before now
    pub fn heavy_days(mut self, days: i64, end_days_ago: i64, count: usize) -> Self {
        for offset in 0..days {
            self = self.events_on(end_days_ago + offset, count, None);
        }
        self
    }

    pub fn build(self) -> InsightInput {
        self.input
    }

    pub fn build_creator(self, name: &str) -> CreatorSnapshot {
        CreatorSnapshot {
            name: name.to_string(),
            tasks: self.input.tasks,
            events: self.input.events,
            companies: self.input.companies,
        }
    }
}
