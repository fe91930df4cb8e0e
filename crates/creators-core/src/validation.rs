//! Snapshot payload validation
//!
//! Untyped JSON from the CLI or HTTP boundary is checked here before it
//! reaches the engine. The result is a tagged value rather than an error so
//! callers can report every problem at once.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{AgencyInput, CalendarEvent, Company, InsightInput, Task};

/// A single problem with a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path to the offending value (e.g. `tasks[2].id`)
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating a payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Validation<T> {
    Valid { value: T },
    Invalid { errors: Vec<FieldError> },
}

impl<T> Validation<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid { .. })
    }

    pub fn into_result(self) -> Result<T, Vec<FieldError>> {
        match self {
            Validation::Valid { value } => Ok(value),
            Validation::Invalid { errors } => Err(errors),
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            Validation::Valid { .. } => &[],
            Validation::Invalid { errors } => errors,
        }
    }

    fn from_errors(value: T, errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Validation::Valid { value }
        } else {
            Validation::Invalid { errors }
        }
    }
}

/// Validate a single-scope snapshot
pub fn validate_input(payload: &serde_json::Value) -> Validation<InsightInput> {
    let input: InsightInput = match parse(payload) {
        Ok(input) => input,
        Err(errors) => return Validation::Invalid { errors },
    };

    let mut errors = vec![];
    check_snapshot("", &input.tasks, &input.events, &input.companies, &mut errors);
    Validation::from_errors(input, errors)
}

/// Validate an agency payload (one snapshot per managed creator)
pub fn validate_agency_input(payload: &serde_json::Value) -> Validation<AgencyInput> {
    let input: AgencyInput = match parse(payload) {
        Ok(input) => input,
        Err(errors) => return Validation::Invalid { errors },
    };

    let mut errors = vec![];
    for (i, creator) in input.creators.iter().enumerate() {
        let prefix = format!("creators[{}].", i);
        if creator.name.trim().is_empty() {
            errors.push(FieldError::new(
                format!("{}name", prefix),
                "creator name must not be empty",
            ));
        }
        check_snapshot(
            &prefix,
            &creator.tasks,
            &creator.events,
            &creator.companies,
            &mut errors,
        );
    }
    Validation::from_errors(input, errors)
}

fn parse<T: DeserializeOwned>(payload: &serde_json::Value) -> Result<T, Vec<FieldError>> {
    if !payload.is_object() {
        return Err(vec![FieldError::new("$", "payload must be a JSON object")]);
    }
    serde_json::from_value(payload.clone()).map_err(|e| vec![FieldError::new("$", e.to_string())])
}

fn check_snapshot(
    prefix: &str,
    tasks: &[Task],
    events: &[CalendarEvent],
    companies: &[Company],
    errors: &mut Vec<FieldError>,
) {
    check_ids(prefix, "tasks", tasks.iter().map(|t| t.id.as_str()), errors);
    check_ids(prefix, "events", events.iter().map(|e| e.id.as_str()), errors);
    check_ids(
        prefix,
        "companies",
        companies.iter().map(|c| c.id.as_str()),
        errors,
    );

    for (i, event) in events.iter().enumerate() {
        if event.end < event.start {
            errors.push(FieldError::new(
                format!("{}events[{}].end", prefix, i),
                "event ends before it starts",
            ));
        }
    }
}

fn check_ids<'a>(
    prefix: &str,
    collection: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<FieldError>,
) {
    let mut seen = HashSet::new();
    for (i, id) in ids.enumerate() {
        let field = format!("{}{}[{}].id", prefix, collection, i);
        if id.trim().is_empty() {
            errors.push(FieldError::new(field, "id must not be empty"));
        } else if !seen.insert(id) {
            errors.push(FieldError::new(field, format!("duplicate id '{}'", id)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_snapshot() {
        let payload = json!({
            "tasks": [{"id": "t1", "title": "Edit", "dueDate": "2026-03-10", "status": "todo"}],
            "events": [{"id": "e1", "start": "2026-03-10T09:00:00Z", "end": "2026-03-10T10:00:00Z"}],
            "companies": [{"id": "c1", "name": "Acme"}]
        });

        let result = validate_input(&payload);
        assert!(result.is_valid());
        let input = result.into_result().unwrap();
        assert_eq!(input.tasks.len(), 1);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let result = validate_input(&json!({}));
        assert!(result.is_valid());
    }

    #[test]
    fn test_structural_error() {
        let result = validate_input(&json!({"tasks": "not a list"}));
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].field, "$");

        let result = validate_input(&json!([1, 2, 3]));
        assert_eq!(result.errors()[0].message, "payload must be a JSON object");
    }

    #[test]
    fn test_duplicate_and_empty_ids() {
        let payload = json!({
            "tasks": [{"id": "t1"}, {"id": "t1"}, {"id": " "}],
        });

        let errors = validate_input(&payload).into_result().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "tasks[1].id");
        assert_eq!(errors[0].message, "duplicate id 't1'");
        assert_eq!(errors[1].field, "tasks[2].id");
    }

    #[test]
    fn test_event_end_before_start() {
        let payload = json!({
            "events": [{"id": "e1", "start": "2026-03-10T10:00:00Z", "end": "2026-03-10T09:00:00Z"}],
        });

        let errors = validate_input(&payload).into_result().unwrap_err();
        assert_eq!(errors[0].field, "events[0].end");
    }

    #[test]
    fn test_unknown_company_reference_is_allowed() {
        let payload = json!({"tasks": [{"id": "t1", "companyId": "ghost"}]});
        assert!(validate_input(&payload).is_valid());
    }

    #[test]
    fn test_agency_creator_name_required() {
        let payload = json!({
            "creators": [
                {"name": "Noa", "tasks": [{"id": "t1"}]},
                {"name": "", "events": [{"id": "e1", "start": "2026-03-10T10:00:00Z", "end": "2026-03-10T09:00:00Z"}]}
            ]
        });

        let errors = validate_agency_input(&payload).into_result().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["creators[1].name", "creators[1].events[0].end"]);
    }

    #[test]
    fn test_tagged_serialization() {
        let invalid: Validation<InsightInput> = Validation::Invalid {
            errors: vec![FieldError::new("tasks[0].id", "id must not be empty")],
        };
        let json = serde_json::to_value(&invalid).unwrap();
        assert_eq!(json["status"], "invalid");
        assert_eq!(json["errors"][0]["field"], "tasks[0].id");

        let valid = validate_input(&json!({}));
        let json = serde_json::to_value(&valid).unwrap();
        assert_eq!(json["status"], "valid");
        assert!(json["value"]["tasks"].as_array().unwrap().is_empty());
    }
}
