//! Snapshot validation command

use std::path::Path;

use anyhow::Result;
use creators_core::{validate_agency_input, validate_input};

use super::insights::ensure_valid;
use super::read_json;

pub fn cmd_validate(file: &Path, agency: bool) -> Result<()> {
    let payload = read_json(file)?;

    if agency {
        let validation = validate_agency_input(&payload);
        ensure_valid(&validation)?;
        if let Ok(input) = validation.into_result() {
            let tasks: usize = input.creators.iter().map(|c| c.tasks.len()).sum();
            let events: usize = input.creators.iter().map(|c| c.events.len()).sum();
            println!(
                "✅ Valid agency snapshot: {} creators, {} tasks, {} events",
                input.creators.len(),
                tasks,
                events
            );
        }
    } else {
        let validation = validate_input(&payload);
        ensure_valid(&validation)?;
        if let Ok(input) = validation.into_result() {
            println!(
                "✅ Valid {} snapshot: {} tasks, {} events, {} companies",
                input.scope,
                input.tasks.len(),
                input.events.len(),
                input.companies.len()
            );
        }
    }

    Ok(())
}
