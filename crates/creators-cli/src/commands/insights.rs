//! Insight computation commands (creator snapshot, agency)

use std::path::Path;

use anyhow::{anyhow, bail, Result};
use creators_core::{
    filter_dismissed, validate_agency_input, validate_input, FieldError, InsightDisplay,
    InsightEngine, RequestContext, Scope, Severity, Validation,
};

use super::{load_config, read_json};

/// Compute ranked insights for a snapshot file
pub fn compute_from_file(
    config_path: Option<&Path>,
    file: &Path,
    scope: Option<&str>,
    request: &RequestContext,
    dismissed: &[String],
) -> Result<Vec<InsightDisplay>> {
    let payload = read_json(file)?;
    let mut input = into_valid(validate_input(&payload))?;

    if let Some(scope) = scope {
        input.scope = scope.parse::<Scope>().map_err(|e| anyhow!(e))?;
    }

    let engine = InsightEngine::with_config(load_config(config_path)?);
    let insights = engine.compute_insights(&input, request);
    Ok(filter_dismissed(insights, dismissed))
}

/// Compute ranked insights for an agency file
pub fn compute_agency_from_file(
    config_path: Option<&Path>,
    file: &Path,
    request: &RequestContext,
    dismissed: &[String],
) -> Result<Vec<InsightDisplay>> {
    let payload = read_json(file)?;
    let input = into_valid(validate_agency_input(&payload))?;

    let engine = InsightEngine::with_config(load_config(config_path)?);
    let insights = engine.compute_agency_insights(&input, request);
    Ok(filter_dismissed(insights, dismissed))
}

pub fn cmd_insights(
    config_path: Option<&Path>,
    file: &Path,
    scope: Option<&str>,
    request: &RequestContext,
    dismissed: &[String],
    json: bool,
) -> Result<()> {
    let insights = compute_from_file(config_path, file, scope, request, dismissed)?;
    print_insights(&insights, json)
}

pub fn cmd_agency(
    config_path: Option<&Path>,
    file: &Path,
    request: &RequestContext,
    dismissed: &[String],
    json: bool,
) -> Result<()> {
    let insights = compute_agency_from_file(config_path, file, request, dismissed)?;
    print_insights(&insights, json)
}

fn into_valid<T>(validation: Validation<T>) -> Result<T> {
    validation.into_result().map_err(|errors| {
        print_field_errors(&errors);
        anyhow!("Snapshot failed validation ({} errors)", errors.len())
    })
}

pub(crate) fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("   ❌ {}: {}", error.field, error.message);
    }
}

fn print_insights(insights: &[InsightDisplay], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(insights)?);
        return Ok(());
    }

    if insights.is_empty() {
        println!("✨ No insights right now");
        return Ok(());
    }

    println!();
    println!("💡 Insights ({})", insights.len());
    println!("   ─────────────────────────────────────────────────────────────");
    for insight in insights {
        let marker = match insight.severity {
            Severity::Risk => "🔴",
            Severity::Warning => "🟡",
            Severity::Info => "🔵",
        };
        match &insight.creator_name {
            Some(creator) => println!(
                "   {} {} {} [{}]",
                marker, insight.icon, insight.title, creator
            ),
            None => println!("   {} {} {}", marker, insight.icon, insight.title),
        }
        println!("      {}", insight.message);
        println!("      id: {}", insight.id);
    }
    println!();

    if insights.iter().any(|i| i.severity == Severity::Risk) {
        tracing::info!("At least one insight needs immediate attention");
    }

    Ok(())
}

/// Fail unless the payload validates, reporting every error
pub(crate) fn ensure_valid<T>(validation: &Validation<T>) -> Result<()> {
    if validation.is_valid() {
        return Ok(());
    }
    print_field_errors(validation.errors());
    bail!("Snapshot failed validation ({} errors)", validation.errors().len())
}
