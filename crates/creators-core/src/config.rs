//! Insight threshold configuration
//!
//! Every numeric cutoff the insight rules use lives here rather than in the
//! rules themselves, so product can recalibrate without a code change.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. Explicit path from the caller (e.g. `creators --config`), if it exists
//! 2. Override in data dir (~/.local/share/creators-os/config/insights.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverdueThresholds {
    /// Overdue count at which severity escalates to risk
    pub risk_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeavyDaysThresholds {
    /// A day is heavy when its event count exceeds this
    pub events_per_day: u32,
    pub min_streak: u32,
    pub risk_streak: u32,
    pub lookback_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationThresholds {
    pub max_share: f64,
    pub min_activities: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionThresholds {
    pub window_days: u32,
    pub min_rate: f64,
    pub min_sample: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueSoonThresholds {
    pub hours: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorRiskThresholds {
    pub min_overdue: u32,
    pub min_sample: u32,
    pub quiet_days: u32,
    pub min_signals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencyPerformanceThresholds {
    /// Absolute completion-rate gain between windows (0.10 = 10 points)
    pub min_improvement: f64,
}

/// All insight thresholds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightConfig {
    pub overdue: OverdueThresholds,
    pub heavy_days: HeavyDaysThresholds,
    pub concentration: ConcentrationThresholds,
    pub completion: CompletionThresholds,
    pub due_soon: DueSoonThresholds,
    pub creator_risk: CreatorRiskThresholds,
    pub agency_performance: AgencyPerformanceThresholds,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            overdue: OverdueThresholds { risk_count: 10 },
            heavy_days: HeavyDaysThresholds {
                events_per_day: 4,
                min_streak: 3,
                risk_streak: 5,
                lookback_days: 14,
            },
            concentration: ConcentrationThresholds {
                max_share: 0.60,
                min_activities: 5,
            },
            completion: CompletionThresholds {
                window_days: 30,
                min_rate: 0.50,
                min_sample: 5,
            },
            due_soon: DueSoonThresholds { hours: 48 },
            creator_risk: CreatorRiskThresholds {
                min_overdue: 1,
                min_sample: 1,
                quiet_days: 7,
                min_signals: 2,
            },
            agency_performance: AgencyPerformanceThresholds {
                min_improvement: 0.10,
            },
        }
    }
}

impl InsightConfig {
    /// Load configuration (explicit path, then data dir override, then defaults)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path.filter(|p| p.exists()) {
            Some(path) => read_config(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => read_config(&path)?,
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::parse(&content)
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Parse config from TOML content, filling gaps from defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(overdue) = raw.overdue {
            apply_count(&mut config.overdue.risk_count, overdue.risk_count);
        }

        if let Some(heavy) = raw.heavy_days {
            let t = &mut config.heavy_days;
            apply_count(&mut t.events_per_day, heavy.events_per_day);
            apply_count(&mut t.min_streak, heavy.min_streak);
            apply_count(&mut t.risk_streak, heavy.risk_streak);
            apply_count(&mut t.lookback_days, heavy.lookback_days);
        }

        if let Some(concentration) = raw.concentration {
            let t = &mut config.concentration;
            apply_ratio(&mut t.max_share, concentration.max_share);
            apply_count(&mut t.min_activities, concentration.min_activities);
        }

        if let Some(completion) = raw.completion {
            let t = &mut config.completion;
            apply_count(&mut t.window_days, completion.window_days);
            apply_ratio(&mut t.min_rate, completion.min_rate);
            apply_count(&mut t.min_sample, completion.min_sample);
        }

        if let Some(due_soon) = raw.due_soon {
            apply_count(&mut config.due_soon.hours, due_soon.hours);
        }

        if let Some(risk) = raw.creator_risk {
            let t = &mut config.creator_risk;
            apply_count(&mut t.min_overdue, risk.min_overdue);
            apply_count(&mut t.min_sample, risk.min_sample);
            apply_count(&mut t.quiet_days, risk.quiet_days);
            apply_count(&mut t.min_signals, risk.min_signals);
        }

        if let Some(performance) = raw.agency_performance {
            apply_ratio(
                &mut config.agency_performance.min_improvement,
                performance.min_improvement,
            );
        }

        Ok(config)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("creators-os").join("config").join("insights.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::InvalidConfig(format!("Failed to read config {}: {}", path.display(), e))
    })
}

/// Negative counts are treated as zero
fn apply_count(target: &mut u32, value: Option<i64>) {
    if let Some(v) = value {
        *target = v.clamp(0, u32::MAX as i64) as u32;
    }
}

fn apply_ratio(target: &mut f64, value: Option<f64>) {
    if let Some(v) = value.filter(|v| v.is_finite()) {
        *target = v.max(0.0);
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    overdue: Option<RawOverdue>,
    heavy_days: Option<RawHeavyDays>,
    concentration: Option<RawConcentration>,
    completion: Option<RawCompletion>,
    due_soon: Option<RawDueSoon>,
    creator_risk: Option<RawCreatorRisk>,
    agency_performance: Option<RawAgencyPerformance>,
}

#[derive(Debug, Deserialize)]
struct RawOverdue {
    risk_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawHeavyDays {
    events_per_day: Option<i64>,
    min_streak: Option<i64>,
    risk_streak: Option<i64>,
    lookback_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawConcentration {
    max_share: Option<f64>,
    min_activities: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawCompletion {
    window_days: Option<i64>,
    min_rate: Option<f64>,
    min_sample: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawDueSoon {
    hours: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawCreatorRisk {
    min_overdue: Option<i64>,
    min_sample: Option<i64>,
    quiet_days: Option<i64>,
    min_signals: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawAgencyPerformance {
    min_improvement: Option<f64>,
}
