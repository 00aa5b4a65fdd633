use std::path::Path;

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validate::{self, ConfigError};

/// Parameters shared by every derivation in a run.
///
/// All fields carry defaults so a partial JSON config file only needs to
/// name the knobs it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Safety margin in percent (0.0 - 100.0). Offsets both strikes from
    /// spot and sets the margin-required base.
    pub margin_percent: f64,
    /// Scales each instrument's lot size.
    pub lot_multiplier: u32,
    /// Days until expiry, used for time value and IRR annualization.
    pub days_to_expiry: u32,
    /// Spacing of the strike grid.
    pub strike_interval: f64,
    /// Time-decay factor `k` in the time value heuristic
    /// `spot * margin% * days/365 * k`.
    pub time_value_factor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            margin_percent: 15.0,
            lot_multiplier: 1,
            days_to_expiry: 30,
            strike_interval: 50.0,
            time_value_factor: 1.0,
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        let config: AnalysisConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config at {}", path.display()))?;
        Ok(config)
    }

    /// Check every field, collecting all problems.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        validate::check_config(self)
    }

    /// Check only what must hold before any snapshot is derived. A bad
    /// margin is reported per instrument instead.
    pub fn validate_run(&self) -> Result<(), Vec<ConfigError>> {
        validate::check_run_config(self)
    }

    /// Margin as a fraction (15% -> 0.15).
    pub fn margin_fraction(&self) -> f64 {
        self.margin_percent / 100.0
    }

    /// Fraction of a year covered by one expiry cycle.
    pub fn year_fraction(&self) -> f64 {
        self.days_to_expiry as f64 / 365.0
    }
}
