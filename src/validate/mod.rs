mod config;
mod snapshot;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::{check_config, check_run_config};
pub use snapshot::check_snapshot;

/// Why a single instrument could not be derived. Never fatal to a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("`{symbol}` has 52-week high {high} not above 52-week low {low}")]
    InvalidRange { symbol: String, high: f64, low: f64 },

    #[error("`{symbol}` is malformed: {reason}")]
    InvalidSnapshot { symbol: String, reason: String },

    #[error("`{symbol}` appears more than once in this run")]
    DuplicateSymbol { symbol: String },
}

impl SnapshotError {
    pub fn kind(&self) -> SkipKind {
        match self {
            SnapshotError::InvalidRange { .. } => SkipKind::InvalidRange,
            SnapshotError::InvalidSnapshot { .. } => SkipKind::InvalidSnapshot,
            SnapshotError::DuplicateSymbol { .. } => SkipKind::DuplicateSymbol,
        }
    }
}

/// Serializable tag for [`SnapshotError`], carried on skipped instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    InvalidRange,
    InvalidSnapshot,
    DuplicateSymbol,
}

/// Run-level configuration problems. Any of these stops the run before a
/// single instrument is derived.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("margin_percent {value} outside valid range 0.0..=100.0")]
    MarginOutOfRange { value: f64 },

    #[error("lot_multiplier must be at least 1")]
    ZeroLotMultiplier,

    #[error("days_to_expiry must be at least 1")]
    ZeroDaysToExpiry,

    #[error("strike_interval {value} must be a positive number")]
    InvalidStrikeInterval { value: f64 },

    #[error("time_value_factor {value} must be a non-negative number")]
    InvalidTimeValueFactor { value: f64 },
}

/// Join a list of config errors into one numbered message.
pub fn describe(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("  {}. {}", i + 1, e))
        .collect::<Vec<_>>()
        .join("\n")
}
