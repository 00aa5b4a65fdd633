use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validate::{SkipKind, SnapshotError};

/// Fully derived analysis for one instrument.
///
/// Built only by [`crate::engine::derive`]; a row is a pure function of one
/// snapshot and the run's config and never changes after it is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisRow {
    pub symbol: String,
    pub spot_price: f64,
    pub high_52w: f64,
    pub low_52w: f64,
    /// Position of spot inside the 52-week band, 0 - 100.
    pub percentile: f64,
    /// `lot_size * lot_multiplier`.
    pub effective_lot_size: u64,
    pub ce_strike: f64,
    pub ce_premium: f64,
    pub ce_margin_required: f64,
    /// Annualized return on margin for writing the call, in percent.
    pub ce_irr: f64,
    pub pe_strike: f64,
    pub pe_premium: f64,
    pub pe_margin_required: f64,
    /// Annualized return on margin for writing the put, in percent.
    pub pe_irr: f64,
    pub margin_percent_used: f64,
    /// Call leg had zero margin required; `ce_irr` was forced to 0.
    pub ce_margin_degenerate: bool,
    /// Put leg had zero margin required; `pe_irr` was forced to 0.
    pub pe_margin_degenerate: bool,
}

impl AnalysisRow {
    pub fn is_degenerate(&self) -> bool {
        self.ce_margin_degenerate || self.pe_margin_degenerate
    }

    /// Call premium as a percentage of its strike (0 when the strike is 0).
    pub fn ce_premium_ratio(&self) -> f64 {
        ratio_pct(self.ce_premium, self.ce_strike)
    }

    /// Put premium as a percentage of its strike (0 when the strike is 0).
    pub fn pe_premium_ratio(&self) -> f64 {
        ratio_pct(self.pe_premium, self.pe_strike)
    }
}

fn ratio_pct(premium: f64, strike: f64) -> f64 {
    if strike > 0.0 {
        premium / strike * 100.0
    } else {
        0.0
    }
}

/// An instrument the engine refused to derive, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedInstrument {
    pub symbol: String,
    pub kind: SkipKind,
    pub reason: String,
}

impl SkippedInstrument {
    pub fn from_error(symbol: &str, error: &SnapshotError) -> Self {
        Self {
            symbol: symbol.to_string(),
            kind: error.kind(),
            reason: error.to_string(),
        }
    }
}

/// Output of one batch run: rows in input order plus every skip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub rows: Vec<AnalysisRow>,
    pub skipped: Vec<SkippedInstrument>,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of instruments offered to the engine.
    pub fn instruments(&self) -> usize {
        self.rows.len() + self.skipped.len()
    }
}
