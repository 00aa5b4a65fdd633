use serde::{Deserialize, Serialize};

use crate::model::{Analysis, AnalysisRow};

/// Percentile at or above which an instrument counts as trading in the
/// upper half of its 52-week band.
pub const MEDIAN_BAND: f64 = 50.0;

/// Aggregate statistics over one run's rows.
///
/// Built from sums, means and counts only, so it does not depend on row
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub instruments: usize,
    pub rows: usize,
    pub skipped: usize,
    pub mean_ce_irr: f64,
    pub mean_pe_irr: f64,
    pub mean_ce_premium: f64,
    pub mean_pe_premium: f64,
    /// Rows with percentile >= 50.
    pub at_or_above_median_band: usize,
    /// Rows with percentile < 50.
    pub below_median_band: usize,
    /// Legs whose IRR was forced to 0 by a zero margin.
    pub degenerate_legs: usize,
}

impl Summary {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let mut summary = Self::from_rows(&analysis.rows);
        summary.skipped = analysis.skipped.len();
        summary.instruments = analysis.instruments();
        summary
    }

    pub fn from_rows(rows: &[AnalysisRow]) -> Self {
        let above = rows.iter().filter(|r| r.percentile >= MEDIAN_BAND).count();
        let degenerate_legs = rows
            .iter()
            .map(|r| usize::from(r.ce_margin_degenerate) + usize::from(r.pe_margin_degenerate))
            .sum();

        Summary {
            instruments: rows.len(),
            rows: rows.len(),
            skipped: 0,
            mean_ce_irr: mean(rows.iter().map(|r| r.ce_irr)),
            mean_pe_irr: mean(rows.iter().map(|r| r.pe_irr)),
            mean_ce_premium: mean(rows.iter().map(|r| r.ce_premium)),
            mean_pe_premium: mean(rows.iter().map(|r| r.pe_premium)),
            at_or_above_median_band: above,
            below_median_band: rows.len() - above,
            degenerate_legs,
        }
    }
}

/// Arithmetic mean, 0 for no values.
///
/// Values are summed in sorted order so any permutation of the input gives a
/// bit-identical result.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    values.iter().sum::<f64>() / values.len() as f64
}
