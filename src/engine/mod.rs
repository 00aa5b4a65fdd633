//! Per-instrument derivation: strike → premium → margin → IRR → percentile.
//!
//! Every function here is pure. [`derive`] handles one snapshot,
//! [`derive_all`] maps a whole provider listing and turns per-instrument
//! failures into skip records instead of aborting.

pub mod band;
pub mod premium;
pub mod returns;
pub mod strike;
pub mod summary;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::model::{Analysis, AnalysisConfig, AnalysisRow, InstrumentSnapshot, SkippedInstrument};
use crate::validate::{self, ConfigError, SnapshotError};

pub use summary::Summary;

/// Which leg of the short strangle is being priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSide {
    /// CE
    Call,
    /// PE
    Put,
}

impl OptionSide {
    /// Signed intrinsic value at `strike`; positive means in the money.
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionSide::Call => spot - strike,
            OptionSide::Put => strike - spot,
        }
    }

    pub fn is_itm(self, spot: f64, strike: f64) -> bool {
        self.intrinsic(spot, strike) > 0.0
    }

    pub fn label(self) -> &'static str {
        match self {
            OptionSide::Call => "CE",
            OptionSide::Put => "PE",
        }
    }
}

struct Leg {
    strike: f64,
    premium: f64,
    margin_required: f64,
    irr: f64,
    degenerate: bool,
}

/// Derive the analysis row for one snapshot.
pub fn derive(
    snapshot: &InstrumentSnapshot,
    config: &AnalysisConfig,
) -> Result<AnalysisRow, SnapshotError> {
    validate::check_snapshot(snapshot, config)?;

    let effective_lot_size = u64::from(snapshot.lot_size) * u64::from(config.lot_multiplier);
    let percentile = band::percentile(snapshot.spot_price, snapshot.high_52w, snapshot.low_52w);
    let ce = price_leg(OptionSide::Call, snapshot, effective_lot_size, config);
    let pe = price_leg(OptionSide::Put, snapshot, effective_lot_size, config);

    debug!(
        symbol = %snapshot.symbol,
        percentile,
        ce_strike = ce.strike,
        pe_strike = pe.strike,
        ce_irr = ce.irr,
        pe_irr = pe.irr,
        "derived row"
    );

    Ok(AnalysisRow {
        symbol: snapshot.symbol.clone(),
        spot_price: snapshot.spot_price,
        high_52w: snapshot.high_52w,
        low_52w: snapshot.low_52w,
        percentile,
        effective_lot_size,
        ce_strike: ce.strike,
        ce_premium: ce.premium,
        ce_margin_required: ce.margin_required,
        ce_irr: ce.irr,
        pe_strike: pe.strike,
        pe_premium: pe.premium,
        pe_margin_required: pe.margin_required,
        pe_irr: pe.irr,
        margin_percent_used: config.margin_percent,
        ce_margin_degenerate: ce.degenerate,
        pe_margin_degenerate: pe.degenerate,
    })
}

fn price_leg(
    side: OptionSide,
    snapshot: &InstrumentSnapshot,
    effective_lot_size: u64,
    config: &AnalysisConfig,
) -> Leg {
    let spot = snapshot.spot_price;
    let strike = strike::select(side, spot, config);
    let premium = premium::estimate(side, spot, strike, config);
    let margin_required = returns::margin_required(strike, effective_lot_size, config);

    let (irr, degenerate) =
        match returns::annualized_irr(premium, effective_lot_size, margin_required, config) {
            Some(irr) => (irr, false),
            None => {
                warn!(
                    symbol = %snapshot.symbol,
                    leg = side.label(),
                    strike,
                    "degenerate margin: zero margin required, IRR forced to 0"
                );
                (0.0, true)
            }
        };

    Leg {
        strike,
        premium,
        margin_required,
        irr,
        degenerate,
    }
}

/// Derive every snapshot, preserving input order.
///
/// Grid, expiry, lot multiplier and time value settings are checked once up
/// front and fail the whole run. After that nothing can abort the batch: a
/// malformed or repeated instrument, or one derived under an out-of-range
/// margin, becomes a [`SkippedInstrument`].
pub fn derive_all(
    snapshots: &[InstrumentSnapshot],
    config: &AnalysisConfig,
) -> Result<Analysis, Vec<ConfigError>> {
    config.validate_run()?;

    let repeated = repeated_symbols(snapshots);
    let results = map_ordered(snapshots, |idx, snapshot| {
        if repeated[idx] {
            Err(SnapshotError::DuplicateSymbol {
                symbol: snapshot.symbol.clone(),
            })
        } else {
            derive(snapshot, config)
        }
    });

    let mut analysis = Analysis::default();
    for (snapshot, result) in snapshots.iter().zip(results) {
        match result {
            Ok(row) => analysis.rows.push(row),
            Err(err) => {
                warn!(symbol = %snapshot.symbol, reason = %err, "skipping instrument");
                analysis
                    .skipped
                    .push(SkippedInstrument::from_error(&snapshot.symbol, &err));
            }
        }
    }

    Ok(analysis)
}

/// `true` at every index whose symbol already appeared earlier.
fn repeated_symbols(snapshots: &[InstrumentSnapshot]) -> Vec<bool> {
    let mut seen = HashSet::new();
    snapshots
        .iter()
        .map(|s| !seen.insert(s.symbol.as_str()))
        .collect()
}

#[cfg(feature = "full")]
fn map_ordered<T, F>(snapshots: &[InstrumentSnapshot], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &InstrumentSnapshot) -> T + Sync + Send,
{
    use rayon::prelude::*;

    // Indexed collect keeps input order.
    snapshots
        .par_iter()
        .enumerate()
        .map(|(idx, snapshot)| f(idx, snapshot))
        .collect()
}

#[cfg(not(feature = "full"))]
fn map_ordered<T, F>(snapshots: &[InstrumentSnapshot], f: F) -> Vec<T>
where
    F: Fn(usize, &InstrumentSnapshot) -> T,
{
    snapshots
        .iter()
        .enumerate()
        .map(|(idx, snapshot)| f(idx, snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn snap(symbol: &str, spot: f64, high: f64, low: f64, lot: u32) -> InstrumentSnapshot {
        InstrumentSnapshot::new(symbol, spot, high, low, lot)
    }

    #[test]
    fn test_reference_row() {
        let row = derive(&snap("REF", 1000.0, 1200.0, 800.0, 10), &AnalysisConfig::default())
            .unwrap();

        assert_relative_eq!(row.percentile, 50.0);
        assert_eq!(row.ce_strike, 850.0);
        assert_eq!(row.pe_strike, 1150.0);
        assert_eq!(row.effective_lot_size, 10);

        // time value = 1000 * 0.15 * 30/365 * 1.0
        let tv = 1000.0 * 0.15 * 30.0 / 365.0;
        assert_relative_eq!(row.ce_premium, 150.0 + tv, epsilon = 1e-9);
        assert_relative_eq!(row.pe_premium, 150.0 + tv, epsilon = 1e-9);

        assert_relative_eq!(row.ce_margin_required, 850.0 * 0.15 * 10.0, epsilon = 1e-9);
        assert_relative_eq!(row.pe_margin_required, 1150.0 * 0.15 * 10.0, epsilon = 1e-9);

        let ce_irr = (150.0 + tv) * 10.0 / (850.0 * 0.15 * 10.0) * (365.0 / 30.0) * 100.0;
        assert_relative_eq!(row.ce_irr, ce_irr, epsilon = 1e-9);
        assert!(!row.is_degenerate());
        assert_eq!(row.margin_percent_used, 15.0);
    }

    #[test]
    fn test_lot_multiplier_scales_lot_and_margin() {
        let config = AnalysisConfig {
            lot_multiplier: 3,
            ..Default::default()
        };
        let single = derive(&snap("X", 1000.0, 1200.0, 800.0, 25), &AnalysisConfig::default())
            .unwrap();
        let tripled = derive(&snap("X", 1000.0, 1200.0, 800.0, 25), &config).unwrap();

        assert_eq!(tripled.effective_lot_size, 75);
        assert_relative_eq!(
            tripled.ce_margin_required,
            single.ce_margin_required * 3.0,
            epsilon = 1e-9
        );
        // Lot size cancels out of the return on margin.
        assert_relative_eq!(tripled.ce_irr, single.ce_irr, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_margin_forces_zero_irr() {
        let config = AnalysisConfig {
            margin_percent: 0.0,
            ..Default::default()
        };
        let row = derive(&snap("FLAT", 1000.0, 1200.0, 800.0, 10), &config).unwrap();

        assert_eq!(row.ce_margin_required, 0.0);
        assert_eq!(row.ce_irr, 0.0);
        assert_eq!(row.pe_irr, 0.0);
        assert!(row.ce_margin_degenerate);
        assert!(row.pe_margin_degenerate);
    }

    #[test]
    fn test_spot_below_grid_gives_zero_call_strike() {
        // Spot smaller than one grid step: no positive strike below spot exists.
        let row = derive(&snap("PENNY", 30.0, 40.0, 20.0, 100), &AnalysisConfig::default())
            .unwrap();

        assert_eq!(row.ce_strike, 0.0);
        assert!(row.ce_margin_degenerate);
        assert_eq!(row.ce_irr, 0.0);
        assert_eq!(row.pe_strike, 50.0);
        assert!(!row.pe_margin_degenerate);
    }

    #[test]
    fn test_batch_skips_flat_range() {
        let snapshots = vec![
            snap("A", 1000.0, 1200.0, 800.0, 10),
            snap("B", 2000.0, 2400.0, 1600.0, 10),
            snap("C", 500.0, 600.0, 400.0, 10),
            snap("FLAT", 700.0, 700.0, 700.0, 10),
            snap("D", 3000.0, 3500.0, 2500.0, 10),
            snap("E", 150.0, 200.0, 100.0, 10),
        ];
        let analysis = derive_all(&snapshots, &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.rows.len(), 5);
        assert_eq!(analysis.skipped.len(), 1);
        assert_eq!(analysis.skipped[0].symbol, "FLAT");
        assert_eq!(analysis.skipped[0].kind, validate::SkipKind::InvalidRange);

        let symbols: Vec<&str> = analysis.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_batch_skips_repeated_symbol() {
        let snapshots = vec![
            snap("A", 1000.0, 1200.0, 800.0, 10),
            snap("A", 1010.0, 1200.0, 800.0, 10),
        ];
        let analysis = derive_all(&snapshots, &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.rows.len(), 1);
        assert_eq!(analysis.rows[0].spot_price, 1000.0);
        assert_eq!(analysis.skipped[0].kind, validate::SkipKind::DuplicateSymbol);
    }

    #[test]
    fn test_batch_rejects_bad_config() {
        let config = AnalysisConfig {
            days_to_expiry: 0,
            ..Default::default()
        };
        let errors = derive_all(&[snap("A", 1000.0, 1200.0, 800.0, 10)], &config).unwrap_err();
        assert_eq!(errors, vec![ConfigError::ZeroDaysToExpiry]);
    }

    #[test]
    fn test_bad_margin_skips_instead_of_failing() {
        let config = AnalysisConfig {
            margin_percent: -5.0,
            ..Default::default()
        };
        let snapshots = vec![
            snap("A", 1000.0, 1200.0, 800.0, 10),
            snap("B", 2000.0, 2400.0, 1600.0, 10),
        ];
        let analysis = derive_all(&snapshots, &config).unwrap();

        assert!(analysis.rows.is_empty());
        assert_eq!(analysis.skipped.len(), 2);
        assert_eq!(analysis.skipped[0].kind, validate::SkipKind::InvalidSnapshot);
        assert!(analysis.skipped[0].reason.contains("margin_percent"));
    }

    #[test]
    fn test_side_moneyness() {
        assert!(OptionSide::Call.is_itm(100.0, 90.0));
        assert!(!OptionSide::Call.is_itm(100.0, 100.0));
        assert!(OptionSide::Put.is_itm(100.0, 110.0));
        assert!(!OptionSide::Put.is_itm(100.0, 95.0));
    }
}
