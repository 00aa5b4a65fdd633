use super::{SnapshotError, check_config, describe};
use crate::model::{AnalysisConfig, InstrumentSnapshot};

/// Check one snapshot (and the config it will be derived under).
///
/// Returns the first problem found. Field checks run before the range check,
/// so a snapshot with a NaN bound reports `InvalidSnapshot`, not `InvalidRange`.
pub fn check_snapshot(
    snapshot: &InstrumentSnapshot,
    config: &AnalysisConfig,
) -> Result<(), SnapshotError> {
    let invalid = |reason: String| SnapshotError::InvalidSnapshot {
        symbol: snapshot.symbol.clone(),
        reason,
    };

    if snapshot.symbol.trim().is_empty() {
        return Err(invalid("empty symbol".to_string()));
    }
    if !is_positive(snapshot.spot_price) {
        return Err(invalid(format!(
            "spot price {} must be positive",
            snapshot.spot_price
        )));
    }
    if !is_positive(snapshot.high_52w) || !is_positive(snapshot.low_52w) {
        return Err(invalid(format!(
            "52-week bounds ({}, {}) must be positive",
            snapshot.low_52w, snapshot.high_52w
        )));
    }
    if snapshot.lot_size == 0 {
        return Err(invalid("lot size must be at least 1".to_string()));
    }
    if let Err(errors) = check_config(config) {
        return Err(invalid(format!("invalid config:\n{}", describe(&errors))));
    }
    if snapshot.high_52w <= snapshot.low_52w {
        return Err(SnapshotError::InvalidRange {
            symbol: snapshot.symbol.clone(),
            high: snapshot.high_52w,
            low: snapshot.low_52w,
        });
    }

    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(spot: f64, high: f64, low: f64, lot: u32) -> InstrumentSnapshot {
        InstrumentSnapshot::new("TEST", spot, high, low, lot)
    }

    #[test]
    fn test_accepts_spot_outside_band() {
        let config = AnalysisConfig::default();
        assert!(check_snapshot(&snap(1500.0, 1200.0, 800.0, 10), &config).is_ok());
        assert!(check_snapshot(&snap(500.0, 1200.0, 800.0, 10), &config).is_ok());
    }

    #[test]
    fn test_flat_range_is_invalid_range() {
        let err = check_snapshot(&snap(1000.0, 900.0, 900.0, 10), &AnalysisConfig::default())
            .unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidRange { .. }));
    }

    #[test]
    fn test_bad_fields_are_invalid_snapshot() {
        let config = AnalysisConfig::default();
        for bad in [
            snap(0.0, 1200.0, 800.0, 10),
            snap(-5.0, 1200.0, 800.0, 10),
            snap(f64::NAN, 1200.0, 800.0, 10),
            snap(1000.0, 1200.0, 0.0, 10),
            snap(1000.0, 1200.0, 800.0, 0),
        ] {
            let err = check_snapshot(&bad, &config).unwrap_err();
            assert!(
                matches!(err, SnapshotError::InvalidSnapshot { .. }),
                "expected InvalidSnapshot for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_bad_margin_rejects_instrument() {
        let config = AnalysisConfig {
            margin_percent: -1.0,
            ..Default::default()
        };
        let err = check_snapshot(&snap(1000.0, 1200.0, 800.0, 10), &config).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidSnapshot { .. }));
        assert!(err.to_string().contains("margin_percent"));
    }
}
