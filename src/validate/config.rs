use super::ConfigError;
use crate::model::AnalysisConfig;

/// Validate a run config, collecting all errors.
pub fn check_config(config: &AnalysisConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !(0.0..=100.0).contains(&config.margin_percent) {
        // NaN fails `contains` as well.
        errors.push(ConfigError::MarginOutOfRange {
            value: config.margin_percent,
        });
    }
    if config.lot_multiplier == 0 {
        errors.push(ConfigError::ZeroLotMultiplier);
    }
    if config.days_to_expiry == 0 {
        errors.push(ConfigError::ZeroDaysToExpiry);
    }
    if !(config.strike_interval.is_finite() && config.strike_interval > 0.0) {
        errors.push(ConfigError::InvalidStrikeInterval {
            value: config.strike_interval,
        });
    }
    if !(config.time_value_factor.is_finite() && config.time_value_factor >= 0.0) {
        errors.push(ConfigError::InvalidTimeValueFactor {
            value: config.time_value_factor,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The checks that stop a whole run.
///
/// An out-of-range margin is left out: it fails each snapshot's own check
/// instead, so the batch still completes with every instrument skipped.
pub fn check_run_config(config: &AnalysisConfig) -> Result<(), Vec<ConfigError>> {
    let fatal: Vec<ConfigError> = match check_config(config) {
        Ok(()) => return Ok(()),
        Err(errors) => errors
            .into_iter()
            .filter(|e| !matches!(e, ConfigError::MarginOutOfRange { .. }))
            .collect(),
    };
    if fatal.is_empty() { Ok(()) } else { Err(fatal) }
}
