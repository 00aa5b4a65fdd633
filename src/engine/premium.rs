//! Simplified premium heuristic. Not a pricing model: no volatility, no
//! Greeks, just intrinsic value plus a linear time value.

use super::OptionSide;
use crate::model::AnalysisConfig;

/// `spot * margin% * days/365 * k`, identical for both legs.
pub fn time_value(spot: f64, config: &AnalysisConfig) -> f64 {
    spot * config.margin_fraction() * config.year_fraction() * config.time_value_factor
}

/// Premium for writing one leg at `strike`.
///
/// ITM legs collect intrinsic plus time value, OTM legs time value only.
/// The result is clamped at 0.
pub fn estimate(side: OptionSide, spot: f64, strike: f64, config: &AnalysisConfig) -> f64 {
    let time_value = time_value(spot, config);
    let premium = if side.is_itm(spot, strike) {
        side.intrinsic(spot, strike) + time_value
    } else {
        time_value
    };
    premium.max(0.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_itm_call_adds_intrinsic() {
        let config = AnalysisConfig::default();
        let tv = time_value(1000.0, &config);
        assert_relative_eq!(estimate(OptionSide::Call, 1000.0, 850.0, &config), 150.0 + tv);
    }

    #[test]
    fn test_otm_legs_are_time_value_only() {
        let config = AnalysisConfig::default();
        let tv = time_value(1000.0, &config);
        assert_relative_eq!(estimate(OptionSide::Call, 1000.0, 1100.0, &config), tv);
        assert_relative_eq!(estimate(OptionSide::Put, 1000.0, 900.0, &config), tv);
        // At the money is not in the money.
        assert_relative_eq!(estimate(OptionSide::Put, 1000.0, 1000.0, &config), tv);
    }

    #[test]
    fn test_time_value_factor_scales_linearly() {
        let base = AnalysisConfig::default();
        let doubled = AnalysisConfig {
            time_value_factor: 2.0,
            ..Default::default()
        };
        assert_relative_eq!(time_value(2450.0, &doubled), 2.0 * time_value(2450.0, &base));
        assert_relative_eq!(
            time_value(1000.0, &base),
            1000.0 * 0.15 * 30.0 / 365.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_factor_leaves_intrinsic() {
        let config = AnalysisConfig {
            time_value_factor: 0.0,
            ..Default::default()
        };
        assert_eq!(estimate(OptionSide::Put, 1000.0, 1150.0, &config), 150.0);
        assert_eq!(estimate(OptionSide::Call, 1000.0, 1150.0, &config), 0.0);
    }
}
