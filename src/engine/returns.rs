use crate::model::AnalysisConfig;

/// Capital posted to write one leg: `strike * margin% * lots`.
pub fn margin_required(strike: f64, effective_lot_size: u64, config: &AnalysisConfig) -> f64 {
    strike * config.margin_fraction() * effective_lot_size as f64
}

/// Annualized return on margin, in percent.
///
/// `None` when no margin is required; the caller reports IRR 0 for that leg.
pub fn annualized_irr(
    premium: f64,
    effective_lot_size: u64,
    margin_required: f64,
    config: &AnalysisConfig,
) -> Option<f64> {
    if margin_required == 0.0 {
        return None;
    }
    let premium_collected = premium * effective_lot_size as f64;
    Some(premium_collected / margin_required * (365.0 / config.days_to_expiry as f64) * 100.0)
}
