/// Where `spot` sits inside its 52-week band, 0 at the low and 100 at the high.
///
/// Requires `high > low`. Spot outside the band (possible with live data)
/// clamps to the nearest end instead of leaving [0, 100].
pub fn percentile(spot: f64, high: f64, low: f64) -> f64 {
    ((spot - low) / (high - low) * 100.0).clamp(0.0, 100.0)
}
