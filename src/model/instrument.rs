use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Market snapshot of a single underlying, as supplied by a provider.
///
/// Snapshots are read-only inputs for one run. Nothing here is validated on
/// construction; the engine rejects malformed snapshots one at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InstrumentSnapshot {
    /// Exchange symbol, unique within a run.
    pub symbol: String,
    /// Last traded price of the underlying.
    pub spot_price: f64,
    /// Trailing 52-week high.
    pub high_52w: f64,
    /// Trailing 52-week low.
    pub low_52w: f64,
    /// Contract multiplier for one lot.
    pub lot_size: u32,
}

impl InstrumentSnapshot {
    pub fn new(
        symbol: impl Into<String>,
        spot_price: f64,
        high_52w: f64,
        low_52w: f64,
        lot_size: u32,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            spot_price,
            high_52w,
            low_52w,
            lot_size,
        }
    }
}
