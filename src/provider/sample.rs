use anyhow::Result;
use async_trait::async_trait;

use super::InstrumentProvider;
use crate::model::InstrumentSnapshot;

/// Built-in NSE reference universe: (symbol, spot, 52w high, 52w low, lot size).
const SAMPLE: [(&str, f64, f64, f64, u32); 10] = [
    ("NIFTY", 19_500.0, 20_000.0, 18_000.0, 50),
    ("BANKNIFTY", 44_500.0, 46_000.0, 42_000.0, 25),
    ("RELIANCE", 2_450.0, 2_650.0, 2_250.0, 250),
    ("TCS", 3_600.0, 3_850.0, 3_200.0, 125),
    ("INFY", 1_480.0, 1_600.0, 1_350.0, 300),
    ("HDFCBANK", 1_650.0, 1_750.0, 1_450.0, 550),
    ("ICICIBANK", 950.0, 1_050.0, 850.0, 1_375),
    ("SBIN", 590.0, 650.0, 520.0, 1_500),
    ("BHARTIARTL", 880.0, 950.0, 750.0, 1_220),
    ("HINDUNILVR", 2_580.0, 2_800.0, 2_350.0, 300),
];

/// Static sample data, useful offline and as a template for CSV input.
pub struct SampleProvider;

impl SampleProvider {
    pub fn snapshots() -> Vec<InstrumentSnapshot> {
        SAMPLE
            .iter()
            .map(|&(symbol, spot, high, low, lot)| {
                InstrumentSnapshot::new(symbol, spot, high, low, lot)
            })
            .collect()
    }
}

#[async_trait]
impl InstrumentProvider for SampleProvider {
    fn name(&self) -> &str {
        "sample"
    }

    async fn list(&self) -> Result<Vec<InstrumentSnapshot>> {
        Ok(Self::snapshots())
    }
}
