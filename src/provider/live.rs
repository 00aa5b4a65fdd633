//! Live quotes from an NSE-style `quote-equity` endpoint.
//!
//! The endpoint reports spot and the 52-week range but not the contract lot
//! size, so the provider is given a universe of `(symbol, lot_size)` pairs
//! and fills in prices per symbol.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::InstrumentProvider;
use super::sample::SampleProvider;
use crate::model::InstrumentSnapshot;

pub const DEFAULT_BASE_URL: &str = "https://www.nseindia.com";

const QUOTE_PATH: &str = "/api/quote-equity";
const MAX_RETRIES: u32 = 2;

// ── Universe ────────────────────────────────────────────────────────

/// One tradable underlying and its contract lot size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseEntry {
    pub symbol: String,
    pub lot_size: u32,
}

/// Load a `symbol,lot_size` CSV.
pub fn load_universe(path: &Path) -> Result<Vec<UniverseEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening universe file {}", path.display()))?;
    let entries: Vec<UniverseEntry> = rdr
        .deserialize()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parsing universe file {}", path.display()))?;
    if entries.is_empty() {
        bail!("universe file {} lists no symbols", path.display());
    }
    Ok(entries)
}

/// Symbols and lot sizes of the built-in sample.
pub fn sample_universe() -> Vec<UniverseEntry> {
    SampleProvider::snapshots()
        .into_iter()
        .map(|s| UniverseEntry {
            symbol: s.symbol,
            lot_size: s.lot_size,
        })
        .collect()
}

// ── API response types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    price_info: PriceInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceInfo {
    last_price: f64,
    week_high_low: WeekHighLow,
}

#[derive(Debug, Deserialize)]
struct WeekHighLow {
    min: f64,
    max: f64,
}

/// Turn one quote body into a snapshot for `entry`.
pub fn parse_quote(entry: &UniverseEntry, body: &str) -> Result<InstrumentSnapshot> {
    let quote: QuoteResponse = serde_json::from_str(body)
        .with_context(|| format!("parsing quote for {}", entry.symbol))?;
    let info = quote.price_info;
    Ok(InstrumentSnapshot::new(
        entry.symbol.clone(),
        info.last_price,
        info.week_high_low.max,
        info.week_high_low.min,
        entry.lot_size,
    ))
}

// ── Provider ────────────────────────────────────────────────────────

pub struct LiveProvider {
    client: reqwest::Client,
    base_url: String,
    universe: Vec<UniverseEntry>,
}

impl LiveProvider {
    pub fn new(base_url: String, universe: Vec<UniverseEntry>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            // The exchange rejects requests without a browser-like agent.
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) option-yield/0.1")
            .build()
            .context("creating HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            universe,
        })
    }

    fn quote_url(&self) -> String {
        format!("{}{}", self.base_url, QUOTE_PATH)
    }

    async fn fetch_one(&self, entry: &UniverseEntry) -> Result<InstrumentSnapshot> {
        let body = retry(MAX_RETRIES, || async move {
            let resp = self
                .client
                .get(self.quote_url())
                .query(&[("symbol", entry.symbol.as_str())])
                .send()
                .await
                .with_context(|| format!("requesting quote for {}", entry.symbol))?;
            let status = resp.status();
            if !status.is_success() {
                bail!("quote for {} returned HTTP {status}", entry.symbol);
            }
            resp.text()
                .await
                .with_context(|| format!("reading quote body for {}", entry.symbol))
        })
        .await?;
        parse_quote(entry, &body)
    }
}

#[async_trait]
impl InstrumentProvider for LiveProvider {
    fn name(&self) -> &str {
        "live"
    }

    async fn list(&self) -> Result<Vec<InstrumentSnapshot>> {
        info!(url = %self.quote_url(), symbols = self.universe.len(), "fetching live quotes");

        let pb = indicatif::ProgressBar::new(self.universe.len() as u64);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("  Quotes [{bar:40}] {pos}/{len} {msg}")?,
        );

        let mut snapshots = Vec::with_capacity(self.universe.len());
        for entry in &self.universe {
            pb.set_message(entry.symbol.clone());
            match self.fetch_one(entry).await {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => warn!(
                    symbol = %entry.symbol,
                    error = %format!("{e:#}"),
                    "quote unavailable, omitting"
                ),
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        if snapshots.is_empty() && !self.universe.is_empty() {
            bail!("no quotes could be fetched from {}", self.base_url);
        }
        Ok(snapshots)
    }
}

/// Retry an async operation with exponential backoff.
async fn retry<T, F, Fut>(max_retries: u32, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(val) => return Ok(val),
            Err(e) if attempt >= max_retries => return Err(e),
            Err(_) => {
                tokio::time::sleep(Duration::from_millis(500 * 2u64.pow(attempt))).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> UniverseEntry {
        UniverseEntry {
            symbol: "RELIANCE".to_string(),
            lot_size: 250,
        }
    }

    #[test]
    fn test_parse_quote() {
        let body = r#"{
            "info": {"symbol": "RELIANCE"},
            "priceInfo": {
                "lastPrice": 2450.5,
                "change": 12.3,
                "weekHighLow": {
                    "min": 2220.3, "minDate": "28-Mar-2023",
                    "max": 2856.15, "maxDate": "19-Sep-2023",
                    "value": 2450.5
                }
            }
        }"#;
        let snapshot = parse_quote(&entry(), body).unwrap();
        assert_eq!(
            snapshot,
            InstrumentSnapshot::new("RELIANCE", 2450.5, 2856.15, 2220.3, 250)
        );
    }

    #[test]
    fn test_parse_quote_missing_price_info() {
        let err = parse_quote(&entry(), r#"{"info": {}}"#).unwrap_err();
        assert!(format!("{err:#}").contains("RELIANCE"));
    }

    #[test]
    fn test_sample_universe_matches_sample() {
        let universe = sample_universe();
        assert_eq!(universe.len(), 10);
        assert_eq!(universe[0].symbol, "NIFTY");
        assert_eq!(universe[0].lot_size, 50);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider =
            LiveProvider::new("http://localhost:8080/".to_string(), sample_universe()).unwrap();
        assert_eq!(provider.quote_url(), "http://localhost:8080/api/quote-equity");
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_limit() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = retry(0, || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            bail!("down")
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
