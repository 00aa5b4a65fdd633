//! Instrument providers: where snapshots come from.
//!
//! The engine never sees which provider produced its input. Every provider
//! yields an ordered listing; validating individual snapshots is the
//! engine's job.

pub mod csv_file;
pub mod live;
pub mod sample;

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::InstrumentSnapshot;

pub use csv_file::CsvProvider;
pub use live::LiveProvider;
pub use sample::SampleProvider;

/// A source of instrument snapshots for one run.
#[async_trait]
pub trait InstrumentProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Ordered snapshot listing. Fails only when the source as a whole is
    /// unreadable; a bad individual snapshot is returned as-is.
    async fn list(&self) -> Result<Vec<InstrumentSnapshot>>;
}

/// Which provider to build, with its settings.
#[derive(Debug, Clone)]
pub enum ProviderSpec {
    Sample,
    Csv {
        path: PathBuf,
    },
    Live {
        base_url: String,
        /// `symbol,lot_size` CSV; the sample universe when absent.
        universe: Option<PathBuf>,
    },
}

/// Build the provider described by `spec`.
pub fn build(spec: &ProviderSpec) -> Result<Box<dyn InstrumentProvider>> {
    let provider: Box<dyn InstrumentProvider> = match spec {
        ProviderSpec::Sample => Box::new(SampleProvider),
        ProviderSpec::Csv { path } => Box::new(CsvProvider::new(path.clone())),
        ProviderSpec::Live { base_url, universe } => {
            let universe = match universe {
                Some(path) => live::load_universe(path)?,
                None => live::sample_universe(),
            };
            Box::new(LiveProvider::new(base_url.clone(), universe)?)
        }
    };
    Ok(provider)
}
