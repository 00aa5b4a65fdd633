use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::InstrumentProvider;
use crate::model::InstrumentSnapshot;

/// Snapshots read from a CSV file with header
/// `symbol,spot_price,high_52w,low_52w,lot_size`.
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl InstrumentProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    async fn list(&self) -> Result<Vec<InstrumentSnapshot>> {
        load_snapshots(&self.path)
    }
}

/// Load every snapshot row from `path`. Any unparsable row fails the load.
pub fn load_snapshots(path: &Path) -> Result<Vec<InstrumentSnapshot>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening CSV file {}", path.display()))?;
    let rows: Vec<InstrumentSnapshot> = rdr
        .deserialize()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parsing CSV file {}", path.display()))?;
    Ok(rows)
}

/// Write snapshots in the format [`load_snapshots`] reads.
pub fn write_snapshots<W: Write>(snapshots: &[InstrumentSnapshot], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for snapshot in snapshots {
        wtr.serialize(snapshot).context("writing snapshot row")?;
    }
    wtr.flush().context("flushing snapshot CSV")?;
    Ok(())
}
