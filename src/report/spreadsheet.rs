use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::{round2, skipped_path};
use crate::model::{Analysis, AnalysisRow, SkippedInstrument};

/// One spreadsheet line, with the column headers a trader expects.
#[derive(Debug, Serialize)]
struct SheetRow<'a> {
    #[serde(rename = "Symbol")]
    symbol: &'a str,
    #[serde(rename = "Spot Price")]
    spot_price: f64,
    #[serde(rename = "52W High")]
    high_52w: f64,
    #[serde(rename = "52W Low")]
    low_52w: f64,
    #[serde(rename = "Percentile")]
    percentile: f64,
    #[serde(rename = "Lot Size")]
    lot_size: u64,
    #[serde(rename = "CE Strike")]
    ce_strike: f64,
    #[serde(rename = "CE Premium")]
    ce_premium: f64,
    #[serde(rename = "CE Margin Required")]
    ce_margin_required: f64,
    #[serde(rename = "CE IRR")]
    ce_irr: f64,
    #[serde(rename = "PE Strike")]
    pe_strike: f64,
    #[serde(rename = "PE Premium")]
    pe_premium: f64,
    #[serde(rename = "PE Margin Required")]
    pe_margin_required: f64,
    #[serde(rename = "PE IRR")]
    pe_irr: f64,
    #[serde(rename = "Margin Used (%)")]
    margin_percent_used: f64,
    #[serde(rename = "Zero Margin Legs")]
    degenerate: &'static str,
}

impl<'a> From<&'a AnalysisRow> for SheetRow<'a> {
    fn from(row: &'a AnalysisRow) -> Self {
        let degenerate = match (row.ce_margin_degenerate, row.pe_margin_degenerate) {
            (true, true) => "CE+PE",
            (true, false) => "CE",
            (false, true) => "PE",
            (false, false) => "",
        };
        SheetRow {
            symbol: &row.symbol,
            spot_price: row.spot_price,
            high_52w: row.high_52w,
            low_52w: row.low_52w,
            percentile: round2(row.percentile),
            lot_size: row.effective_lot_size,
            ce_strike: row.ce_strike,
            ce_premium: round2(row.ce_premium),
            ce_margin_required: round2(row.ce_margin_required),
            ce_irr: round2(row.ce_irr),
            pe_strike: row.pe_strike,
            pe_premium: round2(row.pe_premium),
            pe_margin_required: round2(row.pe_margin_required),
            pe_irr: round2(row.pe_irr),
            margin_percent_used: row.margin_percent_used,
            degenerate,
        }
    }
}

#[derive(Debug, Serialize)]
struct SkipRow<'a> {
    #[serde(rename = "Symbol")]
    symbol: &'a str,
    #[serde(rename = "Kind")]
    kind: crate::validate::SkipKind,
    #[serde(rename = "Reason")]
    reason: &'a str,
}

impl<'a> From<&'a SkippedInstrument> for SkipRow<'a> {
    fn from(skip: &'a SkippedInstrument) -> Self {
        SkipRow {
            symbol: &skip.symbol,
            kind: skip.kind,
            reason: &skip.reason,
        }
    }
}

/// Write the analysis rows as CSV to any writer.
pub fn write_rows<W: Write>(rows: &[AnalysisRow], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(SheetRow::from(row))
            .with_context(|| format!("writing row for {}", row.symbol))?;
    }
    wtr.flush().context("flushing report")?;
    Ok(())
}

/// Write the skipped instruments as CSV to any writer.
pub fn write_skipped<W: Write>(skipped: &[SkippedInstrument], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for skip in skipped {
        wtr.serialize(SkipRow::from(skip))
            .with_context(|| format!("writing skip for {}", skip.symbol))?;
    }
    wtr.flush().context("flushing skipped list")?;
    Ok(())
}

/// Save the report to `path`, plus a `_skipped.csv` sibling when any
/// instrument was skipped. Returns every file written.
pub fn save(analysis: &Analysis, path: &Path) -> Result<Vec<PathBuf>> {
    if analysis.rows.is_empty() {
        anyhow::bail!("no rows to export");
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating report {}", path.display()))?;
    write_rows(&analysis.rows, file).with_context(|| format!("writing {}", path.display()))?;
    let mut written = vec![path.to_path_buf()];

    if !analysis.skipped.is_empty() {
        let skip_path = skipped_path(path);
        let file = std::fs::File::create(&skip_path)
            .with_context(|| format!("creating {}", skip_path.display()))?;
        write_skipped(&analysis.skipped, file)
            .with_context(|| format!("writing {}", skip_path.display()))?;
        written.push(skip_path);
    }

    Ok(written)
}
