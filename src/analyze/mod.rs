//! The `analyze` command: provider → engine → summary → output adapters.

pub mod config;

use anyhow::{Context, Result, bail};
use tracing::{error, info, warn};

use crate::chart;
use crate::engine::{self, Summary};
use crate::model::Analysis;
use crate::provider;
use crate::report::{console, export::RunReport, spreadsheet};
use crate::validate;

pub use config::{AnalyzeOptions, OutputPlan, RunSettings, Source};

/// Run an analysis from the CLI.
pub fn run(opts: &AnalyzeOptions) -> Result<()> {
    let settings = RunSettings::from_cli(opts)?;
    let cfg = &settings.analysis;
    info!(
        margin_percent = cfg.margin_percent,
        lot_multiplier = cfg.lot_multiplier,
        days_to_expiry = cfg.days_to_expiry,
        strike_interval = cfg.strike_interval,
        time_value_factor = cfg.time_value_factor,
        "starting options analysis"
    );

    // 1. Snapshots
    let provider = provider::build(&settings.provider)?;
    let rt = tokio::runtime::Runtime::new().context("creating async runtime")?;
    let snapshots = rt
        .block_on(provider.list())
        .with_context(|| format!("listing instruments from {} provider", provider.name()))?;
    info!(provider = provider.name(), instruments = snapshots.len(), "loaded snapshots");

    // 2. Derivation
    let analysis = engine::derive_all(&snapshots, cfg).map_err(|errors| {
        anyhow::anyhow!("Invalid configuration:\n{}", validate::describe(&errors))
    })?;
    let summary = Summary::from_analysis(&analysis);
    info!(
        rows = summary.rows,
        skipped = summary.skipped,
        "analysis completed"
    );

    // 3. Outputs. Each artifact stands alone; the table prints regardless.
    let failures = if analysis.is_empty() {
        warn!("no valid rows, nothing to export");
        0
    } else {
        write_outputs(&settings, provider.name(), &analysis, &summary)
    };
    console::print_table(cfg, &analysis, &summary);

    if failures > 0 {
        bail!("{failures} output artifact(s) could not be written");
    }
    Ok(())
}

/// Write every planned artifact, returning how many failed.
pub fn write_outputs(
    settings: &RunSettings,
    provider: &str,
    analysis: &Analysis,
    summary: &Summary,
) -> usize {
    let plan = &settings.outputs;
    let mut failures = 0;

    if let Err(e) = std::fs::create_dir_all(&plan.dir) {
        error!(dir = %plan.dir.display(), error = %e, "cannot create output directory");
    }

    if let Some(path) = &plan.report {
        match spreadsheet::save(analysis, path) {
            Ok(written) => {
                for p in written {
                    info!(path = %p.display(), "report saved");
                }
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), "report failed");
                failures += 1;
            }
        }
    }

    if let Some(path) = &plan.chart {
        match chart::save(&analysis.rows, summary, path) {
            Ok(()) => info!(path = %path.display(), "dashboard saved"),
            Err(e) => {
                error!(error = %format!("{e:#}"), "dashboard failed");
                failures += 1;
            }
        }
    }

    if let Some(path) = &plan.json {
        let report = RunReport::new(provider, &settings.analysis, analysis, summary);
        match report.save(path) {
            Ok(()) => info!(path = %path.display(), "JSON export saved"),
            Err(e) => {
                error!(error = %format!("{e:#}"), "JSON export failed");
                failures += 1;
            }
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnalysisConfig;
    use crate::provider::{ProviderSpec, SampleProvider};

    fn settings(dir: &std::path::Path, chart: std::path::PathBuf) -> RunSettings {
        RunSettings {
            analysis: AnalysisConfig::default(),
            provider: ProviderSpec::Sample,
            outputs: OutputPlan {
                dir: dir.to_path_buf(),
                report: Some(dir.join("report.csv")),
                chart: Some(chart),
                json: Some(dir.join("run.json")),
            },
        }
    }

    #[test]
    fn test_failed_artifact_leaves_others() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the chart file should go makes that write fail.
        let blocked = dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();

        let analysis =
            engine::derive_all(&SampleProvider::snapshots(), &AnalysisConfig::default()).unwrap();
        let summary = Summary::from_analysis(&analysis);
        let failures = write_outputs(&settings(dir.path(), blocked), "sample", &analysis, &summary);

        assert_eq!(failures, 1);
        assert!(dir.path().join("report.csv").exists());
        assert!(dir.path().join("run.json").exists());
        assert_eq!(analysis.rows.len(), 10);
    }
}
