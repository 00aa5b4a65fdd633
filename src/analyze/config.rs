use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::{DateTime, Local};
use tracing::debug;

use crate::model::AnalysisConfig;
use crate::provider::{ProviderSpec, live};
use crate::report::{self, CHART_PREFIX, REPORT_PREFIX};
use crate::validate;

/// Environment override for the live quote endpoint.
pub const BASE_URL_ENV: &str = "OPTION_YIELD_BASE_URL";

/// Where snapshots come from, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Sample,
    Csv,
    Live,
}

/// Raw `analyze` options. `None` means "not given on the command line".
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub margin_percent: Option<f64>,
    pub lot_multiplier: Option<u32>,
    pub days_to_expiry: Option<u32>,
    pub strike_interval: Option<f64>,
    pub time_value_factor: Option<f64>,
    pub config: Option<PathBuf>,
    pub source: Source,
    pub input: Option<PathBuf>,
    pub symbols: Option<PathBuf>,
    pub base_url: Option<String>,
    pub output_dir: PathBuf,
    pub report: Option<PathBuf>,
    pub chart: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub no_report: bool,
    pub no_chart: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            margin_percent: None,
            lot_multiplier: None,
            days_to_expiry: None,
            strike_interval: None,
            time_value_factor: None,
            config: None,
            source: Source::Sample,
            input: None,
            symbols: None,
            base_url: None,
            output_dir: PathBuf::from("."),
            report: None,
            chart: None,
            json: None,
            no_report: false,
            no_chart: false,
        }
    }
}

/// Files a run should produce. `None` disables that artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPlan {
    pub dir: PathBuf,
    pub report: Option<PathBuf>,
    pub chart: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Fully resolved settings for one `analyze` run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub analysis: AnalysisConfig,
    pub provider: ProviderSpec,
    pub outputs: OutputPlan,
}

/// Where a config file is picked up when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".option-yield")
        .join("config.json")
}

impl RunSettings {
    pub fn from_cli(opts: &AnalyzeOptions) -> Result<Self> {
        Self::resolve(
            opts,
            &default_config_path(),
            std::env::var(BASE_URL_ENV).ok(),
            &Local::now(),
        )
    }

    /// Layer defaults, config file, flags and environment.
    pub fn resolve(
        opts: &AnalyzeOptions,
        fallback_config: &Path,
        env_base_url: Option<String>,
        now: &DateTime<Local>,
    ) -> Result<Self> {
        let mut analysis = match &opts.config {
            Some(path) => AnalysisConfig::load(path)?,
            None if fallback_config.exists() => {
                debug!(path = %fallback_config.display(), "using default config file");
                AnalysisConfig::load(fallback_config)?
            }
            None => AnalysisConfig::default(),
        };
        apply_flags(&mut analysis, opts);
        analysis.validate_run().map_err(|errors| {
            anyhow::anyhow!("Invalid configuration:\n{}", validate::describe(&errors))
        })?;

        let provider = match opts.source {
            Source::Sample => ProviderSpec::Sample,
            Source::Csv => {
                let Some(path) = &opts.input else {
                    bail!("--source csv requires --input <file>");
                };
                ProviderSpec::Csv { path: path.clone() }
            }
            Source::Live => ProviderSpec::Live {
                base_url: opts
                    .base_url
                    .clone()
                    .or(env_base_url)
                    .unwrap_or_else(|| live::DEFAULT_BASE_URL.to_string()),
                universe: opts.symbols.clone(),
            },
        };

        let dir = &opts.output_dir;
        let outputs = OutputPlan {
            dir: dir.clone(),
            report: (!opts.no_report).then(|| {
                opts.report
                    .clone()
                    .unwrap_or_else(|| report::timestamped_path(dir, REPORT_PREFIX, "csv", now))
            }),
            chart: (!opts.no_chart).then(|| {
                opts.chart
                    .clone()
                    .unwrap_or_else(|| report::timestamped_path(dir, CHART_PREFIX, "html", now))
            }),
            json: opts.json.clone(),
        };

        Ok(RunSettings {
            analysis,
            provider,
            outputs,
        })
    }
}

fn apply_flags(config: &mut AnalysisConfig, opts: &AnalyzeOptions) {
    if let Some(v) = opts.margin_percent {
        config.margin_percent = v;
    }
    if let Some(v) = opts.lot_multiplier {
        config.lot_multiplier = v;
    }
    if let Some(v) = opts.days_to_expiry {
        config.days_to_expiry = v;
    }
    if let Some(v) = opts.strike_interval {
        config.strike_interval = v;
    }
    if let Some(v) = opts.time_value_factor {
        config.time_value_factor = v;
    }
}
