use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use option_yield::analyze::{AnalyzeOptions, Source};

/// Option-writing yield calculator: picks margin-offset strikes, estimates
/// premiums and annualized returns on margin for a list of underlyings, and
/// writes a spreadsheet and chart dashboard.
#[derive(Parser)]
#[command(name = "option-yield", version, about)]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SourceArg {
    /// Built-in NSE sample table
    Sample,
    /// Snapshots from a CSV file (--input)
    Csv,
    /// Live quotes over HTTP (--base-url, --symbols)
    Live,
}

impl From<SourceArg> for Source {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Sample => Source::Sample,
            SourceArg::Csv => Source::Csv,
            SourceArg::Live => Source::Live,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive strikes, premiums and IRRs, then write report and dashboard
    Analyze(AnalyzeArgs),

    /// Print the built-in sample snapshots as CSV (editable input for --source csv)
    Sample,

    /// Output the JSON schema of an analysis row
    Schema,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Safety margin in percent (default 15)
    #[arg(long)]
    margin_percent: Option<f64>,

    /// Lot size multiplier (default 1)
    #[arg(long)]
    lot_multiplier: Option<u32>,

    /// Days to expiry used for time value and annualization (default 30)
    #[arg(long)]
    days_to_expiry: Option<u32>,

    /// Strike grid spacing (default 50)
    #[arg(long)]
    strike_interval: Option<f64>,

    /// Time value factor k (default 1.0)
    #[arg(long)]
    time_value_factor: Option<f64>,

    /// JSON config file (default ~/.option-yield/config.json if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where instrument snapshots come from
    #[arg(long, value_enum, default_value = "sample")]
    source: SourceArg,

    /// Snapshot CSV for --source csv
    #[arg(long)]
    input: Option<PathBuf>,

    /// `symbol,lot_size` CSV for --source live (default: sample symbols)
    #[arg(long)]
    symbols: Option<PathBuf>,

    /// Quote endpoint base URL for --source live
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for timestamped output files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Spreadsheet path (default: Options_Analysis_<timestamp>.csv)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Dashboard path (default: Options_Analysis_Graphs_<timestamp>.html)
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Also write the whole run as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Skip the spreadsheet
    #[arg(long)]
    no_report: bool,

    /// Skip the dashboard
    #[arg(long)]
    no_chart: bool,
}

impl From<AnalyzeArgs> for AnalyzeOptions {
    fn from(args: AnalyzeArgs) -> Self {
        AnalyzeOptions {
            margin_percent: args.margin_percent,
            lot_multiplier: args.lot_multiplier,
            days_to_expiry: args.days_to_expiry,
            strike_interval: args.strike_interval,
            time_value_factor: args.time_value_factor,
            config: args.config,
            source: args.source.into(),
            input: args.input,
            symbols: args.symbols,
            base_url: args.base_url,
            output_dir: args.output_dir,
            report: args.report,
            chart: args.chart,
            json: args.json,
            no_report: args.no_report,
            no_chart: args.no_chart,
        }
    }
}
