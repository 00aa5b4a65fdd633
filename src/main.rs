use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod example;
mod schema;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        cli::Command::Analyze(args) => option_yield::analyze::run(&args.into()),
        cli::Command::Sample => example::run(),
        cli::Command::Schema => schema::run(),
    }
}

/// Logs go to stderr so `sample` and `schema` output stays pipeable.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("option_yield={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
