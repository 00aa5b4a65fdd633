use option_yield::provider::{SampleProvider, csv_file};

/// Print the sample snapshot table as CSV to stdout.
pub fn run() -> anyhow::Result<()> {
    csv_file::write_snapshots(&SampleProvider::snapshots(), std::io::stdout().lock())
}
