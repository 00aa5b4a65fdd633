//! Output adapters that turn a finished analysis into files and console
//! output. Nothing here feeds back into the engine; a failure writing one
//! artifact leaves the computed rows untouched.

pub mod console;
pub mod export;
pub mod spreadsheet;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

pub const REPORT_PREFIX: &str = "Options_Analysis";
pub const CHART_PREFIX: &str = "Options_Analysis_Graphs";

/// `<dir>/<prefix>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn timestamped_path(dir: &Path, prefix: &str, ext: &str, at: &DateTime<Local>) -> PathBuf {
    dir.join(format!("{prefix}_{}.{ext}", at.format("%Y%m%d_%H%M%S")))
}

/// Sibling path holding the skipped instruments of a report.
pub fn skipped_path(report: &Path) -> PathBuf {
    let stem = report
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| REPORT_PREFIX.to_string());
    report.with_file_name(format!("{stem}_skipped.csv"))
}

/// Round to 2 decimals for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_timestamped_path() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let path = timestamped_path(Path::new("out"), REPORT_PREFIX, "csv", &at);
        assert_eq!(path, Path::new("out/Options_Analysis_20240307_090501.csv"));
    }

    #[test]
    fn test_skipped_path() {
        let path = skipped_path(Path::new("out/Options_Analysis_20240307_090501.csv"));
        assert_eq!(path, Path::new("out/Options_Analysis_20240307_090501_skipped.csv"));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(-0.004), 0.0);
        assert_eq!(round2(1186.8), 1186.8);
    }
}
