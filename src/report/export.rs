use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::Summary;
use crate::model::{Analysis, AnalysisConfig, AnalysisRow, SkippedInstrument};

/// Everything one run produced, in a single JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: String,
    pub provider: String,
    pub config: AnalysisConfig,
    pub summary: Summary,
    pub rows: Vec<AnalysisRow>,
    pub skipped: Vec<SkippedInstrument>,
}

impl RunReport {
    pub fn new(
        provider: &str,
        config: &AnalysisConfig,
        analysis: &Analysis,
        summary: &Summary,
    ) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            provider: provider.to_string(),
            config: config.clone(),
            summary: summary.clone(),
            rows: analysis.rows.clone(),
            skipped: analysis.skipped.clone(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing run report")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
