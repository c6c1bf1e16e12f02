// src/report/sink.rs
// =============================================================================
// Where finished reports go.
//
// The audit core only knows the ReportSink trait ("accept this report").
// Two sinks ship with the crate:
// - JsonFileSink: pretty-printed JSON written to a file
// - MemorySink:   keeps reports in a Vec (embedding and tests)
//
// Anything fancier (databases, PDF/markdown rendering) implements the trait
// outside this crate.
// =============================================================================

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use super::Report;

pub trait ReportSink {
    fn accept(&mut self, report: &Report) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for JsonFileSink {
    fn accept(&mut self, report: &Report) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write report to {}", self.path.display()))?;

        info!("Report saved to {}", self.path.display());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    pub reports: Vec<Report>,
}

impl ReportSink for MemorySink {
    fn accept(&mut self, report: &Report) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}
