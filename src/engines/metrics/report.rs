use crate::config::AppConfig;
use crate::engines::metrics::statistics::BenchmarkSummary;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Everything an experiment produced, written as JSON
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub config: AppConfig,
    pub benchmarks: Vec<BenchmarkSummary>,
}

impl ExperimentReport {
    pub fn new(config: AppConfig) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            config,
            benchmarks: Vec::new(),
        }
    }

    pub fn push(&mut self, summary: BenchmarkSummary) {
        self.benchmarks.push(summary);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Report written to {}", path.as_ref().display());
        Ok(())
    }
}
