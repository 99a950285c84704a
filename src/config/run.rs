use super::traits::ConfigSection;
use crate::engines::evaluation::Objective;
use crate::error::GramevoError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the experiment driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub runs: usize,
    pub grammar_path: PathBuf,
    /// Benchmark names; empty together with `objectives` means every built-in benchmark
    pub benchmarks: Vec<String>,
    pub report_path: Option<PathBuf>,
    /// User-supplied targets, run after the named benchmarks
    pub objectives: Vec<Objective>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            grammar_path: PathBuf::from("grammars/derivative.bnf"),
            benchmarks: Vec::new(),
            report_path: None,
            objectives: Vec::new(),
        }
    }
}

impl ConfigSection for RunConfig {
    fn section_name() -> &'static str {
        "run"
    }

    fn validate(&self) -> Result<(), GramevoError> {
        if self.runs == 0 {
            return Err(GramevoError::Configuration(
                "At least one run is required".to_string(),
            ));
        }
        for objective in &self.objectives {
            if objective.target.trim().is_empty() {
                return Err(GramevoError::Configuration(format!(
                    "Objective {} has no target expression",
                    objective.name
                )));
            }
            if !(objective.lower < objective.upper) {
                return Err(GramevoError::Configuration(format!(
                    "Objective {} needs lower < upper (got [{}, {}])",
                    objective.name, objective.lower, objective.upper
                )));
            }
        }
        Ok(())
    }
}
