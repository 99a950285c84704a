use super::traits::ConfigSection;
use crate::error::GramevoError;
use serde::{Deserialize, Serialize};

/// Sampling and weighting of the derivative-approximation fitness
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Number of sampling intervals; N + 1 points are evaluated
    pub samples: usize,
    /// Forward-difference step
    pub step: f64,
    /// Error at or below which a sample point counts as a hit
    pub tolerance: f64,
    pub hit_weight: f64,
    pub miss_weight: f64,
    /// Fitness assigned when evaluation fails numerically
    pub failure_fitness: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            samples: 50,
            step: 1e-5,
            tolerance: 0.1,
            hit_weight: 1.0,
            miss_weight: 10.0,
            failure_fitness: 100_000.0,
        }
    }
}

impl ConfigSection for FitnessConfig {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<(), GramevoError> {
        if self.samples == 0 {
            return Err(GramevoError::Configuration(
                "At least one sampling interval is required".to_string(),
            ));
        }
        if self.step <= 0.0 {
            return Err(GramevoError::Configuration(
                "Forward-difference step must be positive".to_string(),
            ));
        }
        if self.tolerance < 0.0 {
            return Err(GramevoError::Configuration(
                "Hit tolerance cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
