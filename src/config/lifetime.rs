use super::traits::ConfigSection;
use crate::error::GramevoError;
use serde::{Deserialize, Serialize};

/// Variable-size population settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeConfig {
    pub enabled: bool,
    pub min_lifetime: f64,
    pub max_lifetime: f64,
    pub prune_mode: PruneMode,
}

/// How expired individuals are removed from the population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PruneMode {
    /// Remove every individual whose lifetime ran out
    Complete,
    /// Single forward pass that skips the neighbour of each removed individual.
    /// Kept for parity with historical experiment output.
    Sequential,
}

impl LifetimeConfig {
    pub fn eta(&self) -> f64 {
        0.5 * (self.max_lifetime - self.min_lifetime)
    }
}

impl Default for LifetimeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_lifetime: 1.0,
            max_lifetime: 11.0,
            prune_mode: PruneMode::Complete,
        }
    }
}

impl ConfigSection for LifetimeConfig {
    fn section_name() -> &'static str {
        "lifetime"
    }

    fn validate(&self) -> Result<(), GramevoError> {
        if self.min_lifetime < 1.0 {
            return Err(GramevoError::Configuration(
                "Minimum lifetime must be at least 1".to_string(),
            ));
        }
        if self.max_lifetime < self.min_lifetime {
            return Err(GramevoError::Configuration(format!(
                "Maximum lifetime ({}) is below minimum lifetime ({})",
                self.max_lifetime, self.min_lifetime
            )));
        }
        Ok(())
    }
}
