use super::traits::ConfigSection;
use crate::error::GramevoError;
use serde::{Deserialize, Serialize};

/// Genome bounds and genotype-to-phenotype mapping settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenomeConfig {
    /// Largest codon value (inclusive)
    pub codon_size: u32,
    pub max_genome_length: usize,
    /// Initialize every genome at max_genome_length instead of a random length
    pub fix_length: bool,
    pub max_wraps: usize,
    pub repair: bool,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            codon_size: 255,
            max_genome_length: 20,
            fix_length: false,
            max_wraps: 2,
            repair: true,
        }
    }
}

impl ConfigSection for GenomeConfig {
    fn section_name() -> &'static str {
        "genome"
    }

    fn validate(&self) -> Result<(), GramevoError> {
        if self.codon_size == 0 {
            return Err(GramevoError::Configuration(
                "Codon size must be at least 1".to_string(),
            ));
        }
        if self.max_genome_length == 0 {
            return Err(GramevoError::Configuration(
                "Maximum genome length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
