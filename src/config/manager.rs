use super::{
    evolution::EvolutionConfig, fitness::FitnessConfig, genome::GenomeConfig,
    lifetime::LifetimeConfig, run::RunConfig, traits::ConfigSection,
};
use crate::error::GramevoError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `GRAMEVO__EVOLUTION__SEED=7`
pub const ENV_PREFIX: &str = "GRAMEVO";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub genome: GenomeConfig,
    pub lifetime: LifetimeConfig,
    pub fitness: FitnessConfig,
    pub run: RunConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GramevoError> {
        self.evolution.validate()?;
        self.genome.validate()?;
        self.lifetime.validate()?;
        self.fitness.validate()?;
        self.run.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Layer a TOML/JSON file and `GRAMEVO__*` environment variables over the defaults
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), GramevoError> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!("Loaded configuration from {}", path.display());
        self.config = config;
        Ok(())
    }

    /// Apply only environment overrides on top of the defaults
    pub fn load_from_env(&mut self) -> Result<(), GramevoError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GramevoError> {
        let toml_str = toml::to_string_pretty(&self.config)
            .map_err(|e| GramevoError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| GramevoError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_inner(self) -> AppConfig {
        self.config
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), GramevoError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
