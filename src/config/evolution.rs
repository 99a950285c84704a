use super::traits::{check_probability, ConfigSection};
use crate::error::GramevoError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub generations: usize,
    pub population_size: usize,
    pub offspring_size: usize,
    pub tournament_size: usize,
    pub crossover: CrossoverMethod,
    pub crossover_rate: f64,
    pub crossover_schedule: CrossoverSchedule,
    /// Cut-point redraws allowed before one-point crossover gives up and copies the parents
    pub max_crossover_attempts: usize,
    pub mutation_rate: f64,
    pub mutation_schedule: MutationSchedule,
    /// Learning rate of the self-adaptive mutation update
    pub self_adaptation_gamma: f64,
    pub duplication_rate: f64,
    pub local_search: bool,
    pub survivor_selection: SurvivorSelection,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverMethod {
    OnePoint,
    Uniform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverSchedule {
    Static,
    LinearIncrease,
    LinearDecrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationSchedule {
    Static,
    SelfAdaptive,
    LinearIncrease,
    LinearDecrease,
    BackSchutz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurvivorSelection {
    AgeBased,
    FitnessTruncation,
    MuLambda,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generations: 200,
            population_size: 200,
            offspring_size: 200,
            tournament_size: 3,
            crossover: CrossoverMethod::OnePoint,
            crossover_rate: 0.5,
            crossover_schedule: CrossoverSchedule::Static,
            max_crossover_attempts: 100,
            mutation_rate: 0.1,
            mutation_schedule: MutationSchedule::Static,
            self_adaptation_gamma: 0.22,
            duplication_rate: 0.01,
            local_search: true,
            survivor_selection: SurvivorSelection::AgeBased,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), GramevoError> {
        if self.generations == 0 {
            return Err(GramevoError::Configuration(
                "Generation count must be at least 1".to_string(),
            ));
        }
        if self.population_size == 0 {
            return Err(GramevoError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.offspring_size < 2 {
            return Err(GramevoError::Configuration(
                "Offspring size must be at least 2".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(GramevoError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.max_crossover_attempts == 0 {
            return Err(GramevoError::Configuration(
                "max_crossover_attempts must be at least 1".to_string(),
            ));
        }
        check_probability("evolution", "crossover_rate", self.crossover_rate)?;
        check_probability("evolution", "mutation_rate", self.mutation_rate)?;
        check_probability("evolution", "duplication_rate", self.duplication_rate)?;

        match self.survivor_selection {
            SurvivorSelection::AgeBased if self.offspring_size != self.population_size => {
                Err(GramevoError::Configuration(format!(
                    "Age-based replacement needs offspring_size == population_size ({} != {})",
                    self.offspring_size, self.population_size
                )))
            }
            SurvivorSelection::FitnessTruncation if self.offspring_size > self.population_size => {
                Err(GramevoError::Configuration(format!(
                    "Fitness truncation needs offspring_size <= population_size ({} > {})",
                    self.offspring_size, self.population_size
                )))
            }
            _ => Ok(()),
        }
    }
}
