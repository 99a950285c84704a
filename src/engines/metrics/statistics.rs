use crate::config::{EvolutionConfig, SurvivorSelection};
use crate::engines::generation::evolution_engine::RunOutcome;
use serde::Serialize;
use std::time::Duration;

/// Summary of one finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub best_fitness: f64,
    pub best_phenotype: Option<String>,
    /// Generation of the first full solution
    pub solution_generation: Option<usize>,
    /// Local-search evaluations up to the first solution
    pub solution_local_evaluations: usize,
    pub local_search_evaluations: usize,
    pub best_fitness_history: Vec<f64>,
    pub elapsed_secs: f64,
}

impl RunRecord {
    pub fn from_outcome(outcome: &RunOutcome, elapsed: Duration) -> Self {
        Self {
            best_fitness: outcome.best.fitness,
            best_phenotype: outcome.best.phenotype.clone(),
            solution_generation: outcome.first_solution.map(|s| s.generation),
            solution_local_evaluations: outcome
                .first_solution
                .map(|s| s.local_search_evaluations)
                .unwrap_or(0),
            local_search_evaluations: outcome.local_search_evaluations,
            best_fitness_history: outcome.best_fitness_history.clone(),
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.solution_generation.is_some()
    }
}

/// Aggregate over all runs of one benchmark
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSummary {
    pub benchmark: String,
    pub runs: usize,
    /// Success rate: solved runs / runs
    pub success_rate: f64,
    /// Mean best fitness over all runs
    pub mean_best_fitness: f64,
    /// Average evaluations to solution, over solved runs only
    pub average_evaluations_to_solution: Option<f64>,
    pub mean_progress: Vec<f64>,
    pub mean_elapsed_secs: f64,
    /// Phenotype of the best solving run, if any run solved
    pub solution: Option<String>,
}

impl BenchmarkSummary {
    pub fn from_records(benchmark: impl Into<String>, records: &[RunRecord], evolution: &EvolutionConfig) -> Self {
        let runs = records.len();
        let solved: Vec<&RunRecord> = records.iter().filter(|r| r.is_success()).collect();

        let success_rate = ratio(solved.len() as f64, runs);
        let mean_best_fitness = ratio(records.iter().map(|r| r.best_fitness).sum(), runs);
        let mean_elapsed_secs = ratio(records.iter().map(|r| r.elapsed_secs).sum(), runs);

        let per_generation = evaluations_per_generation(evolution);
        let average_evaluations_to_solution = (!solved.is_empty()).then(|| {
            let total: usize = solved
                .iter()
                .map(|r| r.solution_generation.unwrap_or(0) * per_generation + r.solution_local_evaluations)
                .sum();
            total as f64 / solved.len() as f64
        });

        let solution = solved
            .iter()
            .min_by(|a, b| a.best_fitness.total_cmp(&b.best_fitness))
            .and_then(|r| r.best_phenotype.clone());

        Self {
            benchmark: benchmark.into(),
            runs,
            success_rate,
            mean_best_fitness,
            average_evaluations_to_solution,
            mean_progress: mean_progress(records),
            mean_elapsed_secs,
            solution,
        }
    }
}

/// Fitness evaluations charged to one generation
pub fn evaluations_per_generation(evolution: &EvolutionConfig) -> usize {
    match evolution.survivor_selection {
        SurvivorSelection::MuLambda => evolution.offspring_size,
        _ => evolution.population_size,
    }
}

/// Mean best fitness per generation across runs.
///
/// Runs with shorter histories contribute only to the generations they have.
pub fn mean_progress(records: &[RunRecord]) -> Vec<f64> {
    let length = records
        .iter()
        .map(|r| r.best_fitness_history.len())
        .max()
        .unwrap_or(0);

    (0..length)
        .map(|g| {
            let values: Vec<f64> = records
                .iter()
                .filter_map(|r| r.best_fitness_history.get(g).copied())
                .collect();
            ratio(values.iter().sum(), values.len())
        })
        .collect()
}

fn ratio(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
