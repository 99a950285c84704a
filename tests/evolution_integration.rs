use gramevo::config::{AppConfig, FitnessConfig, SurvivorSelection};
use gramevo::data::BnfConnector;
use gramevo::engines::evaluation::{Benchmark, DerivativeFitness, FitnessEvaluator};
use gramevo::engines::generation::{
    EngineConfig, EvolutionEngine, GrammarMapper, Individual, ProgressCallback, SilentProgressCallback,
};
use gramevo::engines::metrics::{BenchmarkSummary, ExperimentReport, RunRecord};
use std::sync::Arc;
use std::time::Duration;

/// Records what the engine reports each generation
#[derive(Default)]
struct RecordingCallback {
    started: Vec<usize>,
    sizes: Vec<usize>,
}

impl ProgressCallback for &mut RecordingCallback {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, population_size: usize) {
        self.sizes.push(population_size);
    }
}

fn small_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.evolution.generations = 8;
    config.evolution.population_size = 24;
    config.evolution.offspring_size = 24;
    config.evolution.seed = Some(seed);
    config.fitness = FitnessConfig {
        samples: 10,
        ..FitnessConfig::default()
    };
    config
}

fn engine(config: &AppConfig) -> EvolutionEngine<DerivativeFitness> {
    let grammar = Arc::new(BnfConnector::load("grammars/derivative.bnf").unwrap());
    let mapper = GrammarMapper::from_config(grammar, &config.genome);
    let evaluator = DerivativeFitness::new(Benchmark::Cubic.objective(), config.fitness.clone()).unwrap();
    EvolutionEngine::new(EngineConfig::from(config), mapper, evaluator)
}

#[test]
fn test_initial_population_respects_bounds() {
    let mut config = small_config(1);
    let mut engine = engine(&config);
    let population = engine.initialize_population();

    assert_eq!(population.len(), 24);
    for ind in &population {
        assert!(!ind.genome.is_empty() && ind.genome.len() <= 20);
        assert!(ind.genome.iter().all(|&c| c <= 255));
    }

    config.genome.fix_length = true;
    let mut engine = self::engine(&config);
    assert!(engine.initialize_population().iter().all(|ind| ind.genome.len() == 20));
}

#[test]
fn test_elitist_run_never_gets_worse() {
    let config = small_config(7);
    let mut engine = engine(&config);
    let population = engine.initialize_population();

    let mut callback = RecordingCallback::default();
    let outcome = engine.run(population, &mut callback).unwrap();

    assert_eq!(outcome.best_fitness_history.len(), 8);
    assert_eq!(callback.started, (0..8).collect::<Vec<_>>());
    assert!(callback.sizes.iter().all(|&s| s == 24));
    for pair in outcome.best_fitness_history.windows(2) {
        assert!(pair[1] <= pair[0], "best fitness rose: {:?}", pair);
    }
    assert_eq!(outcome.best.fitness, *outcome.best_fitness_history.last().unwrap());
}

#[test]
fn test_same_seed_same_run() {
    let config = small_config(99);

    let mut first = engine(&config);
    let population = first.initialize_population();
    let a = first.run(population, SilentProgressCallback).unwrap();

    let mut second = engine(&config);
    let population = second.initialize_population();
    let b = second.run(population, SilentProgressCallback).unwrap();

    assert_eq!(a.best_fitness_history, b.best_fitness_history);
    assert_eq!(a.best.genome, b.best.genome);
    assert_eq!(a.local_search_evaluations, b.local_search_evaluations);
}

#[test]
fn test_seeded_solution_is_found_in_first_generation() {
    let config = small_config(3);
    let mut engine = engine(&config);

    // <expr><op><expr> -> 3.0 * (X * X)
    let exact = Individual::new(vec![0, 3, 3, 2, 0, 3, 0, 2, 3, 0], 0.1);
    assert_eq!(engine.mapper().decode(&exact.genome).as_deref(), Some("3.0*X*X"));

    let mut population = engine.initialize_population();
    population[0] = exact;

    let outcome = engine.run(population, SilentProgressCallback).unwrap();
    let first = outcome.first_solution.expect("seeded solution must survive");

    assert_eq!(first.generation, 0);
    assert!(first.local_search_evaluations <= outcome.local_search_evaluations);
    assert!(engine.evaluator().is_solution(outcome.best.hits));
}

#[test]
fn test_local_search_can_be_disabled() {
    let mut config = small_config(5);
    config.evolution.local_search = false;

    let mut engine = engine(&config);
    let population = engine.initialize_population();
    let outcome = engine.run(population, SilentProgressCallback).unwrap();

    assert_eq!(outcome.local_search_evaluations, 0);
}

#[test]
fn test_variable_size_population_stays_bounded() {
    let mut config = small_config(11);
    config.evolution.survivor_selection = SurvivorSelection::MuLambda;
    config.evolution.offspring_size = 36;
    config.lifetime.enabled = true;

    let mut engine = engine(&config);
    let population = engine.initialize_population();

    let mut callback = RecordingCallback::default();
    engine.run(population, &mut callback).unwrap();

    assert_eq!(callback.sizes.len(), 8);
    assert!(callback.sizes.iter().all(|&s| s >= 1 && s <= 24));
}

#[test]
fn test_empty_population_is_an_error() {
    let config = small_config(1);
    let mut engine = engine(&config);
    assert!(engine.run(Vec::new(), SilentProgressCallback).is_err());
}

#[test]
fn test_outcomes_feed_report() {
    let config = small_config(21);
    let mut records = Vec::new();

    for seed in 0..2 {
        let mut engine = engine(&small_config(seed));
        let population = engine.initialize_population();
        let outcome = engine.run(population, SilentProgressCallback).unwrap();
        records.push(RunRecord::from_outcome(&outcome, Duration::from_millis(5)));
    }

    let summary = BenchmarkSummary::from_records("cubic", &records, &config.evolution);
    assert_eq!(summary.runs, 2);
    assert_eq!(summary.mean_progress.len(), 8);

    let mut report = ExperimentReport::new(config);
    report.push(summary);
    report.finish();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["benchmarks"][0]["benchmark"], "cubic");
    assert!(json["finished_at"].is_string());
}
