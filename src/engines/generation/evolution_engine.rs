use crate::config::{AppConfig, EvolutionConfig, GenomeConfig, LifetimeConfig};
use crate::engines::evaluation::fitness::{evaluate_individual, FitnessEvaluator};
use crate::engines::generation::{
    grammar_mapper::GrammarMapper,
    individual::{best, sort_best_first, Individual},
    lifetime::LifetimeManager,
    local_search::local_search,
    mutation::{mutate, MutationContext},
    operators::{duplicate, random_genome, tournament_selection},
};
use crate::error::{GramevoError, Result};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

/// The configuration sections the engine reads
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub evolution: EvolutionConfig,
    pub genome: GenomeConfig,
    pub lifetime: LifetimeConfig,
}

impl From<&AppConfig> for EngineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            evolution: config.evolution.clone(),
            genome: config.genome.clone(),
            lifetime: config.lifetime.clone(),
        }
    }
}

/// Where the first full solution of a run appeared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FirstSolution {
    pub generation: usize,
    /// Local-search evaluations spent up to and including that generation
    pub local_search_evaluations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Best individual of the final population
    pub best: Individual,
    pub first_solution: Option<FirstSolution>,
    /// Best fitness after each generation
    pub best_fitness_history: Vec<f64>,
    /// Local-search evaluations over the whole run
    pub local_search_evaluations: usize,
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, population_size: usize);
}

pub struct EvolutionEngine<E: FitnessEvaluator> {
    config: EngineConfig,
    mapper: GrammarMapper,
    evaluator: E,
    lifetimes: Option<LifetimeManager>,
    rng: StdRng,
}

impl<E: FitnessEvaluator> EvolutionEngine<E> {
    pub fn new(config: EngineConfig, mapper: GrammarMapper, evaluator: E) -> Self {
        let rng = match config.evolution.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let lifetimes = config
            .lifetime
            .enabled
            .then(|| LifetimeManager::new(&config.lifetime));

        Self {
            config,
            mapper,
            evaluator,
            lifetimes,
            rng,
        }
    }

    pub fn mapper(&self) -> &GrammarMapper {
        &self.mapper
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Random initial population, unevaluated.
    ///
    /// Genome lengths are drawn from `[1, max_genome_length]` unless
    /// `fix_length` is set.
    pub fn initialize_population(&mut self) -> Vec<Individual> {
        let genome = &self.config.genome;
        let evolution = &self.config.evolution;

        (0..evolution.population_size)
            .map(|_| {
                let length = if genome.fix_length {
                    genome.max_genome_length
                } else {
                    self.rng.gen_range(1..=genome.max_genome_length)
                };
                let codons = random_genome(length, genome.codon_size, &mut self.rng);
                let rate = evolution
                    .mutation_schedule
                    .initial_rate(evolution.mutation_rate, codons.len());
                Individual::new(codons, rate)
            })
            .collect()
    }

    /// Run the evolution process for the configured number of generations.
    ///
    /// The run never stops early; the first generation whose best individual
    /// is a full solution is recorded.
    pub fn run<C: ProgressCallback>(
        &mut self,
        mut population: Vec<Individual>,
        mut callback: C,
    ) -> Result<RunOutcome> {
        if population.is_empty() {
            return Err(GramevoError::Evolution(
                "Initial population is empty".to_string(),
            ));
        }

        self.evaluate(&mut population);
        if let Some(lifetimes) = &self.lifetimes {
            lifetimes.assign(&mut population);
        }
        sort_best_first(&mut population);

        let generations = self.config.evolution.generations;
        let mut history = Vec::with_capacity(generations);
        let mut first_solution = None;
        let mut local_evaluations = 0;

        for generation in 0..generations {
            callback.on_generation_start(generation);

            let (next, spent) = self.step(population, generation)?;
            population = next;
            local_evaluations += spent;

            let champion = best(&population).ok_or_else(|| {
                GramevoError::Evolution(format!("Population died out in generation {}", generation))
            })?;
            history.push(champion.fitness);

            if first_solution.is_none() && self.evaluator.is_solution(champion.hits) {
                log::info!(
                    "Solution found in generation {}: {}",
                    generation,
                    champion.phenotype.as_deref().unwrap_or("<invalid>")
                );
                first_solution = Some(FirstSolution {
                    generation,
                    local_search_evaluations: local_evaluations,
                });
            }

            callback.on_generation_complete(generation, champion.fitness, population.len());
        }

        let best = best(&population)
            .cloned()
            .ok_or_else(|| GramevoError::Evolution("Population died out".to_string()))?;

        Ok(RunOutcome {
            best,
            first_solution,
            best_fitness_history: history,
            local_search_evaluations: local_evaluations,
        })
    }

    /// One generation. Returns the next population and the local-search
    /// evaluations it spent.
    pub fn step(
        &mut self,
        population: Vec<Individual>,
        generation: usize,
    ) -> Result<(Vec<Individual>, usize)> {
        if population.is_empty() {
            return Err(GramevoError::Evolution(format!(
                "Population died out before generation {}",
                generation
            )));
        }

        let mut offspring = self.breed(&population, generation);

        let context = MutationContext {
            generation,
            generations: self.config.evolution.generations,
            base_rate: self.config.evolution.mutation_rate,
            gamma: self.config.evolution.self_adaptation_gamma,
        };
        let schedule = self.config.evolution.mutation_schedule;
        let codon_size = self.config.genome.codon_size;
        let max_length = self.config.genome.max_genome_length;
        let duplication_rate = self.config.evolution.duplication_rate;

        for child in offspring.iter_mut() {
            let rate = schedule.select_rate(child, &context, &mut self.rng);
            mutate(&mut child.genome, rate, codon_size, &mut self.rng);
        }
        for child in offspring.iter_mut() {
            duplicate(&mut child.genome, duplication_rate, max_length, &mut self.rng);
        }

        self.evaluate(&mut offspring);

        let spent = if self.config.evolution.local_search {
            local_search(
                &mut offspring,
                &self.mapper,
                &self.evaluator,
                codon_size,
                &mut self.rng,
            )
        } else {
            0
        };

        if let Some(lifetimes) = &self.lifetimes {
            lifetimes.assign(&mut offspring);
        }

        let mut next = self.config.evolution.survivor_selection.select(
            offspring,
            population,
            self.config.evolution.population_size,
        );

        if let Some(lifetimes) = &self.lifetimes {
            lifetimes.age(&mut next);
            lifetimes.prune(&mut next);
        }

        Ok((next, spent))
    }

    /// Selection and crossover until the offspring target is reached
    fn breed(&mut self, population: &[Individual], generation: usize) -> Vec<Individual> {
        let evolution = &self.config.evolution;
        let target = evolution.offspring_size;
        let crossover_rate =
            evolution
                .crossover_schedule
                .rate(evolution.crossover_rate, generation, evolution.generations);

        let pool = tournament_selection(population, target, evolution.tournament_size, &mut self.rng);
        let mut offspring = Vec::with_capacity(target + 1);

        while offspring.len() < target {
            let (i, j) = if pool.len() > 1 {
                let picks = index::sample(&mut self.rng, pool.len(), 2);
                (picks.index(0), picks.index(1))
            } else {
                (0, 0)
            };
            let (parent1, parent2) = (pool[i], pool[j]);

            let (genome1, genome2) = evolution.crossover.recombine(
                &parent1.genome,
                &parent2.genome,
                crossover_rate,
                self.config.genome.max_genome_length,
                evolution.max_crossover_attempts,
                &mut self.rng,
            );

            for genome in [genome1, genome2] {
                let rate = evolution
                    .mutation_schedule
                    .initial_rate(evolution.mutation_rate, genome.len());
                offspring.push(Individual::new(genome, rate));
            }
        }

        offspring.truncate(target);
        offspring
    }

    /// Decode and score a cohort in parallel; no randomness is involved
    fn evaluate(&self, cohort: &mut [Individual]) {
        let mapper = &self.mapper;
        let evaluator = &self.evaluator;
        cohort
            .par_iter_mut()
            .for_each(|individual| evaluate_individual(individual, mapper, evaluator));
    }
}
