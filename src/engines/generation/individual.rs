use crate::engines::generation::genome::Genome;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize)]
pub struct Individual {
    pub genome: Genome,
    pub phenotype: Option<String>, // None = not decodable
    pub fitness: f64,              // Lower is better, +inf when invalid or unevaluated
    pub hits: usize,
    pub mutation_rate: f64,        // Only evolves under self-adaptive mutation
    pub lifetime: f64,             // Only used by variable-size populations
}

impl Individual {
    pub fn new(genome: Genome, mutation_rate: f64) -> Self {
        Self {
            genome,
            phenotype: None,
            fitness: f64::INFINITY,
            hits: 0,
            mutation_rate,
            lifetime: 0.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.phenotype.is_some()
    }
}

/// Ranking order between two individuals.
///
/// `Greater` means `a` is the better one, i.e. has the *lower* fitness. All
/// selection code goes through this function so the inversion stays in one
/// place.
pub fn rank(a: &Individual, b: &Individual) -> Ordering {
    b.fitness.total_cmp(&a.fitness)
}

/// True if `a` ranks strictly above `b`
pub fn is_better(a: &Individual, b: &Individual) -> bool {
    rank(a, b) == Ordering::Greater
}

/// Index of the best individual; the first one wins ties
pub fn best_index(population: &[Individual]) -> Option<usize> {
    let mut iter = population.iter().enumerate();
    let (mut best, mut best_ind) = iter.next()?;
    for (i, ind) in iter {
        if is_better(ind, best_ind) {
            best = i;
            best_ind = ind;
        }
    }
    Some(best)
}

/// Index of the worst individual; the first one wins ties
pub fn worst_index(population: &[Individual]) -> Option<usize> {
    let mut iter = population.iter().enumerate();
    let (mut worst, mut worst_ind) = iter.next()?;
    for (i, ind) in iter {
        if is_better(worst_ind, ind) {
            worst = i;
            worst_ind = ind;
        }
    }
    Some(worst)
}

pub fn best(population: &[Individual]) -> Option<&Individual> {
    best_index(population).map(|i| &population[i])
}

/// Stable sort, best individual first
pub fn sort_best_first(population: &mut [Individual]) {
    population.sort_by(|a, b| rank(b, a));
}
