use crate::config::{CrossoverMethod, CrossoverSchedule};
use crate::engines::generation::{
    genome::Genome,
    individual::{is_better, Individual},
};
use rand::seq::index;
use rand::Rng;

/// Tournament selection: fill a mating pool with the best of
/// `tournament_size` distinct random candidates per draw.
///
/// The same individual may enter the pool several times. Tournaments shrink
/// to the population size when the population is smaller.
pub fn tournament_selection<'p, R: Rng>(
    population: &'p [Individual],
    pool_size: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<&'p Individual> {
    if population.is_empty() {
        return Vec::new();
    }
    let amount = tournament_size.clamp(1, population.len());

    (0..pool_size)
        .map(|_| {
            let mut candidates = index::sample(rng, population.len(), amount).into_iter();
            // `amount` >= 1, so there is always a first candidate
            let mut winner = &population[candidates.next().unwrap_or(0)];
            for idx in candidates {
                if is_better(&population[idx], winner) {
                    winner = &population[idx];
                }
            }
            winner
        })
        .collect()
}

impl CrossoverSchedule {
    /// Crossover probability for `generation` out of `generations`
    pub fn rate(&self, base_rate: f64, generation: usize, generations: usize) -> f64 {
        let progress = generation as f64 / generations.max(1) as f64;
        match self {
            CrossoverSchedule::Static => base_rate,
            CrossoverSchedule::LinearIncrease => progress,
            CrossoverSchedule::LinearDecrease => 1.0 - progress,
        }
    }
}

impl CrossoverMethod {
    pub fn recombine<R: Rng>(
        &self,
        parent1: &[u32],
        parent2: &[u32],
        crossover_rate: f64,
        max_genome_length: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> (Genome, Genome) {
        match self {
            CrossoverMethod::OnePoint => one_point_crossover(
                parent1,
                parent2,
                crossover_rate,
                max_genome_length,
                max_attempts,
                rng,
            ),
            CrossoverMethod::Uniform => uniform_crossover(parent1, parent2, crossover_rate, rng),
        }
    }
}

/// One-point crossover with an independent cut in each parent.
///
/// Children are `p1[..r1] ++ p2[r2..]` and `p2[..r2] ++ p1[r1..]`. Cuts are
/// redrawn while a child would exceed `max_genome_length`; after
/// `max_attempts` failed draws both children are copies of the parents.
pub fn one_point_crossover<R: Rng>(
    parent1: &[u32],
    parent2: &[u32],
    crossover_rate: f64,
    max_genome_length: usize,
    max_attempts: usize,
    rng: &mut R,
) -> (Genome, Genome) {
    if parent1.is_empty() || parent2.is_empty() || rng.gen::<f64>() >= crossover_rate {
        return (parent1.to_vec(), parent2.to_vec());
    }

    for _ in 0..max_attempts {
        let r1 = rng.gen_range(1..=parent1.len());
        let r2 = rng.gen_range(1..=parent2.len());

        let len1 = r1 + (parent2.len() - r2);
        let len2 = r2 + (parent1.len() - r1);
        if len1 > max_genome_length || len2 > max_genome_length {
            continue;
        }

        let mut child1 = Vec::with_capacity(len1);
        child1.extend_from_slice(&parent1[..r1]);
        child1.extend_from_slice(&parent2[r2..]);

        let mut child2 = Vec::with_capacity(len2);
        child2.extend_from_slice(&parent2[..r2]);
        child2.extend_from_slice(&parent1[r1..]);

        return (child1, child2);
    }

    log::debug!(
        "No valid cut found for parents of length {} and {} after {} attempts, copying parents",
        parent1.len(),
        parent2.len(),
        max_attempts
    );
    (parent1.to_vec(), parent2.to_vec())
}

/// Uniform crossover over variable-length parents.
///
/// One fair coin per position up to the longer parent. Heads: child1 takes
/// from parent1 and child2 from parent2; tails: the other way round. A parent
/// too short for the position contributes nothing, so children can differ in
/// length from their parents and from each other.
pub fn uniform_crossover<R: Rng>(
    parent1: &[u32],
    parent2: &[u32],
    crossover_rate: f64,
    rng: &mut R,
) -> (Genome, Genome) {
    if rng.gen::<f64>() >= crossover_rate {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let limit = parent1.len().max(parent2.len());
    let mut child1 = Vec::with_capacity(limit);
    let mut child2 = Vec::with_capacity(limit);

    for i in 0..limit {
        let (first, second) = if rng.gen::<f64>() < 0.5 {
            (parent1, parent2)
        } else {
            (parent2, parent1)
        };
        if let Some(&codon) = first.get(i) {
            child1.push(codon);
        }
        if let Some(&codon) = second.get(i) {
            child2.push(codon);
        }
    }

    (child1, child2)
}

/// Duplication: with probability `rate`, copy a random contiguous span and
/// insert it before the last codon.
///
/// Returns whether the genome changed; a result longer than
/// `max_genome_length` is discarded.
pub fn duplicate<R: Rng>(
    genome: &mut Genome,
    rate: f64,
    max_genome_length: usize,
    rng: &mut R,
) -> bool {
    if genome.is_empty() || rng.gen::<f64>() >= rate {
        return false;
    }

    let len = genome.len();
    let span = rng.gen_range(1..=len);
    let start = rng.gen_range(0..=len - span);
    if len + span > max_genome_length {
        return false;
    }

    let copy = genome[start..start + span].to_vec();
    genome.splice(len - 1..len - 1, copy);
    true
}

/// Draw a single codon in `[0, codon_size]`
pub fn random_codon<R: Rng>(codon_size: u32, rng: &mut R) -> u32 {
    rng.gen_range(0..=codon_size)
}

/// Generate random genome
pub fn random_genome<R: Rng>(length: usize, codon_size: u32, rng: &mut R) -> Genome {
    (0..length).map(|_| random_codon(codon_size, rng)).collect()
}
