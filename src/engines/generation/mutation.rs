use crate::config::MutationSchedule;
use crate::engines::generation::{individual::Individual, operators::random_codon};
use rand::Rng;

/// Generation-dependent inputs of the mutation schedules
#[derive(Debug, Clone, Copy)]
pub struct MutationContext {
    pub generation: usize,
    pub generations: usize,
    pub base_rate: f64,
    pub gamma: f64,
}

impl MutationSchedule {
    /// Rate carried by a newly created individual
    pub fn initial_rate(&self, base_rate: f64, genome_length: usize) -> f64 {
        match self {
            MutationSchedule::SelfAdaptive => 1.0 / genome_length.max(1) as f64,
            _ => base_rate,
        }
    }

    /// Mutation probability for `individual` in the current generation.
    ///
    /// Under self-adaptation the individual's stored rate is evolved first
    /// and written back.
    pub fn select_rate<R: Rng>(
        &self,
        individual: &mut Individual,
        context: &MutationContext,
        rng: &mut R,
    ) -> f64 {
        let progress = context.generation as f64 / context.generations.max(1) as f64;
        match self {
            MutationSchedule::Static => context.base_rate,
            MutationSchedule::SelfAdaptive => {
                individual.mutation_rate = evolve_mutation_rate(
                    individual.mutation_rate,
                    individual.genome.len(),
                    context.gamma,
                    rng,
                );
                individual.mutation_rate
            }
            MutationSchedule::LinearIncrease => progress,
            MutationSchedule::LinearDecrease => 1.0 - progress,
            MutationSchedule::BackSchutz => back_schutz_rate(
                individual.genome.len(),
                context.generation,
                context.generations,
            ),
        }
    }
}

/// Logistic self-adaptive update, floored at `1 / genome_length`
pub fn evolve_mutation_rate<R: Rng>(
    current: f64,
    genome_length: usize,
    gamma: f64,
    rng: &mut R,
) -> f64 {
    let floor = 1.0 / genome_length.max(1) as f64;
    let odds = (1.0 - current) / current;
    let updated = 1.0 / (1.0 + odds * (gamma * rng.gen::<f64>()).exp());

    // A zero rate has infinite odds and collapses to 0; NaN fails the comparison
    if updated >= floor {
        updated
    } else {
        floor
    }
}

/// Deterministic schedule `1 / (2 + (L - 2) / (T - 1) * t)`
pub fn back_schutz_rate(genome_length: usize, generation: usize, generations: usize) -> f64 {
    let slope = if generations > 1 {
        (genome_length as f64 - 2.0) / (generations as f64 - 1.0)
    } else {
        0.0
    };
    1.0 / (2.0 + slope * generation as f64)
}

/// Random resetting: resample each codon with probability `rate`
pub fn mutate<R: Rng>(genome: &mut [u32], rate: f64, codon_size: u32, rng: &mut R) {
    for codon in genome.iter_mut() {
        if rng.gen::<f64>() < rate {
            *codon = random_codon(codon_size, rng);
        }
    }
}
