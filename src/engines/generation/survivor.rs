use crate::config::SurvivorSelection;
use crate::engines::generation::individual::{best, is_better, sort_best_first, Individual};

impl SurvivorSelection {
    /// Build the next population from this generation's offspring and the
    /// current population
    pub fn select(
        &self,
        offspring: Vec<Individual>,
        population: Vec<Individual>,
        population_size: usize,
    ) -> Vec<Individual> {
        match self {
            SurvivorSelection::AgeBased => age_based_replacement(offspring, &population),
            SurvivorSelection::FitnessTruncation => fitness_truncation(offspring, population),
            SurvivorSelection::MuLambda => mu_lambda_selection(offspring, population_size),
        }
    }
}

/// Generational replacement with elitism: offspring replace the population,
/// but a strictly better parent champion takes the worst offspring slot.
pub fn age_based_replacement(mut offspring: Vec<Individual>, population: &[Individual]) -> Vec<Individual> {
    sort_best_first(&mut offspring);

    if let (Some(champion), Some(child_best)) = (best(population), offspring.first()) {
        if is_better(champion, child_best) {
            let last = offspring.len() - 1;
            offspring[last] = champion.clone();
        }
    }

    offspring
}

/// The worst parents make room for all offspring
pub fn fitness_truncation(offspring: Vec<Individual>, mut population: Vec<Individual>) -> Vec<Individual> {
    sort_best_first(&mut population);
    let keep = population.len().saturating_sub(offspring.len());
    population.truncate(keep);
    population.extend(offspring);
    population
}

/// (mu, lambda): parents are discarded, the best `population_size` offspring survive
pub fn mu_lambda_selection(mut offspring: Vec<Individual>, population_size: usize) -> Vec<Individual> {
    sort_best_first(&mut offspring);
    offspring.truncate(population_size);
    offspring
}
