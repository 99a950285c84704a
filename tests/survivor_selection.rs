use gramevo::config::{LifetimeConfig, PruneMode, SurvivorSelection};
use gramevo::engines::generation::individual::{best, Individual};
use gramevo::engines::generation::survivor::{age_based_replacement, fitness_truncation, mu_lambda_selection};
use gramevo::engines::generation::LifetimeManager;

fn population(fitness: &[f64]) -> Vec<Individual> {
    fitness
        .iter()
        .enumerate()
        .map(|(i, &f)| {
            let mut ind = Individual::new(vec![i as u32], 0.1);
            ind.fitness = f;
            ind
        })
        .collect()
}

fn fitnesses(population: &[Individual]) -> Vec<f64> {
    population.iter().map(|i| i.fitness).collect()
}

#[test]
fn test_age_based_keeps_strictly_better_champion() {
    let parents = population(&[0.5, 3.0, 4.0]);
    let offspring = population(&[2.0, 1.0, 6.0]);

    let next = age_based_replacement(offspring, &parents);

    assert_eq!(fitnesses(&next), vec![1.0, 2.0, 0.5]);
}

#[test]
fn test_age_based_tie_keeps_offspring() {
    let parents = population(&[1.0, 3.0, 4.0]);
    let offspring = population(&[2.0, 1.0, 6.0]);

    let next = age_based_replacement(offspring, &parents);

    assert_eq!(fitnesses(&next), vec![1.0, 2.0, 6.0]);
}

#[test]
fn test_age_based_never_loses_best() {
    let parents = population(&[0.1, 9.0]);
    let offspring = population(&[5.0, 7.0]);

    let next = SurvivorSelection::AgeBased.select(offspring, parents, 2);

    assert_eq!(next.len(), 2);
    assert_eq!(best(&next).map(|i| i.fitness), Some(0.1));
}

#[test]
fn test_fitness_truncation_drops_worst_parents() {
    let parents = population(&[4.0, 1.0, 3.0, 2.0]);
    let offspring = population(&[9.0, 0.5]);

    let next = fitness_truncation(offspring, parents);

    assert_eq!(fitnesses(&next), vec![1.0, 2.0, 9.0, 0.5]);
}

#[test]
fn test_fitness_truncation_with_full_replacement() {
    let parents = population(&[1.0, 2.0]);
    let offspring = population(&[5.0, 6.0]);

    let next = SurvivorSelection::FitnessTruncation.select(offspring, parents, 2);

    assert_eq!(fitnesses(&next), vec![5.0, 6.0]);
}

#[test]
fn test_mu_lambda_keeps_best_offspring_only() {
    let offspring = population(&[5.0, 1.0, 4.0, 2.0, 3.0]);

    let next = mu_lambda_selection(offspring, 3);

    assert_eq!(fitnesses(&next), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_mu_lambda_with_fewer_offspring_than_population() {
    let parents = population(&[0.0, 1.0, 2.0, 3.0, 4.0]);
    let offspring = population(&[7.0, 6.0]);

    let next = SurvivorSelection::MuLambda.select(offspring, parents, 5);

    // min(population_size, offspring) survivors, all of them offspring
    assert_eq!(next.len(), 2);
    assert_eq!(fitnesses(&next), vec![6.0, 7.0]);
}

#[test]
fn test_mu_lambda_ignores_parents() {
    let parents = population(&[0.0]);
    let offspring = population(&[2.0, 1.0]);

    let next = SurvivorSelection::MuLambda.select(offspring, parents, 1);

    assert_eq!(fitnesses(&next), vec![1.0]);
}

#[test]
fn test_invalid_individuals_rank_last() {
    let offspring = population(&[f64::INFINITY, 3.0, 1.0]);
    let next = mu_lambda_selection(offspring, 3);
    assert_eq!(fitnesses(&next), vec![1.0, 3.0, f64::INFINITY]);
}

#[test]
fn test_lifetime_cycle_shrinks_population() {
    let manager = LifetimeManager::new(&LifetimeConfig {
        enabled: true,
        min_lifetime: 1.0,
        max_lifetime: 11.0,
        prune_mode: PruneMode::Complete,
    });

    let mut cohort = population(&[1.0, 2.0, 3.0, 4.0, f64::INFINITY]);
    manager.assign(&mut cohort);

    // Worst and invalid members hold lifetime 1 and expire after one ageing step
    manager.age(&mut cohort);
    manager.prune(&mut cohort);

    assert_eq!(fitnesses(&cohort), vec![1.0, 2.0, 3.0]);
    assert_eq!(cohort[0].lifetime, 11.0);
}

#[test]
fn test_pruned_population_is_refilled_by_next_selection() {
    let manager = LifetimeManager::new(&LifetimeConfig {
        enabled: true,
        min_lifetime: 1.0,
        max_lifetime: 11.0,
        prune_mode: PruneMode::Complete,
    });

    let mut parents = population(&[1.0, 2.0, 3.0, 4.0, f64::INFINITY]);
    manager.assign(&mut parents);
    manager.age(&mut parents);
    manager.prune(&mut parents);
    assert_eq!(parents.len(), 3);

    // A full offspring cohort replaces the shrunken parents
    let offspring = population(&[5.0, 6.0, 7.0, 8.0, 9.0]);
    let next = SurvivorSelection::AgeBased.select(offspring, parents, 5);

    assert_eq!(next.len(), 5);
    assert_eq!(fitnesses(&next), vec![5.0, 6.0, 7.0, 8.0, 1.0]);
}
