use crate::config::{LifetimeConfig, PruneMode};
use crate::engines::generation::individual::{sort_best_first, Individual};

/// Lifetime bookkeeping for variable-size populations
#[derive(Debug, Clone)]
pub struct LifetimeManager {
    min_lifetime: f64,
    max_lifetime: f64,
    eta: f64,
    prune_mode: PruneMode,
}

impl LifetimeManager {
    pub fn new(config: &LifetimeConfig) -> Self {
        Self {
            min_lifetime: config.min_lifetime,
            max_lifetime: config.max_lifetime,
            eta: config.eta(),
            prune_mode: config.prune_mode,
        }
    }

    /// Bi-linear lifetime allocation over a freshly evaluated cohort.
    ///
    /// Average, best and worst fitness are taken over the finite members;
    /// members with infinite fitness live for one generation. At or below
    /// average quality the lifetime runs from `min` (worst) up to the
    /// midpoint; above average it runs from the midpoint up to `max` (best).
    pub fn assign(&self, cohort: &mut [Individual]) {
        let finite: Vec<f64> = cohort
            .iter()
            .map(|ind| ind.fitness)
            .filter(|f| f.is_finite())
            .collect();

        if finite.is_empty() {
            cohort.iter_mut().for_each(|ind| ind.lifetime = 1.0);
            return;
        }

        let average = finite.iter().sum::<f64>() / finite.len() as f64;
        let best = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let worst = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let midpoint = 0.5 * (self.min_lifetime + self.max_lifetime);

        for ind in cohort.iter_mut() {
            let f = ind.fitness;
            ind.lifetime = if !f.is_finite() {
                1.0
            } else if f >= average {
                if worst == average {
                    self.max_lifetime
                } else {
                    self.min_lifetime + self.eta * (worst - f) / (worst - average)
                }
            } else {
                midpoint + self.eta * (average - f) / (average - best)
            };
        }
    }

    /// One generation passes: everyone but the current best loses a unit of lifetime
    pub fn age(&self, population: &mut [Individual]) {
        sort_best_first(population);
        for ind in population.iter_mut().skip(1) {
            ind.lifetime -= 1.0;
        }
    }

    /// Remove individuals whose lifetime ran out, leaving the survivors best-first
    pub fn prune(&self, population: &mut Vec<Individual>) {
        let before = population.len();
        match self.prune_mode {
            PruneMode::Complete => population.retain(|ind| ind.lifetime > 0.0),
            PruneMode::Sequential => {
                let mut i = 0;
                while i < population.len() {
                    if population[i].lifetime <= 0.0 {
                        population.remove(i);
                        // The next individual slid into slot i and is not inspected
                    }
                    i += 1;
                }
            }
        }
        sort_best_first(population);

        if population.len() != before {
            log::debug!("Lifetime expiry removed {} individuals", before - population.len());
        }
    }
}
