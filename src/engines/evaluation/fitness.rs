use crate::config::FitnessConfig;
use crate::engines::evaluation::{
    expression::{evaluate, ExpressionError},
    objective::Objective,
};
use crate::engines::generation::{grammar_mapper::GrammarMapper, individual::Individual};
use crate::error::{GramevoError, Result};

/// Fitness and hit count of one phenotype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub fitness: f64,
    pub hits: usize,
}

/// Scores phenotypes against a search objective.
///
/// Must never fail: numeric problems are reported through a sentinel
/// fitness. Implementations are shared across evaluation threads.
pub trait FitnessEvaluator: Sync {
    fn evaluate(&self, phenotype: &str) -> Evaluation;

    /// Hit count that marks a full solution
    fn solution_hits(&self) -> usize;

    fn is_solution(&self, hits: usize) -> bool {
        hits == self.solution_hits()
    }
}

/// Rewrite grammar function names into evaluator syntax
pub fn to_expression(phenotype: &str) -> String {
    phenotype.replace("inv", "1/")
}

/// Store a phenotype and its evaluation on an individual
pub fn apply_evaluation(individual: &mut Individual, phenotype: Option<String>, evaluation: Evaluation) {
    individual.phenotype = phenotype;
    individual.fitness = evaluation.fitness;
    individual.hits = evaluation.hits;
}

/// Decode and score an individual; undecodable genomes get infinite fitness
pub fn evaluate_individual<E>(individual: &mut Individual, mapper: &GrammarMapper, evaluator: &E)
where
    E: FitnessEvaluator + ?Sized,
{
    match mapper.decode(&individual.genome) {
        Some(phenotype) => {
            let evaluation = evaluator.evaluate(&phenotype);
            apply_evaluation(individual, Some(phenotype), evaluation);
        }
        None => apply_evaluation(
            individual,
            None,
            Evaluation {
                fitness: f64::INFINITY,
                hits: 0,
            },
        ),
    }
}

/// Scores how well a phenotype reproduces the derivative of the objective.
///
/// The interval is split into `samples` steps and all `samples + 1` points
/// are checked against a forward-difference estimate of the target's slope.
/// Errors within tolerance count as hits and are weighted lightly, the rest
/// heavily. Fitness is the mean weighted error.
pub struct DerivativeFitness {
    objective: Objective,
    config: FitnessConfig,
    /// (x, estimated slope) per sample point
    slopes: Vec<(f64, f64)>,
}

impl DerivativeFitness {
    pub fn new(objective: Objective, config: FitnessConfig) -> Result<Self> {
        let delta = (objective.upper - objective.lower) / config.samples as f64;

        let slopes = (0..=config.samples)
            .map(|i| -> std::result::Result<(f64, f64), ExpressionError> {
                let x = objective.lower + i as f64 * delta;
                let slope = (evaluate(&objective.target, x + config.step)?
                    - evaluate(&objective.target, x)?)
                    / config.step;
                Ok((x, slope))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                GramevoError::Configuration(format!(
                    "Objective {} cannot be sampled: {}",
                    objective.name, e
                ))
            })?;

        Ok(Self {
            objective,
            config,
            slopes,
        })
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    fn failure(&self) -> Evaluation {
        Evaluation {
            fitness: self.config.failure_fitness,
            hits: 0,
        }
    }
}

impl FitnessEvaluator for DerivativeFitness {
    fn evaluate(&self, phenotype: &str) -> Evaluation {
        let expression = to_expression(phenotype);
        let mut weighted = 0.0;
        let mut hits = 0;

        for &(x, slope) in &self.slopes {
            let error = match evaluate(&expression, x) {
                Ok(value) => (slope - value).abs(),
                Err(_) => return self.failure(),
            };
            if !error.is_finite() {
                return self.failure();
            }

            if error <= self.config.tolerance {
                hits += 1;
                weighted += self.config.hit_weight * error;
            } else {
                weighted += self.config.miss_weight * error;
            }
        }

        Evaluation {
            fitness: weighted / self.slopes.len() as f64,
            hits,
        }
    }

    fn solution_hits(&self) -> usize {
        self.slopes.len()
    }
}
