use crate::engines::evaluation::fitness::{apply_evaluation, FitnessEvaluator};
use crate::engines::generation::{
    grammar_mapper::GrammarMapper,
    individual::{best_index, worst_index, Individual},
    operators::random_codon,
};
use rand::Rng;

/// First-improvement hill climb around the best offspring.
///
/// Each codon of the best individual is resampled in turn on a copy. The
/// first copy with strictly lower fitness replaces the worst offspring and
/// ends the search. Copies that do not decode are skipped and not counted.
///
/// Returns the number of fitness evaluations spent.
pub fn local_search<E, R>(
    offspring: &mut [Individual],
    mapper: &GrammarMapper,
    evaluator: &E,
    codon_size: u32,
    rng: &mut R,
) -> usize
where
    E: FitnessEvaluator + ?Sized,
    R: Rng,
{
    let Some(best_idx) = best_index(offspring) else {
        return 0;
    };
    let best = offspring[best_idx].clone();
    let mut evaluations = 0;

    for position in 0..best.genome.len() {
        let mut neighbour = best.clone();
        neighbour.genome[position] = random_codon(codon_size, rng);

        let Some(phenotype) = mapper.decode(&neighbour.genome) else {
            continue;
        };
        let evaluation = evaluator.evaluate(&phenotype);
        apply_evaluation(&mut neighbour, Some(phenotype), evaluation);
        evaluations += 1;

        if neighbour.fitness < best.fitness {
            log::trace!(
                "Local search improved {:.6} -> {:.6} at codon {}",
                best.fitness,
                neighbour.fitness,
                position
            );
            if let Some(worst_idx) = worst_index(offspring) {
                offspring[worst_idx] = neighbour;
            }
            break;
        }
    }

    evaluations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BnfConnector;
    use crate::engines::evaluation::fitness::Evaluation;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fitness is the number of `b`s in the phenotype
    #[derive(Default)]
    struct CountB {
        calls: AtomicUsize,
    }

    impl FitnessEvaluator for CountB {
        fn evaluate(&self, phenotype: &str) -> Evaluation {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Evaluation {
                fitness: phenotype.matches('b').count() as f64,
                hits: 0,
            }
        }

        fn solution_hits(&self) -> usize {
            1
        }
    }

    fn mapper(bnf: &str, max_wraps: usize) -> GrammarMapper {
        GrammarMapper::new(Arc::new(BnfConnector::parse(bnf).unwrap()), max_wraps)
    }

    fn with_fitness(genome: Vec<u32>, fitness: f64) -> Individual {
        let mut ind = Individual::new(genome, 0.1);
        ind.fitness = fitness;
        ind
    }

    #[test]
    fn test_first_strict_improvement_replaces_worst() {
        let mapper = mapper("<s> ::= <t><t>\n<t> ::= a | b\n", 2);
        let evaluator = CountB::default();
        // codon_size 0 resamples every codon to 0
        let mut rng = StdRng::seed_from_u64(1);
        let mut offspring = vec![
            with_fitness(vec![0, 1, 1], 1.0), // "ab"
            with_fitness(vec![1, 1], 5.0),
            with_fitness(vec![1, 1], 9.0),
            with_fitness(vec![1, 1], 3.0),
        ];

        let evaluations = local_search(&mut offspring, &mapper, &evaluator, 0, &mut rng);

        // Codon 0 -> "ab" again (not strictly better), codon 1 -> "aa"; codon 2 is never tried
        assert_eq!(evaluations, 2);
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 2);

        let fitness: Vec<f64> = offspring.iter().map(|i| i.fitness).collect();
        assert_eq!(fitness, vec![1.0, 5.0, 0.0, 3.0]);
        assert_eq!(offspring[2].genome, vec![0, 0, 1]);
        assert_eq!(offspring[2].phenotype.as_deref(), Some("aa"));
        // The searched individual itself is untouched
        assert_eq!(offspring[0].genome, vec![0, 1, 1]);
    }

    #[test]
    fn test_undecodable_neighbours_are_not_counted() {
        // Without repair, [0] expands <s><s> until the wrap budget runs out
        let mapper = mapper("<s> ::= <s><s> | a\n", 0);
        assert_eq!(mapper.decode(&[1]).as_deref(), Some("a"));
        assert_eq!(mapper.decode(&[0]), None);

        let evaluator = CountB::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut offspring = vec![with_fitness(vec![1], 1.0), with_fitness(vec![1], 4.0)];

        let evaluations = local_search(&mut offspring, &mapper, &evaluator, 0, &mut rng);

        assert_eq!(evaluations, 0);
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 0);
        let fitness: Vec<f64> = offspring.iter().map(|i| i.fitness).collect();
        assert_eq!(fitness, vec![1.0, 4.0]);
    }

    #[test]
    fn test_no_improvement_leaves_offspring_unchanged() {
        let mapper = mapper("<s> ::= <t><t>\n<t> ::= a | b\n", 2);
        let evaluator = CountB::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut offspring = vec![with_fitness(vec![0, 0], 0.0), with_fitness(vec![1, 1], 2.0)];

        let evaluations = local_search(&mut offspring, &mapper, &evaluator, 0, &mut rng);

        assert_eq!(evaluations, 2);
        assert_eq!(offspring[1].genome, vec![1, 1]);
        assert_eq!(offspring[1].fitness, 2.0);
    }

    #[test]
    fn test_empty_offspring() {
        let mapper = mapper("<s> ::= a\n", 0);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(local_search(&mut [], &mapper, &CountB::default(), 255, &mut rng), 0);
    }
}
