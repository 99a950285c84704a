use crate::config::GenomeConfig;
use crate::engines::generation::{
    gene_consumer::GeneConsumer,
    grammar::Grammar,
    repair::{repair, ArithmeticRepair, FallbackResolver},
};
use crate::types::{Symbol, SymbolKind};
use std::collections::VecDeque;
use std::sync::Arc;

/// Outcome of mapping one genome, with the bookkeeping needed to trace it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    /// `None` when the genome could not be decoded
    pub phenotype: Option<String>,
    pub used_codons: usize,
    pub wraps: usize,
    pub repaired: bool,
}

impl Derivation {
    fn invalid() -> Self {
        Self {
            phenotype: None,
            used_codons: 0,
            wraps: 0,
            repaired: false,
        }
    }
}

pub struct GrammarMapper {
    grammar: Arc<Grammar>,
    max_wraps: usize,
    fallback: Option<Box<dyn FallbackResolver>>,
}

impl GrammarMapper {
    /// Mapper without repair: incomplete derivations are invalid
    pub fn new(grammar: Arc<Grammar>, max_wraps: usize) -> Self {
        Self {
            grammar,
            max_wraps,
            fallback: None,
        }
    }

    /// Mapper configured from the genome section, using `ArithmeticRepair`
    /// when repair is enabled
    pub fn from_config(grammar: Arc<Grammar>, config: &GenomeConfig) -> Self {
        let mapper = Self::new(grammar, config.max_wraps);
        if config.repair {
            mapper.with_fallback(Box::new(ArithmeticRepair))
        } else {
            mapper
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn FallbackResolver>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Main entry point: phenotype of a genome, `None` if invalid
    pub fn decode(&self, genome: &[u32]) -> Option<String> {
        self.derive(genome).phenotype
    }

    /// Expand the start symbol leftmost-first, reading one codon per
    /// non-terminal that has more than one alternative.
    pub fn derive(&self, genome: &[u32]) -> Derivation {
        if genome.is_empty() {
            return Derivation::invalid();
        }

        let mut consumer = GeneConsumer::new(genome);
        let mut wraps = 0;
        let mut output = String::new();
        let mut pending: VecDeque<&Symbol> = VecDeque::new();
        pending.push_back(self.grammar.start_symbol());
        // Alternatives of the most recently expanded non-terminal
        let mut last_choices = 0;

        while wraps <= self.max_wraps && !pending.is_empty() {
            // Checked on every iteration, terminals included
            if consumer.at_wrap_boundary() && last_choices > 1 {
                wraps += 1;
            }

            let Some(symbol) = pending.pop_front() else {
                break;
            };

            match symbol.kind {
                SymbolKind::Terminal => output.push_str(&symbol.text),
                SymbolKind::NonTerminal => {
                    let Some(choices) = self.grammar.rules_for(&symbol.text) else {
                        return Derivation::invalid();
                    };
                    last_choices = choices.len();
                    let index = consumer.choose(choices.len());
                    for next in choices[index].iter().rev() {
                        pending.push_front(next);
                    }
                }
            }
        }

        if pending.is_empty() {
            return Derivation {
                phenotype: Some(output),
                used_codons: consumer.used(),
                wraps,
                repaired: false,
            };
        }

        let phenotype = self
            .fallback
            .as_deref()
            .and_then(|fallback| repair(fallback, &self.grammar, output, pending, genome));
        let repaired = phenotype.is_some();
        if !repaired {
            log::trace!("Genome {:?} ran out of wraps", genome);
        }

        Derivation {
            phenotype,
            used_codons: consumer.used(),
            wraps,
            repaired,
        }
    }
}
