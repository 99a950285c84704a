use gramevo::data::BnfConnector;
use gramevo::engines::generation::{ArithmeticRepair, Grammar, GrammarMapper};
use proptest::prelude::*;
use std::sync::Arc;

const SMALL_GRAMMAR: &str = "\
<e> ::= <e><op><e> | <v>
<op> ::= + | -
<v> ::= x | 1
";

const ARITHMETIC_GRAMMAR: &str = "\
<expr> ::= <expr><op><expr> | (<expr><op><expr>) | <pre-op>(<expr>) | <var>
<op> ::= + | - | * | /
<pre-op> ::= sin | cos | exp | ln | inv
<var> ::= X | 1.0 | 2.0
";

fn grammar(text: &str) -> Arc<Grammar> {
    Arc::new(BnfConnector::parse(text).unwrap())
}

#[test]
fn test_short_derivation_completes() {
    let mapper = GrammarMapper::new(grammar(SMALL_GRAMMAR), 2);
    let derivation = mapper.derive(&[3, 0, 5]);

    assert_eq!(derivation.phenotype.as_deref(), Some("x"));
    assert_eq!(derivation.used_codons, 2);
    assert_eq!(derivation.wraps, 0);
    assert!(!derivation.repaired);
}

#[test]
fn test_pending_terminal_is_repaired() {
    let mapper = GrammarMapper::new(grammar(SMALL_GRAMMAR), 2).with_fallback(Box::new(ArithmeticRepair));
    let derivation = mapper.derive(&[2, 0, 5]);

    assert_eq!(derivation.phenotype.as_deref(), Some("x+x+x"));
    assert_eq!(derivation.wraps, 3);
    assert!(derivation.repaired);
}

#[test]
fn test_out_of_wraps_is_invalid_without_repair() {
    let mapper = GrammarMapper::new(grammar(SMALL_GRAMMAR), 2);
    assert_eq!(mapper.decode(&[2, 0, 5]), None);
}

#[test]
fn test_repair_of_unknown_non_terminal_is_invalid() {
    // <e> is not one of the arithmetic repair symbols
    let mapper = GrammarMapper::new(grammar(SMALL_GRAMMAR), 0).with_fallback(Box::new(ArithmeticRepair));
    assert_eq!(mapper.decode(&[0]), None);
}

#[test]
fn test_arithmetic_repair_reads_fixed_codons() {
    // Wraps out with <expr><op><expr><op><expr> pending
    let mapper = GrammarMapper::new(grammar(ARITHMETIC_GRAMMAR), 0).with_fallback(Box::new(ArithmeticRepair));
    let derivation = mapper.derive(&[0]);

    // Every repair index clamps to codon 0: <expr> -> X, <op> -> +
    assert_eq!(derivation.phenotype.as_deref(), Some("X+X+X"));
    assert_eq!(derivation.wraps, 1);
    assert!(derivation.repaired);
}

#[test]
fn test_empty_genome_is_invalid() {
    let mapper = GrammarMapper::new(grammar(SMALL_GRAMMAR), 2).with_fallback(Box::new(ArithmeticRepair));
    assert_eq!(mapper.decode(&[]), None);
}

#[test]
fn test_codons_are_taken_modulo_choices() {
    let mapper = GrammarMapper::new(grammar(ARITHMETIC_GRAMMAR), 2);
    // 3 % 4 -> <var>, 255 % 3 == 0 -> X
    assert_eq!(mapper.decode(&[3, 255]).as_deref(), Some("X"));
    // 2 % 4 -> <pre-op>(<expr>), 4 % 5 -> inv, 7 % 4 -> <var>, 2 -> 2.0
    assert_eq!(mapper.decode(&[2, 4, 7, 2]).as_deref(), Some("inv(2.0)"));
}

proptest! {
    #[test]
    fn decoding_is_deterministic(genome in prop::collection::vec(0u32..=255, 0..30)) {
        let mapper = GrammarMapper::new(grammar(ARITHMETIC_GRAMMAR), 2).with_fallback(Box::new(ArithmeticRepair));
        prop_assert_eq!(mapper.derive(&genome), mapper.derive(&genome));
    }

    #[test]
    fn repaired_arithmetic_genomes_always_decode(genome in prop::collection::vec(0u32..=255, 1..30)) {
        let mapper = GrammarMapper::new(grammar(ARITHMETIC_GRAMMAR), 2).with_fallback(Box::new(ArithmeticRepair));
        let phenotype = mapper.decode(&genome);
        prop_assert!(phenotype.is_some());
        prop_assert!(!phenotype.unwrap_or_default().contains('<'));
    }

    #[test]
    fn wrap_count_is_bounded(
        genome in prop::collection::vec(0u32..=255, 1..30),
        max_wraps in 0usize..4,
    ) {
        let mapper = GrammarMapper::new(grammar(ARITHMETIC_GRAMMAR), max_wraps);
        let derivation = mapper.derive(&genome);
        prop_assert!(derivation.wraps <= max_wraps + 1);
    }
}
