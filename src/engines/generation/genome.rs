/// Genome representation for grammatical evolution
///
/// A genome is a sequence of codons. Each codon (u32 value, bounded by the
/// configured codon size) is consumed by the `GrammarMapper` to pick one
/// production among the alternatives of the non-terminal being expanded.
///
/// # Variation
///
/// All operators work on the raw codon sequence:
/// - **Crossover**: cutting and splicing two integer sequences
/// - **Mutation**: resampling individual codons
/// - **Duplication**: copying a span of codons inside the sequence
///
/// # Conversion
///
/// Use `GrammarMapper::decode()` to convert Genome -> phenotype string
///
/// # Example
///
/// ```
/// let genome: gramevo::engines::generation::Genome = vec![3, 0, 5];
/// // With `<e> ::= <e><op><e> | <v>` and `<v> ::= x | 1` this maps to "x"
/// assert_eq!(genome.len(), 3);
/// ```
pub type Genome = Vec<u32>;
