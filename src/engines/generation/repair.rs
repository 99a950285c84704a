//! Deterministic completion of derivations that ran out of wraps.
//!
//! Repair never reads codons relative to where decoding stopped. Each pending
//! non-terminal is resolved from a fixed codon of the full genome, so the
//! same genome always repairs to the same phenotype.

use super::grammar::Grammar;
use crate::types::Symbol;

/// Resolves a pending non-terminal straight to terminal text.
///
/// Implementations supply the repair mapping for one grammar family. Repair
/// is only total for grammars the resolver covers: a pending non-terminal
/// it has no mapping for makes the whole phenotype invalid, so a mapper
/// with a fallback can still return `None` for grammars outside that family.
pub trait FallbackResolver: Send + Sync {
    /// Text to emit for `non_terminal`, or `None` when the resolver has no
    /// mapping for it
    fn resolve<'g>(&self, grammar: &'g Grammar, non_terminal: &str, genome: &[u32]) -> Option<&'g str>;
}

/// Repair mapping for arithmetic expression grammars built from the
/// `<expr>`, `<op>`, `<pre-op>` and `<var>` non-terminals.
///
/// | pending    | rule used  | codon index |
/// |------------|------------|-------------|
/// | `<expr>`   | `<var>`    | 0           |
/// | `<op>`     | `<op>`     | 1           |
/// | `<pre-op>` | `<pre-op>` | 2           |
/// | `<var>`    | `<var>`    | 3           |
///
/// Indices past the end of the genome fall back to its last codon. The first
/// symbol of the selected production is emitted as is, one level deep, so the
/// reserved rules must produce single terminals. Grammars outside this family
/// need their own resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticRepair;

impl FallbackResolver for ArithmeticRepair {
    fn resolve<'g>(&self, grammar: &'g Grammar, non_terminal: &str, genome: &[u32]) -> Option<&'g str> {
        let (rule, codon_index) = match non_terminal {
            "<expr>" => ("<var>", 0),
            "<op>" => ("<op>", 1),
            "<pre-op>" => ("<pre-op>", 2),
            "<var>" => ("<var>", 3),
            _ => return None,
        };

        let last = genome.len().checked_sub(1)?;
        let codon = genome[codon_index.min(last)] as usize;
        let choices = grammar.rules_for(rule)?;
        let production = &choices[codon.checked_rem(choices.len())?];

        production.first().map(|symbol| symbol.text.as_str())
    }
}

/// Finish a derivation: pending terminals are emitted unchanged, pending
/// non-terminals go through the resolver.
///
/// Returns `None` if any non-terminal cannot be resolved.
pub fn repair<'g, I>(
    resolver: &dyn FallbackResolver,
    grammar: &'g Grammar,
    mut output: String,
    pending: I,
    genome: &[u32],
) -> Option<String>
where
    I: IntoIterator<Item = &'g Symbol>,
{
    for symbol in pending {
        if symbol.is_terminal() {
            output.push_str(&symbol.text);
        } else {
            let text = resolver.resolve(grammar, &symbol.text, genome)?;
            output.push_str(text);
        }
    }
    Some(output)
}
