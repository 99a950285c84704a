use crate::error::{GramevoError, Result};
use crate::types::{Production, Symbol, SymbolKind};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Context-free grammar used by the genotype-to-phenotype mapping.
///
/// Immutable once built. Every non-terminal referenced by a production has a
/// rule with at least one production.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: HashMap<String, Vec<Production>>,
    start: Symbol,
}

impl Grammar {
    pub fn new(start: impl Into<String>, rules: HashMap<String, Vec<Production>>) -> Result<Self> {
        let start = Symbol::non_terminal(start);

        if !rules.contains_key(&start.text) {
            return Err(GramevoError::UndefinedSymbol(start.text));
        }

        for (lhs, productions) in &rules {
            if productions.is_empty() {
                return Err(GramevoError::Grammar {
                    line: 0,
                    message: format!("rule {} has no productions", lhs),
                });
            }

            let undefined = productions
                .iter()
                .flatten()
                .find(|s| s.kind == SymbolKind::NonTerminal && !rules.contains_key(&s.text));
            if let Some(symbol) = undefined {
                return Err(GramevoError::UndefinedSymbol(symbol.text.clone()));
            }
        }

        Ok(Self { rules, start })
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start
    }

    /// Production alternatives of a non-terminal
    pub fn rules_for(&self, non_terminal: &str) -> Option<&[Production]> {
        self.rules.get(non_terminal).map(Vec::as_slice)
    }

    pub fn non_terminals(&self) -> BTreeSet<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    pub fn terminals(&self) -> BTreeSet<&str> {
        self.rules
            .values()
            .flatten()
            .flatten()
            .filter(|s| s.is_terminal())
            .map(|s| s.text.as_str())
            .collect()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Start rule first, the rest alphabetically
        let mut names: Vec<&str> = self.non_terminals().into_iter().collect();
        names.sort_by_key(|name| *name != self.start.text);

        for name in names {
            let productions = &self.rules[name];
            let rendered: Vec<String> = productions
                .iter()
                .map(|p| p.iter().map(|s| s.text.as_str()).collect())
                .collect();
            writeln!(f, "{} ::= {}", name, rendered.join(" | "))?;
        }
        Ok(())
    }
}
