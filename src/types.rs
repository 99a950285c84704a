use serde::{Deserialize, Serialize};

/// Classification of a grammar symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Terminal,    // Literal text emitted into the phenotype
    NonTerminal, // `<name>`, expanded through a rule
}

/// One symbol of a production, with its text as written in the grammar
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub text: String,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn terminal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SymbolKind::Terminal,
        }
    }

    pub fn non_terminal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SymbolKind::NonTerminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }
}

/// Ordered symbol sequence on the right-hand side of a rule
pub type Production = Vec<Symbol>;
