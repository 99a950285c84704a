use crate::engines::generation::grammar::Grammar;
use crate::error::{GramevoError, Result};
use crate::types::{Production, Symbol};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const RULE_SEPARATOR: &str = "::=";

/// Reads grammars written in BNF, one rule per line:
///
/// ```text
/// <expr> ::= <expr><op><expr> | <var>
/// ```
///
/// Lines starting with `#` and blank lines are skipped. The first rule's
/// left-hand side is the start symbol.
pub struct BnfConnector;

impl BnfConnector {
    /// Load a grammar file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Grammar> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("Parsing grammar from {}", path.as_ref().display());
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Grammar> {
        let mut rules: HashMap<String, Vec<Production>> = HashMap::new();
        let mut start = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            let (lhs, rhs) = line.split_once(RULE_SEPARATOR).ok_or_else(|| GramevoError::Grammar {
                line: line_no,
                message: format!("expected '{}' in rule", RULE_SEPARATOR),
            })?;

            let lhs = lhs.trim();
            if !is_non_terminal(lhs) {
                return Err(GramevoError::Grammar {
                    line: line_no,
                    message: format!("left-hand side {:?} is not a non-terminal", lhs),
                });
            }
            if rules.contains_key(lhs) {
                return Err(GramevoError::Grammar {
                    line: line_no,
                    message: format!("rule {} is defined more than once", lhs),
                });
            }

            let productions: Vec<Production> = split_productions(rhs)
                .iter()
                .map(|p| parse_production(p.trim()))
                .collect();

            start.get_or_insert_with(|| lhs.to_string());
            rules.insert(lhs.to_string(), productions);
        }

        let start = start.ok_or_else(|| GramevoError::Grammar {
            line: 0,
            message: "grammar has no rules".to_string(),
        })?;

        let grammar = Grammar::new(start, rules)?;
        log::debug!(
            "Grammar loaded: {} non-terminals, {} terminals",
            grammar.non_terminals().len(),
            grammar.terminals().len()
        );
        Ok(grammar)
    }
}

fn is_non_terminal(text: &str) -> bool {
    text.len() > 2
        && text.starts_with('<')
        && text.ends_with('>')
        && !text.contains(char::is_whitespace)
}

/// Split on unescaped `|`. `\|` becomes a literal bar; other escapes are
/// left for the symbol pass.
fn split_productions(rhs: &str) -> Vec<String> {
    let mut productions = Vec::new();
    let mut current = String::new();
    let mut chars = rhs.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                current.push('|');
            }
            '\\' => {
                current.push('\\');
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '|' => productions.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    productions.push(current);
    productions
}

/// Length in bytes of the non-terminal starting at `rest`, if any.
///
/// Matches the shortest `<...>` with at least one non-whitespace character
/// between unescaped brackets.
fn non_terminal_len(rest: &str) -> Option<usize> {
    let mut prev = '<';
    for (offset, c) in rest.char_indices().skip(1) {
        if c.is_whitespace() {
            return None;
        }
        if c == '>' && prev != '\\' && offset > 1 {
            return Some(offset + 1);
        }
        prev = c;
    }
    None
}

fn parse_production(text: &str) -> Production {
    let mut symbols = Vec::new();
    let mut terminal = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some(escaped) = rest.strip_prefix('\\') {
            if let Some(c @ ('<' | '>')) = escaped.chars().next() {
                terminal.push(c);
                pos += 2;
                continue;
            }
        }

        if rest.starts_with('<') {
            if let Some(len) = non_terminal_len(rest) {
                if !terminal.is_empty() {
                    symbols.push(Symbol::terminal(std::mem::take(&mut terminal)));
                }
                symbols.push(Symbol::non_terminal(&rest[..len]));
                pos += len;
                continue;
            }
        }

        // `rest` is non-empty, so a char is always present
        let c = rest.chars().next().unwrap_or_default();
        terminal.push(c);
        pos += c.len_utf8();
    }

    if !terminal.is_empty() {
        symbols.push(Symbol::terminal(terminal));
    }
    symbols
}
