//! Grammatical evolution for symbolic regression of derivatives.
//!
//! Genomes of integer codons are mapped through a BNF grammar into
//! expressions, which are scored against a target and evolved.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use error::{GramevoError, Result};
