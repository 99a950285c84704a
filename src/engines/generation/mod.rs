pub mod evolution_engine;
pub mod gene_consumer;
pub mod genome;
pub mod grammar;
pub mod grammar_mapper;
pub mod individual;
pub mod lifetime;
pub mod local_search;
pub mod mutation;
pub mod operators;
pub mod progress;
pub mod repair;
pub mod survivor;

pub use evolution_engine::{EngineConfig, EvolutionEngine, FirstSolution, ProgressCallback, RunOutcome};
pub use gene_consumer::GeneConsumer;
pub use genome::Genome;
pub use grammar::Grammar;
pub use grammar_mapper::{Derivation, GrammarMapper};
pub use individual::Individual;
pub use lifetime::LifetimeManager;
pub use progress::{ConsoleProgressCallback, SilentProgressCallback};
pub use repair::{ArithmeticRepair, FallbackResolver};
