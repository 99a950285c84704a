pub mod expression;
pub mod fitness;
pub mod objective;

pub use expression::{evaluate, ExpressionError};
pub use fitness::{DerivativeFitness, Evaluation, FitnessEvaluator};
pub use objective::{resolve_objectives, Benchmark, Objective};
