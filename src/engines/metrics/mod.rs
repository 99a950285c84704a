pub mod report;
pub mod statistics;

pub use report::ExperimentReport;
pub use statistics::{BenchmarkSummary, RunRecord};
