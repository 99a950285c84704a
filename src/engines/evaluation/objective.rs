use crate::error::{GramevoError, Result};
use serde::{Deserialize, Serialize};

/// Target of a search: a closed-form function whose derivative is to be
/// approximated over an interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub name: String,
    /// Function of `X` in expression syntax
    pub target: String,
    pub lower: f64,
    pub upper: f64,
    /// Known derivative, for reporting only
    pub derivative: Option<String>,
}

impl Objective {
    pub fn new(name: impl Into<String>, target: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            lower,
            upper,
            derivative: None,
        }
    }

    pub fn with_derivative(mut self, derivative: impl Into<String>) -> Self {
        self.derivative = Some(derivative.into());
        self
    }
}

/// Built-in benchmark problems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Benchmark {
    Cubic,
    Rational,
    Polynomial,
    Gaussian,
    ExpSum,
    LogProduct,
    ExpSine,
}

impl Benchmark {
    pub const ALL: [Benchmark; 7] = [
        Benchmark::Cubic,
        Benchmark::Rational,
        Benchmark::Polynomial,
        Benchmark::Gaussian,
        Benchmark::ExpSum,
        Benchmark::LogProduct,
        Benchmark::ExpSine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Benchmark::Cubic => "cubic",
            Benchmark::Rational => "rational",
            Benchmark::Polynomial => "polynomial",
            Benchmark::Gaussian => "gaussian",
            Benchmark::ExpSum => "exp-sum",
            Benchmark::LogProduct => "log-product",
            Benchmark::ExpSine => "exp-sine",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name().eq_ignore_ascii_case(name))
    }

    pub fn objective(&self) -> Objective {
        let (target, lower, upper, derivative) = match self {
            Benchmark::Cubic => ("X ** 3 + 8", 0.0, 5.0, "3 * (X ** 2)"),
            Benchmark::Rational => ("(X-2)/(X+2)", 0.0, 5.0, "4 / ((X + 2) ** 2)"),
            Benchmark::Polynomial => (
                "(1/5)*(X ** 2 + 1)*(X - 1)",
                -2.0,
                2.0,
                "(1/5)*(3 * (X ** 2) - (2 * X) + 1)",
            ),
            Benchmark::Gaussian => (
                "-exp(-2 * (X ** 2) + 2)",
                0.0,
                3.0,
                "4 * X * exp(-2*(X ** 2) + 2)",
            ),
            Benchmark::ExpSum => (
                "(exp(2*X) + exp(-6*X))/2",
                0.0,
                2.0,
                "exp(2*X) - 3*exp(-6*X)",
            ),
            Benchmark::LogProduct => (
                "X * ln(1 + 2*X)",
                0.0,
                5.0,
                "ln(1+(2*X)) + (2*X)/(1 + (2*X))",
            ),
            Benchmark::ExpSine => (
                "exp(2*X)*sin(X)",
                -2.0,
                2.0,
                "exp(2*X)*(2*sin(X)+cos(X))",
            ),
        };
        Objective::new(self.name(), target, lower, upper).with_derivative(derivative)
    }
}

/// Objectives for an experiment: the named benchmarks followed by the custom
/// ones. With neither given, every built-in benchmark is used.
pub fn resolve_objectives(benchmarks: &[String], custom: &[Objective]) -> Result<Vec<Objective>> {
    if benchmarks.is_empty() && custom.is_empty() {
        return Ok(Benchmark::ALL.iter().map(Benchmark::objective).collect());
    }

    let mut objectives = benchmarks
        .iter()
        .map(|name| {
            Benchmark::from_name(name)
                .map(|b| b.objective())
                .ok_or_else(|| GramevoError::Configuration(format!("Unknown benchmark {}", name)))
        })
        .collect::<Result<Vec<_>>>()?;
    objectives.extend(custom.iter().cloned());
    Ok(objectives)
}
