use thiserror::Error;

#[derive(Error, Debug)]
pub enum GramevoError {
    #[error("Grammar error on line {line}: {message}")]
    Grammar { line: usize, message: String },

    #[error("Undefined non-terminal {0} referenced in grammar")]
    UndefinedSymbol(String),

    #[error("Evolution error: {0}")]
    Evolution(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GramevoError>;
