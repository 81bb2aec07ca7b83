use thiserror::Error;

/// Errors raised while loading or validating a `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config RON: {0}")]
    Parse(String),

    #[error("{field}: range min {min} exceeds max {max}")]
    InvertedRange { field: &'static str, min: f64, max: f64 },

    #[error("{field}: probability {value} outside [0, 1]")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("{field}: must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field}: must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field}: fraction {value} outside (0, 1]")]
    FractionOutOfRange { field: &'static str, value: f64 },
}
