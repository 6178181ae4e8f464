use thiserror::Error;

/// Rejected configuration values. Raised once, at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tick rate must be at least 1 tick per second")]
    ZeroTickRate,

    #[error("mass must be positive and finite, got {0}")]
    NonPositiveMass(f64),

    #[error("invalid parameter '{name}': {value} (must be finite and non-negative)")]
    NegativeParameter { name: &'static str, value: f64 },

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
