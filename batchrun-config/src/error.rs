//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading configuration file
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Validation error
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// Domain-specific configuration error
    #[error("Domain configuration error in {domain}: {message}")]
    DomainError { domain: String, message: String },

    /// Algorithm properties file does not exist
    #[error("Properties file not found: {}", path.display())]
    PropertiesNotFound { path: PathBuf },

    /// Algorithm properties file has a line that is not `key=value`
    #[error("Malformed properties in {} at line {line}: '{content}'", path.display())]
    MalformedProperties {
        path: PathBuf,
        line: usize,
        content: String,
    },
}
