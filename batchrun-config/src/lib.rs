//! Domain-driven configuration management for batchrun
//!
//! This crate provides modular configuration split by functional domains,
//! with validation, defaults, and environment variable support. It also
//! owns the per-algorithm `.conf` properties files read by file-configured
//! experiment runs.

pub mod error;
pub mod loader;
pub mod properties;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use properties::{load_algorithm_properties, AlgorithmProperties, PROPERTIES_EXTENSION};

// Re-export domain configurations
pub use domains::{
    execution::ExecutionConfig, experiment::ExperimentConfig, logging::LoggingConfig,
    BatchRunConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
