//! Error types for batch execution
//!
//! Two layers: [`ExecutionError`] is returned by executor calls and aborts
//! that call; [`TaskError`] is captured into a single task's outcome and
//! never crosses the `execute` boundary.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use batchrun_config::ConfigError;
use batchrun_interfaces::AlgorithmError;

/// Executor-level errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Worker pool is not running")]
    PoolNotRunning,

    #[error("Failed to create worker pool: {0}")]
    PoolCreation(#[source] std::io::Error),

    #[error("Worker pool interrupted: {0}")]
    Interrupted(String),
}

// Convert from config errors
impl From<ConfigError> for ExecutionError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

/// Result of executor-level operations
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Stage of the run protocol at which a task failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStage {
    Configuration,
    Construction,
    Computation,
    Persistence,
}

impl TaskStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStage::Configuration => "configuration",
            TaskStage::Construction => "construction",
            TaskStage::Computation => "computation",
            TaskStage::Persistence => "persistence",
        }
    }
}

impl fmt::Display for TaskStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-task failure captured into an outcome
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Configuration error for {algorithm}: {source}")]
    Configuration {
        algorithm: String,
        #[source]
        source: ConfigError,
    },

    #[error("Construction error for {algorithm} on {problem}: {source}")]
    Construction {
        algorithm: String,
        problem: String,
        #[source]
        source: AlgorithmError,
    },

    #[error("Computation error: {message}")]
    Computation { message: String },

    #[error("Persistence error at {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TaskError {
    pub fn computation(message: impl Into<String>) -> Self {
        Self::Computation {
            message: message.into(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Which protocol stage failed
    pub fn stage(&self) -> TaskStage {
        match self {
            TaskError::Configuration { .. } => TaskStage::Configuration,
            TaskError::Construction { .. } => TaskStage::Construction,
            TaskError::Computation { .. } => TaskStage::Computation,
            TaskError::Persistence { .. } => TaskStage::Persistence,
        }
    }
}
