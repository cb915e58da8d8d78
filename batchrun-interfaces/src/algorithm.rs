//! Algorithm construction interface definitions
//!
//! The engine treats algorithms as opaque computations. It asks an
//! [`AlgorithmFactory`] for an instance by name and runs it once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::results::ResultArtifact;
use batchrun_config::AlgorithmProperties;

/// Errors raised while constructing or running an algorithm
#[derive(Error, Debug)]
pub enum AlgorithmError {
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Unknown problem: {0}")]
    UnknownProblem(String),

    #[error("Invalid value '{value}' for parameter {key}: {reason}")]
    InvalidParameter {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Algorithm failed: {0}")]
    Failed(String),
}

/// A configured algorithm ready to run against its problem
pub trait Algorithm {
    /// Name of the algorithm variant
    fn name(&self) -> &str;

    /// Run to completion and return the resulting front
    fn execute(&mut self) -> Result<Box<dyn ResultArtifact>, AlgorithmError>;
}

/// Builds algorithm instances by name
///
/// Called concurrently from every worker thread. Construction may be
/// expensive; the engine treats it as an opaque synchronous call.
pub trait AlgorithmFactory: Send + Sync {
    /// Build `algorithm` for `problem`
    ///
    /// `properties` is `Some` when the experiment reads algorithm
    /// configuration files, `None` when built-in defaults apply.
    fn create(
        &self,
        algorithm: &str,
        problem: &str,
        properties: Option<&AlgorithmProperties>,
    ) -> Result<Box<dyn Algorithm>, AlgorithmError>;
}

/// Shape of a problem instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDescriptor {
    pub name: String,
    pub number_of_variables: usize,
    pub number_of_objectives: usize,
    /// Solution encoding, e.g. "Real" or "Binary"
    pub encoding: String,
}

impl ProblemDescriptor {
    pub fn new(
        name: impl Into<String>,
        number_of_variables: usize,
        number_of_objectives: usize,
    ) -> Self {
        Self {
            name: name.into(),
            number_of_variables,
            number_of_objectives,
            encoding: "Real".to_string(),
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

/// Resolves a problem name into a problem definition
pub trait ProblemResolver: Send + Sync {
    fn resolve(
        &self,
        problem: &str,
        parameters: &AlgorithmProperties,
    ) -> Result<ProblemDescriptor, AlgorithmError>;
}
