//! Name-based algorithm construction
//!
//! [`AlgorithmRegistry`] maps algorithm names to constructor closures and
//! resolves problem names through a [`ProblemResolver`] before invoking
//! them. [`ProblemCatalog`] is a fixed table of known problems.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use batchrun_config::AlgorithmProperties;
use batchrun_interfaces::{
    Algorithm, AlgorithmError, AlgorithmFactory, ProblemDescriptor, ProblemResolver,
};

/// Property selecting the solution encoding of a resolved problem
pub const ENCODING_KEY: &str = "encoding";

type Constructor = Box<
    dyn Fn(&ProblemDescriptor, Option<&AlgorithmProperties>) -> Result<Box<dyn Algorithm>, AlgorithmError>
        + Send
        + Sync,
>;

/// Registry of algorithm constructors keyed by name
pub struct AlgorithmRegistry {
    constructors: HashMap<String, Constructor>,
    problems: Arc<dyn ProblemResolver>,
}

impl AlgorithmRegistry {
    pub fn new(problems: Arc<dyn ProblemResolver>) -> Self {
        Self {
            constructors: HashMap::new(),
            problems,
        }
    }

    /// Register `constructor` under `name`, replacing any previous entry
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&ProblemDescriptor, Option<&AlgorithmProperties>) -> Result<Box<dyn Algorithm>, AlgorithmError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if self.constructors.insert(name.clone(), Box::new(constructor)).is_some() {
            debug!("Replaced algorithm constructor {}", name);
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&ProblemDescriptor, Option<&AlgorithmProperties>) -> Result<Box<dyn Algorithm>, AlgorithmError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, constructor);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("algorithms", &self.names())
            .finish()
    }
}

impl AlgorithmFactory for AlgorithmRegistry {
    fn create(
        &self,
        algorithm: &str,
        problem: &str,
        properties: Option<&AlgorithmProperties>,
    ) -> Result<Box<dyn Algorithm>, AlgorithmError> {
        let constructor = self
            .constructors
            .get(algorithm)
            .ok_or_else(|| AlgorithmError::UnknownAlgorithm(algorithm.to_string()))?;

        let defaults = AlgorithmProperties::new();
        let descriptor = self
            .problems
            .resolve(problem, properties.unwrap_or(&defaults))?;

        debug!(
            "Constructing {} for {} ({} variables, {} objectives)",
            algorithm, descriptor.name, descriptor.number_of_variables, descriptor.number_of_objectives
        );
        constructor(&descriptor, properties)
    }
}

/// Fixed table of known problems
#[derive(Debug, Clone, Default)]
pub struct ProblemCatalog {
    problems: HashMap<String, ProblemDescriptor>,
}

impl ProblemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, problem: ProblemDescriptor) {
        self.problems.insert(problem.name.clone(), problem);
    }

    pub fn with(mut self, problem: ProblemDescriptor) -> Self {
        self.insert(problem);
        self
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

impl FromIterator<ProblemDescriptor> for ProblemCatalog {
    fn from_iter<I: IntoIterator<Item = ProblemDescriptor>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for problem in iter {
            catalog.insert(problem);
        }
        catalog
    }
}

impl ProblemResolver for ProblemCatalog {
    /// Look up `problem`; an `encoding` parameter overrides the stored one
    fn resolve(
        &self,
        problem: &str,
        parameters: &AlgorithmProperties,
    ) -> Result<ProblemDescriptor, AlgorithmError> {
        let descriptor = self
            .problems
            .get(problem)
            .cloned()
            .ok_or_else(|| AlgorithmError::UnknownProblem(problem.to_string()))?;

        Ok(match parameters.get(ENCODING_KEY) {
            Some(encoding) => descriptor.with_encoding(encoding),
            None => descriptor,
        })
    }
}
