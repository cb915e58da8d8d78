//! Shared experiment context
//!
//! One context is created per experiment run and handed to every unit of
//! the batch by shared reference. Nothing mutates it after `start`.

use std::path::{Path, PathBuf};

use batchrun_config::validation::validate_file_name;
use batchrun_config::ExperimentConfig;

use crate::error::ExecutionResult;
use crate::unit::RunId;

/// Naming and filesystem conventions of an experiment
pub trait RunContext: Send + Sync + 'static {
    fn base_directory(&self) -> &Path;

    /// File name prefix for objective vectors
    fn pareto_front_file_name(&self) -> &str;

    /// File name prefix for decision-variable vectors
    fn pareto_set_file_name(&self) -> &str;

    /// Whether each run reads `<algorithm>.conf`
    fn use_algorithm_config_files(&self) -> bool;

    fn algorithm_config_directory(&self) -> &Path;

    /// `<base>/data/<algorithm>/<problem>`
    fn output_directory(&self, algorithm: &str, problem: &str) -> PathBuf {
        self.base_directory()
            .join("data")
            .join(algorithm)
            .join(problem)
    }

    fn objectives_path(&self, algorithm: &str, problem: &str, run_id: RunId) -> PathBuf {
        self.output_directory(algorithm, problem)
            .join(format!("{}.{}", self.pareto_front_file_name(), run_id))
    }

    fn variables_path(&self, algorithm: &str, problem: &str, run_id: RunId) -> PathBuf {
        self.output_directory(algorithm, problem)
            .join(format!("{}.{}", self.pareto_set_file_name(), run_id))
    }
}

/// Plain experiment context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentContext {
    base_directory: PathBuf,
    pareto_front_file_name: String,
    pareto_set_file_name: String,
    use_algorithm_config_files: bool,
    algorithm_config_directory: PathBuf,
}

impl ExperimentContext {
    /// Context rooted at `base_directory` with `FUN`/`VAR` output names
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        let defaults = ExperimentConfig::default();
        Self {
            base_directory: base_directory.into(),
            pareto_front_file_name: defaults.pareto_front_file_name,
            pareto_set_file_name: defaults.pareto_set_file_name,
            use_algorithm_config_files: false,
            algorithm_config_directory: defaults.algorithm_config_directory,
        }
    }

    pub fn from_config(config: &ExperimentConfig) -> Self {
        Self {
            base_directory: config.base_directory.clone(),
            pareto_front_file_name: config.pareto_front_file_name.clone(),
            pareto_set_file_name: config.pareto_set_file_name.clone(),
            use_algorithm_config_files: config.use_algorithm_config_files,
            algorithm_config_directory: config.algorithm_config_directory.clone(),
        }
    }

    /// Override the `FUN`/`VAR` prefixes
    ///
    /// Both must be plain file names so output stays inside the run directory.
    pub fn with_output_names(
        mut self,
        pareto_front_file_name: impl Into<String>,
        pareto_set_file_name: impl Into<String>,
    ) -> ExecutionResult<Self> {
        let front = pareto_front_file_name.into();
        let set = pareto_set_file_name.into();
        validate_file_name(&front, "pareto_front_file_name", "experiment")?;
        validate_file_name(&set, "pareto_set_file_name", "experiment")?;

        self.pareto_front_file_name = front;
        self.pareto_set_file_name = set;
        Ok(self)
    }

    /// Read algorithm parameters from `.conf` files in `directory`
    pub fn with_config_files(mut self, directory: impl Into<PathBuf>) -> Self {
        self.use_algorithm_config_files = true;
        self.algorithm_config_directory = directory.into();
        self
    }
}

impl RunContext for ExperimentContext {
    fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn pareto_front_file_name(&self) -> &str {
        &self.pareto_front_file_name
    }

    fn pareto_set_file_name(&self) -> &str {
        &self.pareto_set_file_name
    }

    fn use_algorithm_config_files(&self) -> bool {
        self.use_algorithm_config_files
    }

    fn algorithm_config_directory(&self) -> &Path {
        &self.algorithm_config_directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutionError;

    #[test]
    fn test_output_layout() {
        let context = ExperimentContext::new("/exp");
        assert_eq!(
            context.output_directory("NSGAII", "ZDT1"),
            PathBuf::from("/exp/data/NSGAII/ZDT1")
        );
        assert_eq!(
            context.objectives_path("NSGAII", "ZDT1", 4),
            PathBuf::from("/exp/data/NSGAII/ZDT1/FUN.4")
        );
        assert_eq!(
            context.variables_path("NSGAII", "ZDT1", 4),
            PathBuf::from("/exp/data/NSGAII/ZDT1/VAR.4")
        );
    }

    #[test]
    fn test_custom_output_names() {
        let context = ExperimentContext::new("/exp")
            .with_output_names("OBJ", "DEC")
            .unwrap();
        assert_eq!(
            context.objectives_path("SPEA2", "DTLZ2", 0),
            PathBuf::from("/exp/data/SPEA2/DTLZ2/OBJ.0")
        );
        assert_eq!(
            context.variables_path("SPEA2", "DTLZ2", 0),
            PathBuf::from("/exp/data/SPEA2/DTLZ2/DEC.0")
        );
    }

    #[test]
    fn test_output_names_must_be_plain_file_names() {
        let err = ExperimentContext::new("/exp")
            .with_output_names("../FUN", "VAR")
            .unwrap_err();
        assert!(matches!(err, ExecutionError::InvalidConfiguration(ref msg) if msg.contains("pareto_front_file_name")));

        assert!(ExperimentContext::new("/exp")
            .with_output_names("FUN", "")
            .is_err());
        assert!(ExperimentContext::new("/exp")
            .with_output_names("FUN", "nested\\VAR")
            .is_err());
    }

    #[test]
    fn test_from_config() {
        let config = ExperimentConfig {
            base_directory: PathBuf::from("/results"),
            use_algorithm_config_files: true,
            algorithm_config_directory: PathBuf::from("/conf"),
            ..ExperimentConfig::default()
        };

        let context = ExperimentContext::from_config(&config);
        assert_eq!(context.base_directory(), Path::new("/results"));
        assert!(context.use_algorithm_config_files());
        assert_eq!(context.algorithm_config_directory(), Path::new("/conf"));
        assert_eq!(context.pareto_front_file_name(), "FUN");
        assert_eq!(context.pareto_set_file_name(), "VAR");
    }

    #[test]
    fn test_config_files_disabled_by_default() {
        let context = ExperimentContext::new("/exp");
        assert!(!context.use_algorithm_config_files());
        assert!(context.with_config_files("/conf").use_algorithm_config_files());
    }
}
