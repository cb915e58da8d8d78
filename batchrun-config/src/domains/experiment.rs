//! Experiment output layout and algorithm configuration mode

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::validation::{Validatable, validate_file_name};
use crate::error::ConfigResult;

/// Experiment layout configuration
///
/// Results land in `<base_directory>/data/<algorithm>/<problem>/` as
/// `<pareto_front_file_name>.<run>` and `<pareto_set_file_name>.<run>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Root directory of the experiment
    #[serde(default = "default_base_directory")]
    pub base_directory: PathBuf,

    /// File name prefix for objective values
    #[serde(default = "default_pareto_front_file_name")]
    pub pareto_front_file_name: String,

    /// File name prefix for decision variables
    #[serde(default = "default_pareto_set_file_name")]
    pub pareto_set_file_name: String,

    /// Read `<algorithm>.conf` for every run instead of built-in defaults
    #[serde(default = "crate::domains::utils::default_false")]
    pub use_algorithm_config_files: bool,

    /// Directory holding the `.conf` files
    #[serde(default = "default_algorithm_config_directory")]
    pub algorithm_config_directory: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            base_directory: default_base_directory(),
            pareto_front_file_name: default_pareto_front_file_name(),
            pareto_set_file_name: default_pareto_set_file_name(),
            use_algorithm_config_files: false,
            algorithm_config_directory: default_algorithm_config_directory(),
        }
    }
}

impl Validatable for ExperimentConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_file_name(&self.pareto_front_file_name, "pareto_front_file_name", self.domain_name())?;
        validate_file_name(&self.pareto_set_file_name, "pareto_set_file_name", self.domain_name())?;

        if self.pareto_front_file_name == self.pareto_set_file_name {
            return Err(self.validation_error(
                "pareto_front_file_name and pareto_set_file_name must differ",
            ));
        }

        if self.base_directory.as_os_str().is_empty() {
            return Err(self.validation_error("base_directory cannot be empty"));
        }

        if !self.base_directory.exists() {
            log::warn!(
                "Experiment base directory {} does not exist yet; it will be created on first write",
                self.base_directory.display()
            );
        }

        if self.use_algorithm_config_files && !self.algorithm_config_directory.is_dir() {
            log::warn!(
                "Algorithm configuration directory {} is missing; file-configured runs will fail",
                self.algorithm_config_directory.display()
            );
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "experiment"
    }
}

fn default_base_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_pareto_front_file_name() -> String {
    "FUN".to_string()
}

fn default_pareto_set_file_name() -> String {
    "VAR".to_string()
}

fn default_algorithm_config_directory() -> PathBuf {
    PathBuf::from(".")
}
