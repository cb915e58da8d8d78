//! Simple configuration demo
//!
//! A minimal example showing basic configuration loading

use batchrun_config::{load_algorithm_properties, ConfigError, ConfigResult, ConfigLoader};
use std::fs;
use tempfile::TempDir;

fn main() -> ConfigResult<()> {
    println!("Simple batchrun configuration demo");

    // Create temporary directory for demo files
    let temp_dir = TempDir::new().map_err(|e| ConfigError::ValidationError(
        format!("Failed to create temp directory: {}", e)
    ))?;

    let config_path = temp_dir.path().join("config.yaml");
    let config_content = format!(
        r#"
execution:
  threads: 4
  shutdown_grace_period: 10

experiment:
  base_directory: {base:?}
  pareto_front_file_name: "FUN"
  pareto_set_file_name: "VAR"
  use_algorithm_config_files: true
  algorithm_config_directory: {base:?}

logging:
  level: "info"
  format: "json"
"#,
        base = temp_dir.path()
    );

    fs::write(&config_path, config_content).map_err(ConfigError::FileReadError)?;
    fs::write(temp_dir.path().join("NSGAII.conf"), "populationSize=100\nmaxEvaluations=25000\n")
        .map_err(ConfigError::FileReadError)?;

    let loader = ConfigLoader::new();
    let config = loader.from_file(&config_path)?;

    println!("Configuration loaded successfully!");
    println!("   Threads: {}", config.execution.threads);
    println!("   Base directory: {}", config.experiment.base_directory.display());
    println!("   Logging level: {:?}", config.logging.level);

    let properties = load_algorithm_properties(&config.experiment.algorithm_config_directory, "NSGAII")?;
    for (key, value) in properties.iter() {
        println!("   NSGAII {} = {}", key, value);
    }

    Ok(())
}
