//! Configuration loading and environment variable handling

use crate::domains::BatchRunConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "BATCHRUN".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<BatchRunConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: BatchRunConfig = serde_yaml::from_str(&content)?;

        // Apply environment variable overrides
        self.apply_env_overrides(&mut config)?;

        // Validate all domains
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<BatchRunConfig> {
        let mut config = BatchRunConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<BatchRunConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut BatchRunConfig) -> ConfigResult<()> {
        self.apply_execution_overrides(&mut config.execution)?;
        self.apply_experiment_overrides(&mut config.experiment)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    /// Apply execution config overrides
    fn apply_execution_overrides(
        &self,
        config: &mut crate::domains::execution::ExecutionConfig,
    ) -> ConfigResult<()> {
        if let Ok(threads) = self.get_env_var("THREADS") {
            config.threads = threads
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid THREADS: {}", e)))?;
        }

        if let Ok(grace) = self.get_env_var("SHUTDOWN_GRACE_SECONDS") {
            let seconds: u64 = grace.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid SHUTDOWN_GRACE_SECONDS: {}", e))
            })?;
            config.shutdown_grace_period = std::time::Duration::from_secs(seconds);
        }

        Ok(())
    }

    /// Apply experiment config overrides
    fn apply_experiment_overrides(
        &self,
        config: &mut crate::domains::experiment::ExperimentConfig,
    ) -> ConfigResult<()> {
        if let Ok(base) = self.get_env_var("BASE_DIRECTORY") {
            config.base_directory = PathBuf::from(base);
        }

        if let Ok(use_files) = self.get_env_var("USE_CONFIG_FILES") {
            config.use_algorithm_config_files = use_files
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid USE_CONFIG_FILES: {}", e)))?;
        }

        if let Ok(dir) = self.get_env_var("CONFIG_DIRECTORY") {
            config.algorithm_config_directory = PathBuf::from(dir);
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
