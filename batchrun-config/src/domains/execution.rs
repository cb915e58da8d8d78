//! Worker pool configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::validation::{Validatable, validate_non_negative};
use crate::error::ConfigResult;

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Requested worker thread count; 0 means one per available core
    #[serde(default)]
    pub threads: i64,

    /// How long `stop` waits for worker threads to exit; 0 returns immediately
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_shutdown_grace_period")]
    pub shutdown_grace_period: Duration,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            shutdown_grace_period: default_shutdown_grace_period(),
        }
    }
}

impl Validatable for ExecutionConfig {
    fn validate(&self) -> ConfigResult<()> {
        // A zero grace period stops the pool without waiting
        validate_non_negative(self.threads, "threads", self.domain_name())

    }

    fn domain_name(&self) -> &'static str {
        "execution"
    }
}

fn default_shutdown_grace_period() -> Duration {
    Duration::from_secs(30)
}
