//! Worker thread count policy

use std::num::NonZeroUsize;

use crate::error::{ExecutionError, ExecutionResult};

/// Requested worker count for a pool
///
/// `0` means one worker per available core, a positive value is used
/// as-is, and a negative value is rejected when the pool is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThreadPoolPolicy {
    requested: i64,
}

impl ThreadPoolPolicy {
    pub fn new(requested: i64) -> Self {
        Self { requested }
    }

    /// One worker per available core
    pub fn available_parallelism() -> Self {
        Self::new(0)
    }

    pub fn fixed(threads: NonZeroUsize) -> Self {
        Self::new(i64::try_from(threads.get()).unwrap_or(i64::MAX))
    }

    pub fn requested(&self) -> i64 {
        self.requested
    }

    /// Resolve the worker count for a new pool
    pub fn resolve(&self) -> ExecutionResult<NonZeroUsize> {
        match self.requested {
            n if n < 0 => Err(ExecutionError::InvalidConfiguration(format!(
                "the number of threads cannot be negative: {}",
                n
            ))),
            0 => Ok(host_parallelism()),
            n => usize::try_from(n)
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or_else(|| {
                    ExecutionError::InvalidConfiguration(format!(
                        "the number of threads is out of range: {}",
                        n
                    ))
                }),
        }
    }
}

impl From<&batchrun_config::ExecutionConfig> for ThreadPoolPolicy {
    fn from(config: &batchrun_config::ExecutionConfig) -> Self {
        Self::new(config.threads)
    }
}

/// Cores available to this process, never less than one
pub fn host_parallelism() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_resolves_to_host_parallelism() {
        let resolved = ThreadPoolPolicy::available_parallelism().resolve().unwrap();
        assert_eq!(resolved.get(), num_cpus::get().max(1));
    }

    #[test]
    fn test_default_policy_is_available_parallelism() {
        assert_eq!(ThreadPoolPolicy::default(), ThreadPoolPolicy::available_parallelism());
    }

    #[test]
    fn test_negative_is_invalid_configuration() {
        let err = ThreadPoolPolicy::new(-1).resolve().unwrap_err();
        assert!(matches!(err, ExecutionError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("cannot be negative"));
    }

    #[test]
    fn test_fixed_round_trips() {
        let threads = NonZeroUsize::new(3).unwrap();
        assert_eq!(ThreadPoolPolicy::fixed(threads).resolve().unwrap(), threads);
    }

    proptest! {
        #[test]
        fn test_positive_counts_are_used_as_is(n in 1i64..=4096) {
            let resolved = ThreadPoolPolicy::new(n).resolve().unwrap();
            prop_assert_eq!(resolved.get() as i64, n);
        }

        #[test]
        fn test_negative_counts_always_rejected(n in i64::MIN..0) {
            let rejected = matches!(
                ThreadPoolPolicy::new(n).resolve(),
                Err(ExecutionError::InvalidConfiguration(_))
            );
            prop_assert!(rejected);
        }

        #[test]
        fn test_resolution_is_deterministic(n in 0i64..=512) {
            let policy = ThreadPoolPolicy::new(n);
            prop_assert_eq!(policy.resolve().unwrap(), policy.resolve().unwrap());
        }
    }
}
