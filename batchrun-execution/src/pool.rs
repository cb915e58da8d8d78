//! Bounded worker pool
//!
//! Jobs run on a dedicated tokio runtime whose blocking pool is capped at
//! the resolved thread count. At most that many jobs run at once; the rest
//! wait in submission order until a worker frees up.

use std::any::Any;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinError;
use tracing::{debug, info};

use crate::error::{ExecutionError, ExecutionResult};

/// Why a submitted job produced no value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFailure {
    /// The job panicked; carries the panic message when it was a string
    Panicked(String),
    /// The pool dropped the job before it finished
    Cancelled,
}

impl From<JoinError> for JobFailure {
    fn from(err: JoinError) -> Self {
        if err.is_panic() {
            JobFailure::Panicked(panic_message(err.into_panic()))
        } else {
            JobFailure::Cancelled
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_string(),
            Err(_) => "non-string panic payload".to_string(),
        },
    }
}

/// Fixed-size set of worker threads
///
/// Must not be used from inside another async runtime: `run_all` blocks the
/// calling thread.
pub struct WorkerPool {
    runtime: Option<Runtime>,
    threads: NonZeroUsize,
}

impl WorkerPool {
    /// Spawn a pool with exactly `threads` worker slots
    pub fn new(threads: NonZeroUsize) -> ExecutionResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(threads.get())
            .thread_name("batchrun-worker")
            .build()
            .map_err(ExecutionError::PoolCreation)?;

        info!("Started worker pool with {} threads", threads);

        Ok(Self {
            runtime: Some(runtime),
            threads,
        })
    }

    pub fn threads(&self) -> NonZeroUsize {
        self.threads
    }

    pub fn is_running(&self) -> bool {
        self.runtime.is_some()
    }

    /// Submit every job, then block until all of them have finished
    ///
    /// Results come back in submission order, one per job. A panicking job
    /// yields `JobFailure::Panicked` and does not disturb its siblings.
    pub fn run_all<T, F>(&self, jobs: Vec<F>) -> ExecutionResult<Vec<Result<T, JobFailure>>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let runtime = self.runtime.as_ref().ok_or(ExecutionError::PoolNotRunning)?;

        debug!("Submitting {} jobs to {} workers", jobs.len(), self.threads);

        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| runtime.spawn_blocking(job))
            .collect();

        let results = runtime.block_on(async move {
            let mut results = Vec::with_capacity(handles.len());
            for handle in handles {
                results.push(handle.await.map_err(JobFailure::from));
            }
            results
        });

        Ok(results)
    }

    /// Stop the pool, waiting at most `grace` for worker threads to exit
    pub fn shutdown(&mut self, grace: Duration) {
        if let Some(runtime) = self.runtime.take() {
            debug!("Shutting down worker pool ({} threads)", self.threads);
            runtime.shutdown_timeout(grace);
            info!("Worker pool stopped");
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn pool(threads: usize) -> WorkerPool {
        WorkerPool::new(NonZeroUsize::new(threads).unwrap()).unwrap()
    }

    #[test]
    fn test_results_in_submission_order() {
        let pool = pool(3);
        let jobs: Vec<_> = (0..10u64)
            .map(|i| {
                move || {
                    // Later jobs finish first
                    thread::sleep(Duration::from_millis(20 - 2 * i));
                    i * i
                }
            })
            .collect();

        let results = pool.run_all(jobs).unwrap();
        let values: Vec<u64> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(values, (0..10u64).map(|i| i * i).collect::<Vec<_>>());
    }

    #[test]
    fn test_concurrency_is_bounded() {
        let pool = pool(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let jobs: Vec<_> = (0..8)
            .map(|_| {
                let running = Arc::clone(&running);
                let peak = Arc::clone(&peak);
                move || {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(25));
                    running.fetch_sub(1, Ordering::SeqCst);
                }
            })
            .collect();

        let results = pool.run_all(jobs).unwrap();
        assert_eq!(results.len(), 8);
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_panic_is_isolated() {
        let pool = pool(2);
        let jobs: Vec<Box<dyn FnOnce() -> u32 + Send>> = vec![
            Box::new(|| 1),
            Box::new(|| -> u32 { panic!("boom") }),
            Box::new(|| 3),
        ];

        let results = pool.run_all(jobs).unwrap();
        assert_eq!(results[0], Ok(1));
        assert_eq!(results[1], Err(JobFailure::Panicked("boom".to_string())));
        assert_eq!(results[2], Ok(3));
    }

    #[test]
    fn test_pool_is_reusable_across_batches() {
        let pool = pool(2);
        for round in 0..3 {
            let results = pool.run_all(vec![move || round]).unwrap();
            assert_eq!(results, vec![Ok(round)]);
        }
    }

    #[test]
    fn test_empty_submission() {
        let pool = pool(1);
        let jobs: Vec<fn() -> ()> = Vec::new();
        assert!(pool.run_all(jobs).unwrap().is_empty());
    }

    #[test]
    fn test_run_after_shutdown_fails() {
        let mut pool = pool(1);
        pool.shutdown(Duration::from_secs(1));
        assert!(!pool.is_running());

        let err = pool.run_all(vec![|| 1]).unwrap_err();
        assert!(matches!(err, ExecutionError::PoolNotRunning));
    }

    #[test]
    fn test_panic_message_extraction() {
        assert_eq!(panic_message(Box::new("static")), "static");
        assert_eq!(panic_message(Box::new(String::from("owned"))), "owned");
        assert_eq!(panic_message(Box::new(42u8)), "non-string panic payload");
    }
}
