//! Synchronous parallel executor
//!
//! The executor owns a worker pool and the pending batch. `execute` fans the
//! whole batch out to the pool and blocks until every unit has finished,
//! then returns one [`Outcome`] per unit in the order they were added.
//!
//! ```text
//! Uninitialized --start--> Started --add_task--> Accepting
//!                            ^                      |
//!                            +------execute---------+
//! Started | Accepting --stop--> Stopped
//! ```

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use batchrun_config::ExecutionConfig;
use batchrun_interfaces::{EventSink, LogEvent, LogLevel};

use crate::batch::TaskBatch;
use crate::error::{ExecutionError, ExecutionResult, TaskError};
use crate::policy::ThreadPoolPolicy;
use crate::pool::{JobFailure, WorkerPool};
use crate::task::EVENT_SOURCE;
use crate::unit::{BatchSummary, Outcome, RunId, UnitOfWork};

/// Default time `stop` waits for worker threads to exit
pub const DEFAULT_SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Observable lifecycle phase of an executor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorPhase {
    /// `start` has not been called yet
    Uninitialized,
    /// Pool running, no pending tasks
    Started,
    /// Pool running, tasks waiting for `execute`
    Accepting,
    /// Pool shut down for good
    Stopped,
}

enum ExecutorState<U: UnitOfWork> {
    Uninitialized,
    Running {
        pool: WorkerPool,
        context: Arc<U::Context>,
        batch: TaskBatch<U>,
    },
    Stopped,
}

/// Runs batches of independent units of work on a bounded pool
///
/// `execute` blocks the calling thread; do not call it from inside an async
/// runtime.
pub struct SynchronousExecutor<U: UnitOfWork> {
    policy: ThreadPoolPolicy,
    shutdown_grace_period: Duration,
    sink: Arc<dyn EventSink>,
    state: ExecutorState<U>,
}

impl<U: UnitOfWork> SynchronousExecutor<U> {
    pub fn new(policy: ThreadPoolPolicy, sink: Arc<dyn EventSink>) -> Self {
        Self {
            policy,
            shutdown_grace_period: DEFAULT_SHUTDOWN_GRACE_PERIOD,
            sink,
            state: ExecutorState::Uninitialized,
        }
    }

    /// Build an executor from the `execution` configuration domain
    pub fn from_config(config: &ExecutionConfig, sink: Arc<dyn EventSink>) -> Self {
        Self::new(ThreadPoolPolicy::from(config), sink)
            .with_shutdown_grace_period(config.shutdown_grace_period)
    }

    pub fn with_shutdown_grace_period(mut self, grace: Duration) -> Self {
        self.shutdown_grace_period = grace;
        self
    }

    pub fn policy(&self) -> ThreadPoolPolicy {
        self.policy
    }

    pub fn phase(&self) -> ExecutorPhase {
        match &self.state {
            ExecutorState::Uninitialized => ExecutorPhase::Uninitialized,
            ExecutorState::Running { batch, .. } if batch.is_empty() => ExecutorPhase::Started,
            ExecutorState::Running { .. } => ExecutorPhase::Accepting,
            ExecutorState::Stopped => ExecutorPhase::Stopped,
        }
    }

    /// Number of tasks waiting for the next `execute`
    pub fn pending_tasks(&self) -> usize {
        match &self.state {
            ExecutorState::Running { batch, .. } => batch.len(),
            _ => 0,
        }
    }

    /// Worker count of the live pool
    pub fn thread_count(&self) -> Option<NonZeroUsize> {
        match &self.state {
            ExecutorState::Running { pool, .. } => Some(pool.threads()),
            _ => None,
        }
    }

    fn event(&self, level: LogLevel, message: &str) -> LogEvent {
        LogEvent::new(level, message).with_source(EVENT_SOURCE)
    }

    /// Create the worker pool and an empty batch for `context`
    ///
    /// Calling `start` on a running executor discards the pending batch and
    /// replaces the pool.
    pub fn start(&mut self, context: impl Into<Arc<U::Context>>) -> ExecutionResult<()> {
        if matches!(self.state, ExecutorState::Stopped) {
            return Err(ExecutionError::PoolNotRunning);
        }

        let threads = self.policy.resolve()?;

        if let ExecutorState::Running { mut pool, batch, .. } =
            std::mem::replace(&mut self.state, ExecutorState::Uninitialized)
        {
            if !batch.is_empty() {
                self.sink.log(
                    self.event(LogLevel::Warn, "Discarding pending tasks")
                        .with_field("pending", batch.len()),
                );
            }
            pool.shutdown(self.shutdown_grace_period);
        }

        let pool = WorkerPool::new(threads)?;
        self.sink.log(
            self.event(LogLevel::Info, "Worker pool started")
                .with_field("threads", threads.get()),
        );

        self.state = ExecutorState::Running {
            pool,
            context: context.into(),
            batch: TaskBatch::new(),
        };
        Ok(())
    }

    /// Queue `task` for the next `execute`
    pub fn add_task(&mut self, task: U) -> ExecutionResult<()> {
        match &mut self.state {
            ExecutorState::Running { batch, .. } => {
                batch.push(task);
                Ok(())
            }
            _ => Err(ExecutionError::PoolNotRunning),
        }
    }

    /// Run the pending batch to completion
    ///
    /// Every queued unit runs even when some of them fail. Per-unit failures
    /// are reported in the returned outcomes; only pool-level problems are
    /// returned as `Err`. The batch is empty afterwards in either case.
    pub fn execute(&mut self) -> ExecutionResult<Vec<Outcome<U::Output>>> {
        let (pool, context, batch) = match &mut self.state {
            ExecutorState::Running {
                pool,
                context,
                batch,
            } => (pool, context, batch),
            _ => return Err(ExecutionError::PoolNotRunning),
        };

        let tasks = batch.drain();
        if tasks.is_empty() {
            debug!("Nothing to execute");
            return Ok(Vec::new());
        }

        let batch_id = Uuid::new_v4().to_string();
        let sink: Arc<dyn EventSink> = Arc::new(BatchSink {
            inner: Arc::clone(&self.sink),
            batch_id: batch_id.clone(),
        });

        sink.log(
            LogEvent::new(LogLevel::Info, "Batch submitted")
                .with_source(EVENT_SOURCE)
                .with_field("tasks", tasks.len())
                .with_field("threads", pool.threads().get()),
        );

        let identities: Vec<(RunId, String)> = tasks
            .iter()
            .map(|task| (task.run_id(), task.label()))
            .collect();

        let jobs: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                let context = Arc::clone(context);
                let sink = Arc::clone(&sink);
                move || task.run(&context, sink.as_ref())
            })
            .collect();

        let started = Instant::now();
        let results = pool.run_all(jobs)?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcomes = collect_outcomes(identities, results, sink.as_ref())?;

        for outcome in &outcomes {
            if let Err(error) = &outcome.result {
                sink.log(
                    LogEvent::new(LogLevel::Error, "Task failed")
                        .with_source(EVENT_SOURCE)
                        .with_field("run", outcome.run_id)
                        .with_field("task", outcome.label.as_str())
                        .with_field("stage", error.stage().as_str())
                        .with_field("error", error.to_string()),
                );
            }
        }

        let summary = BatchSummary::from_outcomes(&outcomes);
        sink.log(
            LogEvent::new(LogLevel::Info, "Batch completed")
                .with_source(EVENT_SOURCE)
                .with_field("total", summary.total)
                .with_field("succeeded", summary.succeeded)
                .with_field("failed", summary.failed)
                .with_field(
                    "failures_by_stage",
                    serde_json::to_value(&summary.failures_by_stage).unwrap_or_default(),
                )
                .with_field("elapsed_ms", elapsed_ms),
        );
        debug!(
            "Batch {} finished: {}/{} succeeded",
            batch_id, summary.succeeded, summary.total
        );

        Ok(outcomes)
    }

    /// Shut the pool down for good
    ///
    /// Waits at most the shutdown grace period for worker threads to exit.
    pub fn stop(&mut self) -> ExecutionResult<()> {
        match std::mem::replace(&mut self.state, ExecutorState::Stopped) {
            ExecutorState::Running {
                mut pool, batch, ..
            } => {
                if !batch.is_empty() {
                    self.sink.log(
                        self.event(LogLevel::Warn, "Discarding pending tasks")
                            .with_field("pending", batch.len()),
                    );
                }
                pool.shutdown(self.shutdown_grace_period);
                self.sink
                    .log(self.event(LogLevel::Info, "Worker pool stopped"));
                Ok(())
            }
            ExecutorState::Uninitialized => {
                self.state = ExecutorState::Uninitialized;
                Err(ExecutionError::PoolNotRunning)
            }
            ExecutorState::Stopped => Err(ExecutionError::PoolNotRunning),
        }
    }
}

impl<U: UnitOfWork> std::fmt::Debug for SynchronousExecutor<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynchronousExecutor")
            .field("policy", &self.policy)
            .field("phase", &self.phase())
            .field("pending_tasks", &self.pending_tasks())
            .finish()
    }
}

/// Pair pool results with their units
///
/// Any cancelled job interrupts the whole batch. A panicking unit becomes a
/// computation failure of that unit only.
fn collect_outcomes<T>(
    identities: Vec<(RunId, String)>,
    results: Vec<Result<Result<T, TaskError>, JobFailure>>,
    sink: &dyn EventSink,
) -> ExecutionResult<Vec<Outcome<T>>> {
    let total = identities.len();
    let mut outcomes = Vec::with_capacity(total);
    let mut cancelled = 0usize;

    for ((run_id, label), result) in identities.into_iter().zip(results) {
        let result = match result {
            Ok(result) => result,
            Err(JobFailure::Panicked(message)) => Err(TaskError::computation(format!(
                "unit of work panicked: {}",
                message
            ))),
            Err(JobFailure::Cancelled) => {
                cancelled += 1;
                continue;
            }
        };
        outcomes.push(Outcome {
            run_id,
            label,
            result,
        });
    }

    if cancelled > 0 {
        sink.log(
            LogEvent::new(LogLevel::Error, "Batch interrupted")
                .with_source(EVENT_SOURCE)
                .with_field("cancelled", cancelled),
        );
        return Err(ExecutionError::Interrupted(format!(
            "{} of {} units of work were cancelled",
            cancelled, total
        )));
    }

    Ok(outcomes)
}


/// Tags every event of one batch with the batch id
struct BatchSink {
    inner: Arc<dyn EventSink>,
    batch_id: String,
}

impl EventSink for BatchSink {
    fn emit(&self, mut event: LogEvent) {
        if event.correlation_id.is_none() {
            event.correlation_id = Some(self.batch_id.clone());
        }
        self.inner.emit(event);
    }

    fn min_level(&self) -> LogLevel {
        self.inner.min_level()
    }
}
