//! Batchrun Execution Engine
//!
//! Runs batches of independent, long-running units of work on a fixed-size
//! worker pool and blocks the caller until every unit has finished. The
//! typical unit is an [`AlgorithmRun`]: one algorithm run against one
//! problem, persisted under the experiment's data directory.
//!
//! ```no_run
//! use std::sync::Arc;
//! use batchrun_execution::{
//!     AlgorithmRegistry, AlgorithmRun, ExperimentContext, ProblemCatalog,
//!     SynchronousExecutor, ThreadPoolPolicy,
//! };
//! # fn sink() -> Arc<dyn batchrun_interfaces::EventSink> { unimplemented!() }
//!
//! let factory = Arc::new(AlgorithmRegistry::new(Arc::new(ProblemCatalog::new())));
//! let mut executor: SynchronousExecutor<AlgorithmRun> =
//!     SynchronousExecutor::new(ThreadPoolPolicy::new(4), sink());
//!
//! executor.start(ExperimentContext::new("experiment"))?;
//! for run in 0..30 {
//!     executor.add_task(AlgorithmRun::new("NSGAII", "ZDT1", run, factory.clone()))?;
//! }
//! let outcomes = executor.execute()?;
//! println!("{} runs finished", outcomes.len());
//! executor.stop()?;
//! # Ok::<(), batchrun_execution::ExecutionError>(())
//! ```

pub mod batch;
pub mod context;
pub mod error;
pub mod executor;
pub mod policy;
pub mod pool;
pub mod registry;
pub mod task;
pub mod unit;

// Re-export main types
pub use batch::TaskBatch;
pub use context::{ExperimentContext, RunContext};
pub use error::{ExecutionError, ExecutionResult, TaskError, TaskStage};
pub use executor::{ExecutorPhase, SynchronousExecutor, DEFAULT_SHUTDOWN_GRACE_PERIOD};
pub use policy::{host_parallelism, ThreadPoolPolicy};
pub use pool::{JobFailure, WorkerPool};
pub use registry::{AlgorithmRegistry, ProblemCatalog, ENCODING_KEY};
pub use task::{AlgorithmRun, RunReport};
pub use unit::{BatchSummary, Outcome, RunId, UnitOfWork};
