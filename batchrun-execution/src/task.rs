//! One independent run of an algorithm against a problem
//!
//! Running a task follows four steps, each with its own failure stage:
//! resolve the algorithm configuration, construct the algorithm, run it,
//! and persist the resulting front under the experiment's data directory.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use batchrun_config::{load_algorithm_properties, AlgorithmProperties};
use batchrun_interfaces::{AlgorithmFactory, EventSink, LogEvent, LogLevel, ResultArtifact};

use crate::context::{ExperimentContext, RunContext};
use crate::error::TaskError;
use crate::unit::{RunId, UnitOfWork};

pub(crate) const EVENT_SOURCE: &str = "batchrun-execution";

/// Success value of an [`AlgorithmRun`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Algorithm named by the task; names the output directory
    pub algorithm: String,
    /// Variant actually constructed, after the `algorithm` override
    pub variant: String,
    pub problem: String,
    pub run_id: RunId,
    pub objectives_path: PathBuf,
    pub variables_path: PathBuf,
    pub solutions: usize,
    pub duration_ms: u64,
    pub completed_at: DateTime<Utc>,
}

/// Run `algorithm` on `problem` once and write its front to disk
pub struct AlgorithmRun<C = ExperimentContext> {
    algorithm: String,
    problem: String,
    run_id: RunId,
    factory: Arc<dyn AlgorithmFactory>,
    _context: PhantomData<fn() -> C>,
}

impl<C> AlgorithmRun<C> {
    pub fn new(
        algorithm: impl Into<String>,
        problem: impl Into<String>,
        run_id: RunId,
        factory: Arc<dyn AlgorithmFactory>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            problem: problem.into(),
            run_id,
            factory,
            _context: PhantomData,
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn problem(&self) -> &str {
        &self.problem
    }
}

impl<C> fmt::Debug for AlgorithmRun<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRun")
            .field("algorithm", &self.algorithm)
            .field("problem", &self.problem)
            .field("run_id", &self.run_id)
            .finish()
    }
}

impl<C: RunContext> AlgorithmRun<C> {
    fn resolve_properties(&self, context: &C) -> Result<Option<AlgorithmProperties>, TaskError> {
        if !context.use_algorithm_config_files() {
            return Ok(None);
        }

        load_algorithm_properties(context.algorithm_config_directory(), &self.algorithm)
            .map(Some)
            .map_err(|source| TaskError::Configuration {
                algorithm: self.algorithm.clone(),
                source,
            })
    }
}

impl<C: RunContext> UnitOfWork for AlgorithmRun<C> {
    type Context = C;
    type Output = RunReport;

    fn run_id(&self) -> RunId {
        self.run_id
    }

    fn label(&self) -> String {
        format!("{}/{} run {}", self.algorithm, self.problem, self.run_id)
    }

    fn run(self, context: &C, sink: &dyn EventSink) -> Result<RunReport, TaskError> {
        let started = Instant::now();

        let properties = self.resolve_properties(context)?;
        let variant = properties
            .as_ref()
            .map_or(self.algorithm.as_str(), |p| p.algorithm_or(&self.algorithm))
            .to_string();

        sink.log(
            LogEvent::new(LogLevel::Info, "Running algorithm")
                .with_source(EVENT_SOURCE)
                .with_field("algorithm", self.algorithm.as_str())
                .with_field("variant", variant.as_str())
                .with_field("problem", self.problem.as_str())
                .with_field("run", self.run_id),
        );

        let mut algorithm = self
            .factory
            .create(&variant, &self.problem, properties.as_ref())
            .map_err(|source| TaskError::Construction {
                algorithm: variant.clone(),
                problem: self.problem.clone(),
                source,
            })?;

        let front = algorithm
            .execute()
            .map_err(|e| TaskError::computation(e.to_string()))?;
        debug!("{} produced {} solutions", self.label(), front.len());

        let directory = context.output_directory(&self.algorithm, &self.problem);
        if !directory.is_dir() {
            sink.log(
                LogEvent::new(LogLevel::Debug, "Creating output directory")
                    .with_source(EVENT_SOURCE)
                    .with_field("path", directory.display().to_string()),
            );
        }
        // Tolerates concurrent creation by sibling runs
        std::fs::create_dir_all(&directory)
            .map_err(|e| TaskError::persistence(&directory, e))?;

        let objectives_path = context.objectives_path(&self.algorithm, &self.problem, self.run_id);
        front
            .write_objectives(&objectives_path)
            .map_err(|e| TaskError::persistence(&objectives_path, e))?;

        let variables_path = context.variables_path(&self.algorithm, &self.problem, self.run_id);
        front
            .write_variables(&variables_path)
            .map_err(|e| TaskError::persistence(&variables_path, e))?;

        Ok(RunReport {
            algorithm: self.algorithm,
            variant,
            problem: self.problem,
            run_id: self.run_id,
            objectives_path,
            variables_path,
            solutions: front.len(),
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            completed_at: Utc::now(),
        })
    }
}
