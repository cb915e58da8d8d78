//! Units of work and their outcomes

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{TaskError, TaskStage};
use batchrun_interfaces::EventSink;

/// Run identifier of a unit of work
pub type RunId = u32;

/// One independent job the executor can run
///
/// A unit is immutable once queued. It is moved onto a worker thread and
/// consumed by `run`, which receives the context shared by the whole batch.
pub trait UnitOfWork: Send + 'static {
    /// Read-only state shared by every unit of a batch
    type Context: Send + Sync + 'static;

    /// Value produced on success
    type Output: Send + 'static;

    fn run_id(&self) -> RunId;

    /// Human readable name used in events
    fn label(&self) -> String {
        format!("run {}", self.run_id())
    }

    fn run(self, context: &Self::Context, sink: &dyn EventSink) -> Result<Self::Output, TaskError>;
}

/// Terminal result of one unit of work
#[derive(Debug)]
pub struct Outcome<T> {
    pub run_id: RunId,
    pub label: String,
    pub result: Result<T, TaskError>,
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&TaskError> {
        self.result.as_ref().err()
    }

    /// Stage that failed, `None` on success
    pub fn stage(&self) -> Option<TaskStage> {
        self.error().map(TaskError::stage)
    }

    pub fn into_result(self) -> Result<T, TaskError> {
        self.result
    }
}

/// Counts over the outcomes of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures_by_stage: BTreeMap<TaskStage, usize>,
}

impl BatchSummary {
    pub fn from_outcomes<T>(outcomes: &[Outcome<T>]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome.stage() {
                None => summary.succeeded += 1,
                Some(stage) => {
                    summary.failed += 1;
                    *summary.failures_by_stage.entry(stage).or_insert(0) += 1;
                }
            }
        }

        summary
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }
}
