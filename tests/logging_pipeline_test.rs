//! Executor events flowing through the tracing-backed sink

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use batchrun_config::BatchRunConfig;
use batchrun_execution::{
    AlgorithmRegistry, AlgorithmRun, ExperimentContext, ProblemCatalog, SynchronousExecutor,
    ThreadPoolPolicy,
};
use batchrun_interfaces::{
    Algorithm, AlgorithmError, ProblemDescriptor, ResultArtifact, SolutionFront,
};
use batchrun_logging::{init_logging_from_config, EventSink, LogLevel, TracingSink};
use tempfile::TempDir;

/// Captures formatted tracing output
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct EmptyFront;

impl Algorithm for EmptyFront {
    fn name(&self) -> &str {
        "EmptyFront"
    }

    fn execute(&mut self) -> Result<Box<dyn ResultArtifact>, AlgorithmError> {
        Ok(Box::new(SolutionFront::default()))
    }
}

fn run_batch(sink: Arc<dyn EventSink>, base: &std::path::Path) -> usize {
    let factory = Arc::new(
        AlgorithmRegistry::new(Arc::new(
            ProblemCatalog::new().with(ProblemDescriptor::new("ZDT1", 2, 2)),
        ))
        .with("NSGAII", |_, _| Ok(Box::new(EmptyFront) as Box<dyn Algorithm>)),
    );

    let mut executor: SynchronousExecutor<AlgorithmRun> =
        SynchronousExecutor::new(ThreadPoolPolicy::new(2), sink);
    executor.start(ExperimentContext::new(base)).unwrap();
    executor
        .add_task(AlgorithmRun::new("NSGAII", "ZDT1", 1, factory.clone()))
        .unwrap();
    executor
        .add_task(AlgorithmRun::new("NSGAII", "MISSING", 2, factory))
        .unwrap();

    let succeeded = executor
        .execute()
        .unwrap()
        .iter()
        .filter(|o| o.is_success())
        .count();
    executor.stop().unwrap();
    succeeded
}

#[test]
fn test_batch_events_reach_tracing_subscriber() {
    let dir = TempDir::new().unwrap();
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();

    // Only events emitted on this thread are captured
    let succeeded = tracing::subscriber::with_default(subscriber, || {
        run_batch(Arc::new(TracingSink::new(LogLevel::Debug)), dir.path())
    });
    assert_eq!(succeeded, 1);

    let output = buffer.contents();
    assert!(output.contains("Batch submitted"), "{}", output);
    assert!(output.contains("Batch completed"), "{}", output);
    assert!(output.contains("Task failed"), "{}", output);
    assert!(output.contains("batchrun-execution"), "{}", output);
    assert!(output.contains("\"stage\":\"construction\""), "{}", output);
}

#[test]
fn test_sink_level_comes_from_config() {
    let dir = TempDir::new().unwrap();
    let config: BatchRunConfig =
        serde_yaml::from_str("logging:\n  level: warn\n  format: compact\n").unwrap();

    init_logging_from_config(&config.logging).unwrap();
    let sink = TracingSink::from_config(&config.logging);
    assert!(!sink.enabled(LogLevel::Info));
    assert!(sink.enabled(LogLevel::Error));

    assert_eq!(run_batch(Arc::new(sink), dir.path()), 1);
    assert!(dir.path().join("data/NSGAII/ZDT1/FUN.1").is_file());
}
