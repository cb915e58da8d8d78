//! Structured logging infrastructure for batchrun
//!
//! This crate provides:
//! - `tracing` subscriber initialisation driven by [`LoggingConfig`]
//! - [`EventSink`] implementations that executors are constructed with
//!
//! There is no global structured logger. Callers build a sink and pass it
//! to whatever emits events.

pub mod init;
pub mod sinks;

// Re-export main types for convenience
pub use batchrun_config::LoggingConfig;
pub use batchrun_interfaces::{EventSink, LogEvent, LogLevel};
pub use init::{init_logging_from_config, init_simple_tracing};
pub use sinks::{MemorySink, NullSink, TracingSink};
