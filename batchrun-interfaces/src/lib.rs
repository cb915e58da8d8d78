//! # Batchrun Interfaces
//!
//! Narrow contracts between the execution engine and its collaborators.
//!
//! The engine never knows how an algorithm works, how a problem is
//! defined, or where log events end up. It reaches those capabilities only
//! through the traits in this crate, so the executor can be tested with
//! stand-ins and embedded in any experiment driver.
//!
//! ## Main Interfaces
//!
//! - [`AlgorithmFactory`] - builds a runnable [`Algorithm`] from names and properties
//! - [`ProblemResolver`] - turns a problem name into a [`ProblemDescriptor`]
//! - [`ResultArtifact`] - the front produced by a run, persisted as two files
//! - [`EventSink`] - injected observability sink for structured [`LogEvent`]s

pub mod algorithm;
pub mod logging;
pub mod results;

// Re-export commonly used types
pub use algorithm::{Algorithm, AlgorithmError, AlgorithmFactory, ProblemDescriptor, ProblemResolver};
pub use logging::{EventSink, LogEvent, LogLevel};
pub use results::{ResultArtifact, Solution, SolutionFront};

pub use batchrun_config::AlgorithmProperties;
