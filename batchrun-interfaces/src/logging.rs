//! Logging interface definitions
//!
//! Provides the structured event type and the sink trait the execution
//! engine emits into. Sinks are injected at construction time; nothing in
//! the engine reaches for process-wide logger state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Log level enumeration
///
/// Ordered from most verbose (Trace) to least verbose (Error).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Detailed tracing information for debugging
    Trace,
    /// Debug information useful during development
    Debug,
    /// Informational messages about normal operation
    Info,
    /// Warning messages about potential issues
    Warn,
    /// Error messages about failures
    Error,
}

impl LogLevel {
    /// Convert log level to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Check if this level should be logged given a minimum level
    pub fn should_log(&self, min_level: LogLevel) -> bool {
        self >= &min_level
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<batchrun_config::domains::logging::LogLevel> for LogLevel {
    fn from(level: batchrun_config::domains::logging::LogLevel) -> Self {
        use batchrun_config::domains::logging::LogLevel as ConfigLevel;
        match level {
            ConfigLevel::Trace => LogLevel::Trace,
            ConfigLevel::Debug => LogLevel::Debug,
            ConfigLevel::Info => LogLevel::Info,
            ConfigLevel::Warn => LogLevel::Warn,
            ConfigLevel::Error => LogLevel::Error,
        }
    }
}

/// Structured log event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    /// Log level/severity
    pub level: LogLevel,
    /// Primary log message
    pub message: String,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Component that generated the event
    pub source: Option<String>,
    /// Correlates events of one batch
    pub correlation_id: Option<String>,
    /// Structured fields, ordered by key
    pub fields: BTreeMap<String, JsonValue>,
}

impl LogEvent {
    /// Create a new log event with minimal information
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            source: None,
            correlation_id: None,
            fields: BTreeMap::new(),
        }
    }

    /// Set the source component
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set correlation ID
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Add a single structured field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up a structured field
    pub fn field(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }
}

/// Observability sink
///
/// Implementations must tolerate concurrent `emit` calls from every worker
/// thread of the pool.
pub trait EventSink: Send + Sync {
    /// Record a structured event
    fn emit(&self, event: LogEvent);

    /// Lowest level this sink records
    fn min_level(&self) -> LogLevel {
        LogLevel::Trace
    }

    /// Check if a log level should be emitted
    fn enabled(&self, level: LogLevel) -> bool {
        level.should_log(self.min_level())
    }

    /// Emit only when the level is enabled
    fn log(&self, event: LogEvent) {
        if self.enabled(event.level) {
            self.emit(event);
        }
    }

    fn debug(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogEvent::new(LogLevel::Debug, message));
    }

    fn info(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogEvent::new(LogLevel::Info, message));
    }

    fn warn(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogEvent::new(LogLevel::Warn, message));
    }

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogEvent::new(LogLevel::Error, message));
    }
}
