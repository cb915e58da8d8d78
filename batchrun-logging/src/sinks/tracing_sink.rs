use batchrun_interfaces::{EventSink, LogEvent, LogLevel};

/// Sink that forwards events to the `tracing` subscriber
///
/// Structured fields are rendered as one JSON object so they survive any
/// subscriber format.
#[derive(Debug, Clone)]
pub struct TracingSink {
    min_level: LogLevel,
}

impl TracingSink {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn from_config(config: &batchrun_config::LoggingConfig) -> Self {
        Self::new(config.level.into())
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

macro_rules! forward {
    ($macro:ident, $event:expr, $fields:expr) => {
        tracing::$macro!(
            source = $event.source.as_deref().unwrap_or("batchrun"),
            correlation_id = $event.correlation_id.as_deref().unwrap_or(""),
            fields = %$fields,
            "{}",
            $event.message
        )
    };
}

impl EventSink for TracingSink {
    fn emit(&self, event: LogEvent) {
        let fields = serde_json::to_string(&event.fields).unwrap_or_else(|_| "{}".to_string());

        match event.level {
            LogLevel::Trace => forward!(trace, event, fields),
            LogLevel::Debug => forward!(debug, event, fields),
            LogLevel::Info => forward!(info, event, fields),
            LogLevel::Warn => forward!(warn, event, fields),
            LogLevel::Error => forward!(error, event, fields),
        }
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}
