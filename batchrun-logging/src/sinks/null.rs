use batchrun_interfaces::{EventSink, LogEvent, LogLevel};

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: LogEvent) {}

    fn min_level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }
}
