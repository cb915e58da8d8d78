use batchrun_logging::{
    init_logging_from_config, init_simple_tracing, EventSink, LogEvent, LogLevel, LoggingConfig,
    MemorySink, NullSink, TracingSink,
};

#[test]
fn test_logging_config_integration() {
    let yaml_config = r#"
level: debug
format: json
include_location: true
"#;

    let config: LoggingConfig = serde_yaml::from_str(yaml_config).unwrap();
    assert_eq!(config.level.as_str(), "debug");

    // Initialising twice must not fail
    init_logging_from_config(&config).unwrap();
    init_logging_from_config(&config).unwrap();
    init_simple_tracing("info").unwrap();

    let sink = TracingSink::from_config(&config);
    assert_eq!(sink.min_level(), LogLevel::Debug);
    sink.log(LogEvent::new(LogLevel::Info, "Logging initialised").with_field("format", "json"));
}

#[test]
fn test_minimal_logging_config() {
    let config = LoggingConfig::default();
    assert_eq!(TracingSink::from_config(&config).min_level(), LogLevel::Info);
}

#[test]
fn test_null_sink_drops_everything() {
    let sink = NullSink;
    assert!(!sink.enabled(LogLevel::Error));
    sink.log(LogEvent::new(LogLevel::Error, "ignored"));
}

#[test]
fn test_sinks_as_trait_objects() {
    let memory = std::sync::Arc::new(MemorySink::new());
    let sinks: Vec<std::sync::Arc<dyn EventSink>> = vec![memory.clone(), std::sync::Arc::new(NullSink)];

    for sink in &sinks {
        sink.log(LogEvent::new(LogLevel::Warn, "fan-out"));
    }

    assert_eq!(memory.messages(), vec!["fan-out"]);
}
