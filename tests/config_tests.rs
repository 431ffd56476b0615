use pretty_assertions::assert_eq;
use quick_trace::tracer::{BufferSink, ManualClock};
use quick_trace::utils::ConfigError;
use quick_trace::{load_config, OutputStyle, Tracer};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_configures_builder() {
    let file = config_file(
        r#"
style = "table"
min_span_ms = 30
color = false

[filters]
hide_ultra_fast_ms = 1
group_similar_ms = 5
"#,
    );
    let config = load_config(file.path()).unwrap();

    let clock = ManualClock::new();
    let sink = BufferSink::new();
    let mut tracer = Tracer::builder("Configured")
        .config(&config)
        .clock(clock.clone())
        .sink(sink.clone())
        .build();

    assert_eq!(tracer.style(), OutputStyle::Table);
    assert_eq!(tracer.active_filters_info(), "hide<1ms, group±5ms");

    clock.advance(Duration::from_millis(35));
    tracer.checkpoint("only step");
    let text = tracer.end().unwrap();

    assert_eq!(sink.contents(), text);
    assert!(text.contains("📦 only step (×1)"));
}

#[test]
fn test_config_disables_tracer() {
    let file = config_file("enabled = false\n");
    let config = load_config(file.path()).unwrap();

    let mut tracer = Tracer::builder("Off").config(&config).build();
    tracer.checkpoint("ignored");

    assert!(!tracer.is_enabled());
    assert!(tracer.measurements().is_empty());
}

#[test]
fn test_builder_calls_after_config_win() {
    let file = config_file("style = \"minimal\"\nsilent = true\n");
    let config = load_config(file.path()).unwrap();

    let tracer = Tracer::builder("Override")
        .config(&config)
        .style(OutputStyle::Detailed)
        .silent(false)
        .build();

    assert_eq!(tracer.style(), OutputStyle::Detailed);
    assert!(!tracer.is_silent());
}

#[test]
fn test_invalid_toml() {
    let file = config_file("style = \n");
    let result = load_config(file.path());
    assert!(matches!(result, Err(ConfigError::ParseFailed(_))));
}

#[test]
fn test_unknown_style_name() {
    let err = "sparkly".parse::<OutputStyle>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownStyle(ref s) if s == "sparkly"));
    assert_eq!("JSON".parse::<OutputStyle>().unwrap(), OutputStyle::Structured);
}
