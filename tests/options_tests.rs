use crate::options::AnalysisOptions;
use crate::tracing_config::{LogFormat, TracingConfig};
use fir_checker::{BufferedSink, DeliveryMode};
use fir_common::limits::{CANCELLATION_CHECK_INTERVAL, MAX_EXCERPT_LENGTH};

#[test]
fn empty_object_yields_defaults() {
    let options = AnalysisOptions::from_json("{}").expect("valid options");
    assert_eq!(options, AnalysisOptions::default());
    assert_eq!(options.delivery, DeliveryMode::Pull);
    assert_eq!(options.cancellation_check_interval, CANCELLATION_CHECK_INTERVAL);
    assert_eq!(options.excerpt_length, MAX_EXCERPT_LENGTH);
}

#[test]
fn camel_case_fields_are_read() {
    let options = AnalysisOptions::from_json(
        r#"{ "extendedCheckers": true, "delivery": "push", "cancellationCheckInterval": 8, "excerptLength": 40 }"#,
    )
    .expect("valid options");
    assert!(options.extended_checkers);
    assert_eq!(options.delivery, DeliveryMode::Push);

    let collector = options.collector_options();
    assert!(collector.extended_checkers);
    assert_eq!(collector.cancellation_check_interval, 8);
    assert_eq!(options.resolve_options().excerpt_length, 40);
    assert_eq!(options.facade(None).options().excerpt_length, 40);
}

#[test]
fn malformed_options_are_rejected_with_context() {
    let err = AnalysisOptions::from_json(r#"{ "delivery": "broadcast" }"#).unwrap_err();
    assert!(err.to_string().contains("failed to parse analysis options"));

    let err = AnalysisOptions::from_json(r#"{ "cancellationCheckInterval": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("cancellationCheckInterval"));
}

#[test]
fn push_delivery_needs_a_sink() {
    let options = AnalysisOptions {
        delivery: DeliveryMode::Push,
        ..AnalysisOptions::default()
    };
    assert!(options.collector(None, None).is_err());

    let mut sink = BufferedSink::new();
    let collector = options.collector(Some(&mut sink), None).expect("sink given");
    assert_eq!(collector.delivery_mode(), DeliveryMode::Push);

    let pull = AnalysisOptions::default().collector(None, None).expect("pull");
    assert_eq!(pull.delivery_mode(), DeliveryMode::Pull);
}

#[test]
fn log_format_parsing() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
}

#[test]
fn tracing_config_prefers_fir_log_over_rust_log() {
    let env = |vars: &'static [(&'static str, &'static str)]| {
        move |name: &str| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    };

    assert_eq!(TracingConfig::resolve(env(&[("FIR_LOG_FORMAT", "tree")])), None);

    let fallback = TracingConfig::resolve(env(&[("RUST_LOG", "info")])).expect("fallback");
    assert_eq!(fallback.directives, "info");
    assert_eq!(fallback.format, LogFormat::Text);

    let both = TracingConfig::resolve(env(&[
        ("RUST_LOG", "info"),
        ("FIR_LOG", "fir_lowlevel=trace"),
        ("FIR_LOG_FORMAT", "Json"),
    ]))
    .expect("explicit");
    assert_eq!(both.directives, "fir_lowlevel=trace");
    assert_eq!(both.format, LogFormat::Json);
}
