use serde_json::json;
use std::time::Duration;
use stream_check::config::Config;
use stream_check::probes::schema::{has_required_fields, summarize};
use stream_check::report::CheckOutcome;
use stream_check::sample::SampleWindow;

fn required() -> Vec<String> {
    ["id", "title", "author", "timestamp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// A payload carrying every topic's required fields at once.
fn superset() -> serde_json::Value {
    json!({
        "id": 1,
        "title": "t",
        "author": "a",
        "timestamp": 0,
        "text": "x",
        "sensor_id": "s-1",
        "sensor_type": "temp",
        "metrics": {},
        "source": "wire",
    })
}

fn window(cfg: &Config) -> SampleWindow {
    SampleWindow::new(cfg.topic_names(), Duration::from_secs(1), 5)
}

#[test]
fn all_required_fields_present() {
    let msg = json!({"id": 1, "title": "t", "author": "a", "timestamp": 0, "extra": true});
    assert!(has_required_fields(&msg, &required()));
}

#[test]
fn missing_author_is_invalid() {
    let msg = json!({"id": 1, "title": "t", "timestamp": 0});
    assert!(!has_required_fields(&msg, &required()));
}

#[test]
fn field_values_are_not_inspected() {
    let msg = json!({"id": null, "title": 7, "author": [], "timestamp": "later"});
    assert!(has_required_fields(&msg, &required()));
}

#[test]
fn non_object_payloads_are_invalid() {
    assert!(!has_required_fields(&json!([1, 2, 3]), &required()));
    assert!(!has_required_fields(&json!("plain"), &required()));
    assert!(!has_required_fields(&json!(42), &required()));
}

#[test]
fn fully_valid_samples_are_ok() {
    let cfg = Config::default();
    let mut w = window(&cfg);
    for name in cfg.topic_names() {
        w.record_sample(name, Some(superset()));
    }
    let res = summarize(&cfg.topics, &w);
    assert_eq!(res.outcome, CheckOutcome::Ok);
    assert!(res.details.iter().any(|d| d == "reddit_stream: 1/1 valid"));
}

#[test]
fn partial_validity_summarizes_to_warning() {
    let cfg = Config::default();
    let mut w = window(&cfg);
    for name in cfg.topic_names() {
        w.record_sample(name, Some(superset()));
    }
    w.record_sample(
        "reddit_stream",
        Some(json!({"id": 2, "title": "t", "timestamp": 0})),
    );
    let res = summarize(&cfg.topics, &w);
    assert_eq!(res.outcome, CheckOutcome::Warning);
    assert!(res.details.iter().any(|d| d == "reddit_stream: 1/2 valid"));
}

#[test]
fn undecodable_payloads_count_as_invalid() {
    let cfg = Config::default();
    let mut w = window(&cfg);
    for name in cfg.topic_names() {
        w.record_sample(name, Some(superset()));
    }
    w.record_sample("iot_sensors", None);
    let res = summarize(&cfg.topics, &w);
    assert_eq!(res.outcome, CheckOutcome::Warning);
    assert!(res.details.iter().any(|d| d == "iot_sensors: 1/2 valid"));
}

#[test]
fn quiet_topics_report_no_samples() {
    let cfg = Config::default();
    let w = window(&cfg);
    let res = summarize(&cfg.topics, &w);
    assert_eq!(res.outcome, CheckOutcome::Warning);
    assert!(res.details.iter().all(|d| d.ends_with("no samples observed")));
}
