use std::time::Duration;
use stream_check::config::Config;
use stream_check::probes::traffic::summarize;
use stream_check::report::CheckOutcome;
use stream_check::sample::SampleWindow;

fn window(cfg: &Config) -> SampleWindow {
    SampleWindow::new(cfg.topic_names(), Duration::from_secs(1), 0)
}

#[test]
fn traffic_on_every_topic_is_ok() {
    let cfg = Config::default();
    let mut w = window(&cfg);
    for name in cfg.topic_names() {
        w.record_count(name);
        w.record_count(name);
    }
    let res = summarize(&cfg.topics, &w);
    assert_eq!(res.outcome, CheckOutcome::Ok);
    assert!(res.details.iter().any(|d| d == "reddit_stream: 2 message(s)"));
    assert!(res.details.iter().any(|d| d == "sampled 8 message(s) total"));
}

#[test]
fn one_quiet_topic_degrades_to_warning() {
    let cfg = Config::default();
    let mut w = window(&cfg);
    for name in cfg.topic_names() {
        if name != "news_feed" {
            w.record_count(name);
        }
    }
    let res = summarize(&cfg.topics, &w);
    assert_eq!(res.outcome, CheckOutcome::Warning);
    assert!(res.details.iter().any(|d| d == "news_feed: no messages"));
}

#[test]
fn silence_everywhere_is_warning_not_failure() {
    let cfg = Config::default();
    let w = window(&cfg);
    let res = summarize(&cfg.topics, &w);
    assert_eq!(res.outcome, CheckOutcome::Warning);
    assert!(res.details.iter().any(|d| d == "sampled 0 message(s) total"));
}
