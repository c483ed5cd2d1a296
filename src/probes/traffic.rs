use super::{Probe, is_benign_poll_error, sampling_consumer};
use crate::config::{Config, TopicSpec};
use crate::report::CheckResult;
use crate::sample::SampleWindow;
use anyhow::{Context, Result, anyhow};
use rdkafka::Message;
use rdkafka::consumer::Consumer;
use tracing::debug;

pub const NAME: &str = "Producer Traffic";

pub struct TrafficSampler {
    cfg: Config,
}

impl TrafficSampler {
    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }
}

impl Probe for TrafficSampler {
    fn name(&self) -> &'static str {
        NAME
    }

    fn execute(&self) -> Result<CheckResult> {
        let topics = self.cfg.topic_names();
        let consumer = sampling_consumer(&self.cfg)?;
        // Subscribing is a local operation; only this round-trip separates
        // "broker down" from "subscription open but idle".
        consumer
            .fetch_metadata(None, self.cfg.broker.connect_timeout())
            .with_context(|| {
                format!("broker {} unreachable", self.cfg.broker.bootstrap_servers)
            })?;
        consumer
            .subscribe(&topics)
            .context("subscribe for traffic sampling")?;

        let mut window = SampleWindow::new(topics.iter().copied(), self.cfg.sampling.window(), 0);
        debug!(window_secs = self.cfg.sampling.window_secs, "sampling traffic");
        while let Some(budget) = window.remaining() {
            let timeout = budget.min(self.cfg.sampling.poll_timeout());
            match consumer.poll(timeout) {
                Some(Ok(msg)) => {
                    window.record_count(msg.topic());
                    debug!(topic = msg.topic(), total = window.total(), "message observed");
                }
                Some(Err(e)) if is_benign_poll_error(&e) => {
                    debug!("skipping consumer error: {e}");
                }
                Some(Err(e)) => return Err(anyhow!("poll failed during traffic sampling: {e}")),
                None => {}
            }
        }
        debug!(total = window.total(), "traffic window closed");
        Ok(summarize(&self.cfg.topics, &window))
    }
}

// Zero observed messages on a topic is a WARNING; the connection itself
// already proved out above.
pub fn summarize(required: &[TopicSpec], window: &SampleWindow) -> CheckResult {
    let mut details = Vec::new();
    let mut quiet = false;
    for spec in required {
        let count = window.count(&spec.name);
        if count == 0 {
            quiet = true;
            details.push(format!("{}: no messages", spec.name));
        } else {
            details.push(format!("{}: {count} message(s)", spec.name));
        }
    }
    details.push(format!("sampled {} message(s) total", window.total()));
    if quiet {
        CheckResult::warning(NAME).with_details(details)
    } else {
        CheckResult::ok(NAME).with_details(details)
    }
}
