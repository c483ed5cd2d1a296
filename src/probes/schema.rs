use super::{Probe, is_benign_poll_error, sampling_consumer};
use crate::config::{Config, TopicSpec};
use crate::report::{CheckOutcome, CheckResult};
use crate::sample::SampleWindow;
use anyhow::{Context, Result, anyhow};
use rdkafka::Message;
use rdkafka::consumer::Consumer;
use serde_json::Value;
use tracing::debug;

pub const NAME: &str = "Message Schema";

pub struct SchemaValidator {
    cfg: Config,
}

impl SchemaValidator {
    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }
}

impl Probe for SchemaValidator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn execute(&self) -> Result<CheckResult> {
        let topics = self.cfg.topic_names();
        let consumer = sampling_consumer(&self.cfg)?;
        consumer
            .fetch_metadata(None, self.cfg.broker.connect_timeout())
            .with_context(|| {
                format!("broker {} unreachable", self.cfg.broker.bootstrap_servers)
            })?;
        consumer
            .subscribe(&topics)
            .context("subscribe for schema sampling")?;

        let mut window = SampleWindow::new(
            topics.iter().copied(),
            self.cfg.schema.timeout(),
            self.cfg.schema.sample_size,
        );
        debug!(
            sample_size = self.cfg.schema.sample_size,
            timeout_secs = self.cfg.schema.timeout_secs,
            "sampling schemas"
        );
        while let Some(budget) = window.remaining() {
            if window.is_saturated() {
                break;
            }
            let timeout = budget.min(self.cfg.sampling.poll_timeout());
            match consumer.poll(timeout) {
                Some(Ok(msg)) => {
                    // Undecodable payloads become invalid samples, not errors.
                    let decoded = msg
                        .payload()
                        .and_then(|raw| serde_json::from_slice::<Value>(raw).ok());
                    window.record_sample(msg.topic(), decoded);
                }
                Some(Err(e)) if is_benign_poll_error(&e) => {
                    debug!("skipping consumer error: {e}");
                }
                Some(Err(e)) => return Err(anyhow!("poll failed during schema sampling: {e}")),
                None => {}
            }
        }
        debug!(total = window.total(), "schema window closed");
        Ok(summarize(&self.cfg.topics, &window))
    }
}

// Presence check only: every required field name must be a key of the
// decoded object. Values are not inspected; non-objects never qualify.
pub fn has_required_fields(payload: &Value, required: &[String]) -> bool {
    match payload.as_object() {
        Some(map) => required.iter().all(|f| map.contains_key(f)),
        None => false,
    }
}

// Structural problems degrade to WARNING at worst; FAILURE is reserved
// for connection-level errors upstream.
pub fn summarize(required: &[TopicSpec], window: &SampleWindow) -> CheckResult {
    let mut details = Vec::new();
    let mut worst = CheckOutcome::Ok;
    for spec in required {
        let samples = window.samples(&spec.name);
        if samples.is_empty() {
            worst = worst.max(CheckOutcome::Warning);
            details.push(format!("{}: no samples observed", spec.name));
            continue;
        }
        let valid = samples
            .iter()
            .flatten()
            .filter(|v| has_required_fields(v, &spec.required_fields))
            .count();
        if valid < samples.len() {
            worst = worst.max(CheckOutcome::Warning);
        }
        details.push(format!("{}: {valid}/{} valid", spec.name, samples.len()));
    }
    match worst {
        CheckOutcome::Ok => CheckResult::ok(NAME).with_details(details),
        _ => CheckResult::warning(NAME).with_details(details),
    }
}
