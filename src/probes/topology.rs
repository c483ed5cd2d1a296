use super::{Probe, metadata_consumer};
use crate::config::{Config, TopicSpec};
use crate::report::CheckResult;
use anyhow::{Context, Result};
use rdkafka::consumer::Consumer;
use std::collections::HashMap;

pub const NAME: &str = "Topic Topology";

pub struct TopologyValidator {
    cfg: Config,
}

impl TopologyValidator {
    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }
}

impl Probe for TopologyValidator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn execute(&self) -> Result<CheckResult> {
        let consumer = metadata_consumer(&self.cfg)?;
        let metadata = consumer
            .fetch_metadata(None, self.cfg.broker.connect_timeout())
            .context("fetch topic metadata")?;
        let found: HashMap<String, u32> = metadata
            .topics()
            .iter()
            .map(|t| (t.name().to_string(), t.partitions().len() as u32))
            .collect();
        Ok(compare(&self.cfg.topics, &found))
    }
}

// Pure comparison against the live topic map; a missing topic or a wrong
// partition count degrades the outcome to WARNING, never FAILURE.
pub fn compare(required: &[TopicSpec], found: &HashMap<String, u32>) -> CheckResult {
    let mut details = Vec::new();
    let mut degraded = false;
    for spec in required {
        match found.get(&spec.name) {
            None => {
                degraded = true;
                details.push(format!("{}: topic missing", spec.name));
            }
            Some(&got) if got != spec.partitions => {
                degraded = true;
                details.push(format!(
                    "{}: partition count mismatch: got {got} expected {}",
                    spec.name, spec.partitions
                ));
            }
            Some(&got) => {
                details.push(format!("{}: OK ({got} partitions)", spec.name));
            }
        }
    }
    if degraded {
        CheckResult::warning(NAME).with_details(details)
    } else {
        CheckResult::ok(NAME).with_details(details)
    }
}
