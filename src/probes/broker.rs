use super::{Probe, metadata_consumer};
use crate::config::Config;
use crate::report::CheckResult;
use anyhow::{Context, Result};
use rdkafka::consumer::Consumer;
use tracing::debug;

pub const NAME: &str = "Broker Connectivity";

pub struct BrokerProbe {
    cfg: Config,
}

impl BrokerProbe {
    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }
}

impl Probe for BrokerProbe {
    fn name(&self) -> &'static str {
        NAME
    }

    fn execute(&self) -> Result<CheckResult> {
        let consumer = metadata_consumer(&self.cfg)?;
        let metadata = consumer
            .fetch_metadata(None, self.cfg.broker.connect_timeout())
            .with_context(|| format!("connect to broker {}", self.cfg.broker.bootstrap_servers))?;
        let brokers = metadata.brokers().len();
        let topics = metadata.topics().len();
        debug!(brokers, topics, "broker metadata fetched");
        Ok(CheckResult::ok(NAME)
            .with_detail(format!("connected to {}", self.cfg.broker.bootstrap_servers))
            .with_detail(format!("{brokers} broker(s), {topics} topic(s)")))
    }
}
