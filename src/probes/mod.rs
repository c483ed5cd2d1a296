pub mod broker;
pub mod schema;
pub mod service;
pub mod topology;
pub mod traffic;

use crate::config::Config;
use crate::report::CheckResult;
use anyhow::{Context, Result};
use rdkafka::ClientConfig;
use rdkafka::consumer::BaseConsumer;
use rdkafka::error::KafkaError;
use rdkafka::types::RDKafkaErrorCode;

pub use broker::BrokerProbe;
pub use schema::SchemaValidator;
pub use service::ServiceProbe;
pub use topology::TopologyValidator;
pub use traffic::TrafficSampler;

pub trait Probe {
    fn name(&self) -> &'static str;
    fn execute(&self) -> Result<CheckResult>;
}

pub fn default_stages(cfg: &Config) -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(BrokerProbe::new(cfg)),
        Box::new(TopologyValidator::new(cfg)),
        Box::new(TrafficSampler::new(cfg)),
        Box::new(SchemaValidator::new(cfg)),
        Box::new(ServiceProbe::new(cfg)),
    ]
}

pub fn list_topics(cfg: &Config) -> Result<Vec<(String, u32)>> {
    use rdkafka::consumer::Consumer;

    let consumer = metadata_consumer(cfg)?;
    let metadata = consumer
        .fetch_metadata(None, cfg.broker.connect_timeout())
        .context("fetch topic metadata")?;
    let mut topics: Vec<(String, u32)> = metadata
        .topics()
        .iter()
        .map(|t| (t.name().to_string(), t.partitions().len() as u32))
        .collect();
    topics.sort();
    Ok(topics)
}

// Metadata-only client: no group id, so no consumer-group state is touched.
fn metadata_consumer(cfg: &Config) -> Result<BaseConsumer> {
    let timeout_ms = cfg.broker.connect_timeout().as_millis().to_string();
    ClientConfig::new()
        .set("bootstrap.servers", cfg.broker.bootstrap_servers.as_str())
        .set("socket.timeout.ms", timeout_ms.as_str())
        .set("request.timeout.ms", timeout_ms.as_str())
        .create()
        .context("create metadata consumer")
}

// Non-committing subscription: fresh group per run, positioned at latest,
// offsets never stored.
fn sampling_consumer(cfg: &Config) -> Result<BaseConsumer> {
    let timeout_ms = cfg.broker.connect_timeout().as_millis().to_string();
    ClientConfig::new()
        .set("bootstrap.servers", cfg.broker.bootstrap_servers.as_str())
        .set("group.id", run_group(cfg).as_str())
        .set("enable.auto.commit", "false")
        .set("auto.offset.reset", "latest")
        .set("socket.timeout.ms", timeout_ms.as_str())
        .create()
        .context("create sampling consumer")
}

fn run_group(cfg: &Config) -> String {
    format!("{}-{}", cfg.sampling.group_id, std::process::id())
}

// A subscribed topic that does not exist on the broker arrives as an error
// event on the consumer queue. That is a topology gap, graded WARNING by the
// topology stage, so the samplers skip it and keep polling. Every other
// error is treated as connection-level and aborts the sampler.
pub fn is_benign_poll_error(err: &KafkaError) -> bool {
    matches!(
        err,
        KafkaError::MessageConsumption(RDKafkaErrorCode::UnknownTopicOrPartition)
    )
}
