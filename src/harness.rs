use crate::config::Config;
use crate::probes::{self, Probe};
use crate::report::{CheckOutcome, CheckResult, Report};
use crate::util::now_rfc3339;
use tracing::{debug, info, warn};

pub struct Harness {
    broker: String,
    stages: Vec<Box<dyn Probe>>,
}

impl Harness {
    pub fn new(cfg: &Config) -> Self {
        Self {
            broker: cfg.broker.bootstrap_servers.clone(),
            stages: probes::default_stages(cfg),
        }
    }

    pub fn with_stages(broker: &str, stages: Vec<Box<dyn Probe>>) -> Self {
        Self {
            broker: broker.to_string(),
            stages,
        }
    }

    // Every stage always runs and yields exactly one result. An Err from a
    // probe is converted here at the boundary, never propagated, so the run
    // always ends with a complete report.
    pub fn run(&self) -> Report {
        let started = now_rfc3339();
        let mut results = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            debug!("stage {} starting", stage.name());
            let result = match stage.execute() {
                Ok(res) => res,
                Err(err) => {
                    warn!("stage {} errored: {:#}", stage.name(), err);
                    CheckResult::failure(stage.name()).with_detail(format!("{err:#}"))
                }
            };
            match result.outcome {
                CheckOutcome::Failure => warn!("stage {} outcome={}", result.name, result.outcome),
                _ => info!("stage {} outcome={}", result.name, result.outcome),
            }
            results.push(result);
        }
        Report::new(&self.broker, started, results)
    }
}
