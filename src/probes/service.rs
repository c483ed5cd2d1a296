use super::Probe;
use crate::config::Config;
use crate::report::CheckResult;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::debug;

pub const NAME: &str = "Dashboard Service";

pub struct ServiceProbe {
    cfg: Config,
}

impl ServiceProbe {
    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }
}

impl Probe for ServiceProbe {
    fn name(&self) -> &'static str {
        NAME
    }

    // Exactly one attempt, no retry. A refused or timed-out connection
    // surfaces as FAILURE through the probe boundary.
    fn execute(&self) -> Result<CheckResult> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.cfg.service.timeout())
            .build()
            .context("build http client")?;
        let resp = client
            .get(&self.cfg.service.url)
            .send()
            .with_context(|| format!("GET {}", self.cfg.service.url))?;
        let status = resp.status();
        debug!(%status, "service responded");
        Ok(classify(&self.cfg.service.url, status))
    }
}

// Only an exact 200 counts as healthy. Any other status means the service
// answered, so it degrades to WARNING rather than FAILURE.
pub fn classify(url: &str, status: StatusCode) -> CheckResult {
    if status == StatusCode::OK {
        CheckResult::ok(NAME).with_detail(format!("{url} reachable"))
    } else {
        CheckResult::warning(NAME)
            .with_detail(format!("{url} responded with status {}", status.as_u16()))
    }
}
