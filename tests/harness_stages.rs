use anyhow::{Result, anyhow};
use stream_check::config::Config;
use stream_check::harness::Harness;
use stream_check::probes::{Probe, default_stages};
use stream_check::report::{CheckOutcome, CheckResult};

struct Scripted {
    name: &'static str,
    outcome: Option<CheckOutcome>,
}

impl Scripted {
    fn ok(name: &'static str) -> Box<dyn Probe> {
        Box::new(Self {
            name,
            outcome: Some(CheckOutcome::Ok),
        })
    }

    fn warning(name: &'static str) -> Box<dyn Probe> {
        Box::new(Self {
            name,
            outcome: Some(CheckOutcome::Warning),
        })
    }

    fn erroring(name: &'static str) -> Box<dyn Probe> {
        Box::new(Self {
            name,
            outcome: None,
        })
    }
}

impl Probe for Scripted {
    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(&self) -> Result<CheckResult> {
        match self.outcome {
            Some(CheckOutcome::Ok) => Ok(CheckResult::ok(self.name)),
            Some(CheckOutcome::Warning) => Ok(CheckResult::warning(self.name)),
            Some(CheckOutcome::Failure) => Ok(CheckResult::failure(self.name)),
            None => Err(anyhow!("simulated connection refused")),
        }
    }
}

#[test]
fn every_stage_reports_even_when_one_errors() {
    let harness = Harness::with_stages(
        "localhost:9092",
        vec![
            Scripted::ok("first"),
            Scripted::erroring("second"),
            Scripted::warning("third"),
            Scripted::ok("fourth"),
            Scripted::ok("fifth"),
        ],
    );
    let report = harness.run();
    assert_eq!(report.results.len(), 5);
    let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third", "fourth", "fifth"]);
    assert_eq!(report.results[1].outcome, CheckOutcome::Failure);
    assert!(report.results[1].details[0].contains("simulated connection refused"));
    assert_eq!(report.overall, CheckOutcome::Failure);
    assert_ne!(report.exit_code(), 0);
}

#[test]
fn clean_run_is_ok_overall() {
    let harness = Harness::with_stages(
        "localhost:9092",
        vec![
            Scripted::ok("first"),
            Scripted::ok("second"),
            Scripted::ok("third"),
            Scripted::ok("fourth"),
            Scripted::ok("fifth"),
        ],
    );
    let report = harness.run();
    assert_eq!(report.overall, CheckOutcome::Ok);
    assert_eq!(report.exit_code(), 0);
    assert!(report.results.iter().all(|r| r.outcome == CheckOutcome::Ok));
}

#[test]
fn default_stages_cover_every_stage_in_order() {
    let stages = default_stages(&Config::default());
    let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec![
            "Broker Connectivity",
            "Topic Topology",
            "Producer Traffic",
            "Message Schema",
            "Dashboard Service",
        ]
    );
}

#[test]
fn later_stages_run_after_an_early_error() {
    let harness = Harness::with_stages(
        "localhost:9092",
        vec![
            Scripted::erroring("broker"),
            Scripted::erroring("topology"),
            Scripted::ok("service"),
        ],
    );
    let report = harness.run();
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.results[0].outcome, CheckOutcome::Failure);
    assert_eq!(report.results[1].outcome, CheckOutcome::Failure);
    assert_eq!(report.results[2].outcome, CheckOutcome::Ok);
}
