use crate::util::now_rfc3339;
use serde::{Deserialize, Serialize};
use std::fmt;

// Worst outcome dominates: Ok < Warning < Failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    Ok,
    Warning,
    Failure,
}

impl CheckOutcome {
    pub fn icon(self) -> char {
        match self {
            CheckOutcome::Ok => '✓',
            CheckOutcome::Warning => '⚠',
            CheckOutcome::Failure => '✗',
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckOutcome::Ok => "OK",
            CheckOutcome::Warning => "WARNING",
            CheckOutcome::Failure => "FAILURE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub outcome: CheckOutcome,
    pub details: Vec<String>,
}

impl CheckResult {
    pub fn ok(name: &str) -> Self {
        Self::new(name, CheckOutcome::Ok)
    }

    pub fn warning(name: &str) -> Self {
        Self::new(name, CheckOutcome::Warning)
    }

    pub fn failure(name: &str) -> Self {
        Self::new(name, CheckOutcome::Failure)
    }

    fn new(name: &str, outcome: CheckOutcome) -> Self {
        Self {
            name: name.to_string(),
            outcome,
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    pub fn with_details<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details.extend(lines.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub broker: String,
    pub started: String,
    pub finished: String,
    pub results: Vec<CheckResult>,
    pub overall: CheckOutcome,
}

impl Report {
    pub fn new(broker: &str, started: String, results: Vec<CheckResult>) -> Self {
        let overall = results
            .iter()
            .map(|r| r.outcome)
            .max()
            .unwrap_or(CheckOutcome::Ok);
        Self {
            broker: broker.to_string(),
            started,
            finished: now_rfc3339(),
            results,
            overall,
        }
    }

    // Warnings are informational; only a FAILURE fails the process.
    pub fn exit_code(&self) -> i32 {
        if self.overall == CheckOutcome::Failure {
            1
        } else {
            0
        }
    }

    pub fn tally(&self) -> (usize, usize, usize) {
        let mut ok = 0;
        let mut warnings = 0;
        let mut failures = 0;
        for r in &self.results {
            match r.outcome {
                CheckOutcome::Ok => ok += 1,
                CheckOutcome::Warning => warnings += 1,
                CheckOutcome::Failure => failures += 1,
            }
        }
        (ok, warnings, failures)
    }

    pub fn render_text(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();
        out.push_str(&format!("{rule}\n"));
        out.push_str(&format!("PIPELINE HEALTH CHECK ({})\n", self.broker));
        out.push_str(&format!("started {} / finished {}\n", self.started, self.finished));
        out.push_str(&format!("{rule}\n"));
        for r in &self.results {
            out.push_str(&format!("{} {}: {}\n", r.outcome.icon(), r.name, r.outcome));
            for line in &r.details {
                out.push_str(&format!("    {line}\n"));
            }
        }
        out.push_str(&format!("{rule}\n"));
        let (ok, warnings, failures) = self.tally();
        out.push_str(&format!(
            "overall: {} ({ok} ok, {warnings} warnings, {failures} failures)\n",
            self.overall
        ));
        out
    }
}
