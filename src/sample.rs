use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

// Per-invocation sampling state: owned by a single probe, dropped with it.
// `None` payloads are samples that failed to decode.
#[derive(Debug)]
pub struct SampleWindow {
    deadline: Instant,
    capacity: usize,
    counts: HashMap<String, u64>,
    samples: HashMap<String, Vec<Option<Value>>>,
}

impl SampleWindow {
    pub fn new<'a, I>(topics: I, window: Duration, capacity: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = HashMap::new();
        let mut samples = HashMap::new();
        for t in topics {
            counts.insert(t.to_string(), 0);
            samples.insert(t.to_string(), Vec::new());
        }
        // Config windows are arbitrary u64 seconds; cap instead of
        // overflowing the deadline arithmetic.
        let now = Instant::now();
        let deadline = now
            .checked_add(window)
            .unwrap_or_else(|| now + Duration::from_secs(86_400));
        Self {
            deadline,
            capacity,
            counts,
            samples,
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        let left = self.deadline.saturating_duration_since(Instant::now());
        if left.is_zero() { None } else { Some(left) }
    }

    pub fn record_count(&mut self, topic: &str) {
        *self.counts.entry(topic.to_string()).or_insert(0) += 1;
    }

    pub fn record_sample(&mut self, topic: &str, payload: Option<Value>) {
        self.record_count(topic);
        let bucket = self.samples.entry(topic.to_string()).or_default();
        if bucket.len() < self.capacity {
            bucket.push(payload);
        }
    }

    pub fn count(&self, topic: &str) -> u64 {
        self.counts.get(topic).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn samples(&self, topic: &str) -> &[Option<Value>] {
        self.samples.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }

    // Saturation requires every tracked topic to reach capacity, so one
    // quiet topic keeps the loop polling until the deadline.
    pub fn is_saturated(&self) -> bool {
        self.samples.values().all(|s| s.len() >= self.capacity)
    }
}
