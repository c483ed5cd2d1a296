use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub broker: Broker,
    #[serde(default = "default_topics")]
    pub topics: Vec<TopicSpec>,
    #[serde(default)]
    pub sampling: Sampling,
    #[serde(default)]
    pub schema: Schema,
    #[serde(default)]
    pub service: Service,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub output: Output,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    pub fn topic_names(&self) -> Vec<&str> {
        self.topics.iter().map(|t| t.name.as_str()).collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broker: Default::default(),
            topics: default_topics(),
            sampling: Default::default(),
            schema: Default::default(),
            service: Default::default(),
            logging: Default::default(),
            output: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broker {
    pub bootstrap_servers: String,
    pub connect_timeout_secs: u64,
}
impl Broker {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
impl Default for Broker {
    fn default() -> Self {
        Self {
            bootstrap_servers: "localhost:9092".into(),
            connect_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSpec {
    pub name: String,
    pub partitions: u32,
    pub required_fields: Vec<String>,
}

fn default_topics() -> Vec<TopicSpec> {
    fn spec(name: &str, partitions: u32, fields: &[&str]) -> TopicSpec {
        TopicSpec {
            name: name.into(),
            partitions,
            required_fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
    vec![
        spec("reddit_stream", 3, &["id", "title", "author", "timestamp"]),
        spec("twitter_stream", 3, &["id", "text", "author", "timestamp"]),
        spec(
            "iot_sensors",
            5,
            &["sensor_id", "sensor_type", "timestamp", "metrics"],
        ),
        spec("news_feed", 2, &["id", "title", "source", "timestamp"]),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sampling {
    pub window_secs: u64,
    pub poll_timeout_ms: u64,
    pub group_id: String,
}
impl Sampling {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}
impl Default for Sampling {
    fn default() -> Self {
        Self {
            window_secs: 20,
            poll_timeout_ms: 1000,
            group_id: "stream-check".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub sample_size: usize,
    pub timeout_secs: u64,
}
impl Schema {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
impl Default for Schema {
    fn default() -> Self {
        Self {
            sample_size: 5,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub url: String,
    pub timeout_secs: u64,
}
impl Service {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
impl Default for Service {
    fn default() -> Self {
        Self {
            url: "http://localhost:8505".into(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub json: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self { json: false }
    }
}
