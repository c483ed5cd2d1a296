use crate::{config::Config, harness::Harness, probes, util::ensure_dir};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stream-check")]
#[command(about = "Kafka pipeline health checks (topology + traffic + schema + dashboard)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./stream-check.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override broker address (host:port).
    #[arg(long)]
    pub broker: Option<String>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Run {
        #[arg(long)]
        duration: Option<u64>,
        #[arg(long)]
        sample_size: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    Topics {
        #[arg(long)]
        json: bool,
    },
}

pub fn dispatch(args: Args) -> Result<i32> {
    let cfg_path = resolve_config_path(args.config.as_deref())?;
    let mut cfg = Config::load(&cfg_path)?;
    if let Some(broker) = &args.broker {
        cfg.broker.bootstrap_servers = broker.clone();
    }

    match &args.cmd {
        Command::Run {
            duration,
            sample_size,
            json,
        } => {
            if let Some(secs) = duration {
                cfg.sampling.window_secs = *secs;
            }
            if let Some(n) = sample_size {
                cfg.schema.sample_size = *n;
            }
            let log_path = resolve_log_path(&cfg);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            run(&cfg, *json || cfg.output.json)
        }
        Command::Topics { json } => {
            let log_path = resolve_log_path(&cfg);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            topics(&cfg, *json)
        }
    }
}

fn resolve_config_path(user: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = user {
        return Ok(p.to_path_buf());
    }
    let default = PathBuf::from("stream-check.toml");
    if default.exists() {
        Ok(default)
    } else {
        Ok(PathBuf::from("stream-check.example.toml"))
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr; stdout carries only the rendered report.
    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn run(cfg: &Config, json: bool) -> Result<i32> {
    info!(
        "checking pipeline at {} ({} required topics)",
        cfg.broker.bootstrap_servers,
        cfg.topics.len()
    );
    let harness = Harness::new(cfg);
    let report = harness.run();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(report.exit_code())
}

fn topics(cfg: &Config, json: bool) -> Result<i32> {
    let topics = probes::list_topics(cfg)?;
    if json {
        let entries: Vec<_> = topics
            .iter()
            .map(|(name, partitions)| serde_json::json!({ "name": name, "partitions": partitions }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "broker": cfg.broker.bootstrap_servers,
                "topics": entries,
            }))?
        );
    } else {
        for (name, partitions) in &topics {
            println!("{name} ({partitions} partitions)");
        }
    }
    Ok(0)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    Some(PathBuf::from("stream-check.log"))
}
