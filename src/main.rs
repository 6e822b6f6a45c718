//! BigCache command-line client
//!
//! Runs single cache operations against the remote service configured via
//! `BIGCACHE_HOST` / `BIGCACHE_PORT`.

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bigcache_client::{ClientConfig, RemoteCacheStore, Store, DEFAULT_STEP};

const USAGE: &str = "\
usage: bigcache <command>

commands:
  get <key>
  many <key>...
  put <key> <value> [ttl-seconds]
  forever <key> <value>
  incr <key> [delta]
  decr <key> [delta]
  forget <key>
  flush";

/// Lifetime used by `put` when none is given.
const DEFAULT_PUT_TTL: i64 = 60;

/// A single parsed invocation.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Get(String),
    Many(Vec<String>),
    Put { key: String, value: String, ttl: i64 },
    Forever { key: String, value: String },
    Increment { key: String, delta: i64 },
    Decrement { key: String, delta: i64 },
    Forget(String),
    Flush,
}

impl Command {
    fn parse(args: &[String]) -> Option<Self> {
        let (name, rest) = args.split_first()?;
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("get", [key]) => Command::Get(key.to_string()),
            ("many", keys) if !keys.is_empty() => {
                Command::Many(keys.iter().map(|k| k.to_string()).collect())
            }
            ("put", [key, value]) => Command::Put {
                key: key.to_string(),
                value: value.to_string(),
                ttl: DEFAULT_PUT_TTL,
            },
            ("put", [key, value, ttl]) => Command::Put {
                key: key.to_string(),
                value: value.to_string(),
                ttl: ttl.parse().ok()?,
            },
            ("forever", [key, value]) => Command::Forever {
                key: key.to_string(),
                value: value.to_string(),
            },
            ("incr", [key]) => Command::Increment {
                key: key.to_string(),
                delta: DEFAULT_STEP,
            },
            ("incr", [key, delta]) => Command::Increment {
                key: key.to_string(),
                delta: delta.parse().ok()?,
            },
            ("decr", [key]) => Command::Decrement {
                key: key.to_string(),
                delta: DEFAULT_STEP,
            },
            ("decr", [key, delta]) => Command::Decrement {
                key: key.to_string(),
                delta: delta.parse().ok()?,
            },
            ("forget", [key]) => Command::Forget(key.to_string()),
            ("flush", []) => Command::Flush,
            _ => return None,
        };
        Some(command)
    }
}

/// Runs the command and returns the line to print.
async fn run(store: &impl Store, command: Command) -> anyhow::Result<String> {
    let output = match command {
        Command::Get(key) => store.get(&key).await.unwrap_or_else(|| "(nil)".to_string()),
        Command::Many(keys) => store
            .many(&keys)
            .await
            .into_iter()
            .zip(&keys)
            .map(|(value, key)| format!("{}: {}", key, value.as_deref().unwrap_or("(nil)")))
            .collect::<Vec<_>>()
            .join("\n"),
        Command::Put { key, value, ttl } => store.put(&key, &value, ttl).await.to_string(),
        Command::Forever { key, value } => store.forever(&key, &value).await.to_string(),
        Command::Increment { key, delta } => store
            .increment(&key, delta)
            .await
            .with_context(|| format!("failed to increment '{}'", key))?
            .to_string(),
        Command::Decrement { key, delta } => store
            .decrement(&key, delta)
            .await
            .with_context(|| format!("failed to decrement '{}'", key))?
            .to_string(),
        Command::Forget(key) => store.forget(&key).await.to_string(),
        Command::Flush => store.flush().await.to_string(),
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so command output stays scriptable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bigcache_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = Command::parse(&args) else {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    };

    let config = ClientConfig::from_env();
    info!(
        "Configuration loaded: host={}, port={}, timeout={}s",
        config.host, config.port, config.timeout_secs
    );

    let store = RemoteCacheStore::from_config(&config).context("failed to build cache client")?;
    println!("{}", run(&store, command).await?);

    Ok(ExitCode::SUCCESS)
}
