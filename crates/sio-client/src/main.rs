//! Socket.IO receive-path client: entry point.
//!
//! Connects to a Socket.IO server (or replays a recorded capture), decodes
//! every inbound packet for one namespace and logs the dispatched events.
//!
//! # Usage
//!
//! ```text
//! sio-client [OPTIONS]
//!
//! Options:
//!   --config    <PATH>   TOML config file [default: sio-client.toml]
//!   --url       <URL>    Engine.IO WebSocket endpoint
//!   --namespace <NS>     Namespace to join
//!   --log-level <LEVEL>  Log filter used when RUST_LOG is unset
//!   --replay    <PATH>   Replay a JSON-lines capture instead of connecting
//! ```
//!
//! Settings are layered: defaults, then the config file, then environment
//! variables (`SIO_URL`, `SIO_NAMESPACE`, `SIO_LOG`), then flags.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sio_client::domain::config::normalize_namespace;
use sio_client::domain::{ClientConfig, ClientEvent};
use sio_client::infrastructure::{load_config, replay_file, run_session};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Socket.IO receive-path client.
#[derive(Debug, Parser)]
#[command(
    name = "sio-client",
    about = "Decodes and dispatches inbound Socket.IO packets for one namespace",
    version
)]
struct Cli {
    /// Path of the TOML config file.  A missing file means defaults.
    #[arg(long, default_value = "sio-client.toml")]
    config: PathBuf,

    /// WebSocket URL of the Engine.IO endpoint.
    #[arg(long, env = "SIO_URL")]
    url: Option<String>,

    /// Namespace to join, e.g. `/chat`.
    #[arg(long, env = "SIO_NAMESPACE")]
    namespace: Option<String>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "SIO_LOG")]
    log_level: Option<String>,

    /// Replay this capture file instead of connecting.
    #[arg(long)]
    replay: Option<PathBuf>,
}

impl Cli {
    /// Applies the command-line overrides on top of `config`.
    fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.namespace = normalize_namespace(&config.namespace);
        config
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let config = cli.apply(config);

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if let Some(path) = &cli.replay {
        return run_replay(path, &config);
    }

    info!(url = %config.url, namespace = %config.namespace, "sio-client starting");

    let (tx, mut rx) = mpsc::channel(config.event_buffer.max(1));
    let consumer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            log_event(&event);
        }
    });

    tokio::select! {
        result = run_session(&config, tx) => {
            let summary = result.context("session failed")?;
            if summary.discarded > 0 {
                warn!(discarded = summary.discarded, "some frames were discarded");
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("received Ctrl+C, shutting down");
        }
    }

    // The sender is dropped with the session future, which ends the consumer.
    if let Err(e) = consumer.await {
        warn!("event consumer task failed: {e}");
    }
    info!("sio-client stopped");
    Ok(())
}

fn run_replay(path: &std::path::Path, config: &ClientConfig) -> anyhow::Result<()> {
    let report = replay_file(path, &config.namespace)
        .with_context(|| format!("replaying {}", path.display()))?;
    for event in &report.events {
        log_event(event);
    }
    if report.incomplete > 0 {
        warn!(
            incomplete = report.incomplete,
            "capture ended before all attachments arrived"
        );
    }
    Ok(())
}

fn log_event(event: &ClientEvent) {
    match event {
        ClientEvent::Connected | ClientEvent::Disconnected { .. } => {
            info!(kind = event.label(), ?event, "namespace state changed");
        }
        _ => info!(kind = event.label(), ?event, "event"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
