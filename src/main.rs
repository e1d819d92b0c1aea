// Copyright 2025 Cowboy AI, LLC.

//! `workflow-engine` HTTP server

use anyhow::{Context, Result};
use cim_workflow_engine::api::{self, AppState};
use cim_workflow_engine::config::ServerConfig;
use cim_workflow_engine::telemetry::init_tracing;
use cim_workflow_engine::WorkflowStore;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// In-memory workflow engine with an HTTP JSON API
#[derive(Debug, Parser)]
#[command(name = "workflow-engine", version, about)]
struct Cli {
    /// Configuration file (defaults to ./workflow-engine.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served for non-API paths (empty disables)
    #[arg(long)]
    static_dir: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_filter: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = static_dir;
        }
        if let Some(log_filter) = self.log_filter {
            config.log_filter = log_filter;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_json = cli.log_json;

    let config = ServerConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let config = cli.apply(config);

    init_tracing(&config.log_filter, log_json).context("installing tracing subscriber")?;

    let addr = config
        .bind_addr()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;

    let state = AppState::new(Arc::new(WorkflowStore::new()), config.static_dir());
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, static_dir = %config.static_dir, "workflow engine listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("workflow engine stopped");
    Ok(())
}

/// Wait for Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => error!(error = %err, "failed to listen for shutdown signal"),
    }
}
