#![forbid(unsafe_code)]

//! `embed-mcp`: MCP server binary.
//!
//! Loads configuration, builds the prompt and resource catalogs from the
//! bundled (or on-disk) content, and serves them over stdio.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use embed_mcp::catalog::{self, PromptCatalog, ResourceCatalog};
use embed_mcp::mcp::{transport, EmbedServer};
use embed_mcp::{store, AppError, CatalogConfig, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "embed-mcp", about = "MCP server for bundled prompts and resources", version, long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated list of prompts to load.
    #[arg(long)]
    prompts: Option<String>,

    /// Comma-separated list of resources to load.
    #[arg(long)]
    resources: Option<String>,

    /// Serve content from this directory instead of the bundled content.
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Print the catalogs as JSON and exit instead of serving.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("embed-mcp server bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let config = load_config(&args)?;
    debug!(
        prompts = ?config.filters.prompts,
        resources = ?config.filters.resources,
        "filters configured"
    );

    // ── Build catalogs ──────────────────────────────────
    let content = store::open(config.content_dir.as_deref())?;
    let prompts = catalog::or_empty(
        "prompts",
        PromptCatalog::new(Arc::clone(&content)).build(&config.prompt_filter()),
    );
    let resources = catalog::or_empty(
        "resources",
        ResourceCatalog::new(Arc::clone(&content)).build(&config.resource_filter()),
    );

    if args.list {
        let listing = serde_json::to_string_pretty(&catalog::listing(&prompts, &resources))
            .map_err(|err| AppError::Io(format!("failed to render listing: {err}")))?;
        println!("{listing}");
        return Ok(());
    }

    // ── Register and serve ──────────────────────────────
    let server = EmbedServer::new()
        .with_prompts(prompts)
        .with_resources(resources);
    info!("all prompts and resources registered");

    let ct = CancellationToken::new();
    let signal_ct = ct.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        signal_ct.cancel();
    });

    transport::serve_stdio(server, ct).await?;
    info!("embed-mcp shut down");

    Ok(())
}

fn load_config(args: &Cli) -> Result<CatalogConfig> {
    let mut config = match &args.config {
        Some(path) => CatalogConfig::load_from_path(path)?,
        None => CatalogConfig::default(),
    };

    if let Some(list) = &args.prompts {
        config.override_prompts(list);
    }
    if let Some(list) = &args.resources {
        config.override_resources(list);
    }
    if let Some(dir) = &args.content_dir {
        config.override_content_dir(dir.clone())?;
    }

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
