//! FastNext Dashboard — terminal rendition of the orchestrator health view.
//!
//! Mounts the dashboard once, prints the connecting view, waits for the
//! single health request to resolve and prints the result.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fnx_dashboard::config::{DashboardConfig, Layout, LogFormat};
use fnx_dashboard::{HealthDashboard, HttpHealthSource};

#[derive(Parser)]
#[command(name = "fnx-dashboard")]
#[command(about = "Show the health of the FastNext orchestrator backend", long_about = None)]
struct Cli {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend host, overriding the config file.
    #[arg(long, conflicts_with = "page_url")]
    host: Option<String>,

    /// Page URL whose hostname addresses the backend.
    #[arg(long)]
    page_url: Option<String>,

    /// Body layout: `fields` or `raw_json`.
    #[arg(long)]
    layout: Option<Layout>,

    /// Emit logs as JSON, overriding `log_format` in the config file.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Load config ─────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };

    // --json-logs wins over the config file.
    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        config.log_format
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    match log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "fnx-dashboard starting");

    if let Some(host) = cli.host {
        config.backend.host = Some(host);
        config.backend.page_url = None;
    }
    if let Some(page_url) = cli.page_url {
        config.backend.page_url = Some(page_url);
        config.backend.host = None;
    }
    if let Some(layout) = cli.layout {
        config.view.layout = layout;
    }

    let endpoint = config.backend.endpoint()?;
    tracing::info!(
        url = %endpoint,
        timeout_secs = ?config.backend.timeout_secs,
        "config loaded"
    );

    // ── Mount the view ──────────────────────────────────────────
    let source = HttpHealthSource::new(config.backend.timeout())?;
    let dashboard = HealthDashboard::new(endpoint, config.view, Arc::new(source));

    let mut view = dashboard.mount();
    println!("{}", view.render());

    let settled = tokio::select! {
        state = view.settled() => Some(state),
        _ = tokio::signal::ctrl_c() => None,
    };

    match settled {
        Some(state) => {
            tracing::debug!(ready = state.health().is_some(), "view settled");
            println!("{}", view.render());
        }
        None => tracing::info!("interrupted before the backend answered"),
    }

    view.unmount();
    tracing::info!("fnx-dashboard stopped");
    Ok(())
}
