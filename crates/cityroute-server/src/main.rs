#![allow(clippy::doc_markdown)]
//! CityRoute Server - REST API for the CityRoute path engine.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use cityroute_core::config::DEFAULT_CONFIG_FILE;
use cityroute_core::{RouteConfig, RouteService};
use cityroute_server::{build_router, cors_layer, AppState};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CityRoute Server - every simple path between two cities
#[derive(Parser, Debug)]
#[command(name = "cityroute-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "CITYROUTE_CONFIG")]
    config: PathBuf,

    /// Host address to bind to (overrides server.host)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file holding the distances (overrides storage.data_file)
    #[arg(short, long)]
    data_file: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<RouteConfig> {
        let mut config = RouteConfig::from_file(&self.config)?;
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data_file) = self.data_file {
            config.storage.data_file = Some(data_file);
        }
        config.validate()?;
        Ok(config)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!("{},tower_http=debug", config.logging.level))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CityRoute server...");
    let budget = config.search_budget();
    tracing::info!(
        max_paths = ?budget.max_paths,
        timeout = ?budget.timeout,
        "Path search budget"
    );

    let service = RouteService::from_config(&config)?;
    let status = service.cache_status();
    if status.is_degraded() {
        tracing::warn!(
            error = status.last_error.as_deref().unwrap_or_default(),
            "Initial graph load failed; starting with an empty cache"
        );
    } else {
        tracing::info!(
            cities = status.node_count,
            roads = status.edge_count,
            "Initial graph loaded"
        );
    }

    let state = Arc::new(AppState { service });
    let app = build_router(state)
        .layer(cors_layer(&config.server.cors_origins))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("CityRoute server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
