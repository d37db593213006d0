// translate-gateway - HTTP gateway for Google Translate
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use translate_gateway::cli::Args;
use translate_gateway::config::AppConfig;
use translate_gateway::server::create_router;
use translate_gateway::translation::GoogleTranslateHandler;
use translate_gateway::utils::logging;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load(args.config.as_deref())?.with_overrides(args.host, args.port);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting translate-gateway v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .enable_all()
        .build()?;

    runtime.block_on(run(config))
}

async fn run(config: AppConfig) -> Result<()> {
    if config.access_token().is_some() {
        info!("Access token configured, /translate requires authentication");
    } else {
        warn!("No access token configured, /translate is open to everyone");
    }

    // Phase 4: Upstream client and router
    let handler = GoogleTranslateHandler::new(&config.upstream)?;
    info!("Using Google Translate at {}", config.upstream.api_base_url);
    let app = create_router(&config, Arc::new(handler));

    // Phase 5: Bind. A failed bind is fatal.
    let host = config.server.host.as_str();
    let port = config.server.port;
    let listener = match TcpListener::bind((host, port)).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to listen on {}:{}: {}", host, port, e);
            std::process::exit(1);
        }
    };
    info!("Server running on {}:{}", host, port);

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
