mod cli;

use crate::cli::CLI;
use anyhow::Context;
use burrow_gateway::Gateway;
use clap::Parser;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    burrow_telemetry::init(config.log_format.into()).context("failed to initialize tracing")?;

    let settings = config.settings();
    info!(
        listen_addr = %settings.listen_addr,
        base_url = %settings.base_url,
        storage_path = ?settings.storage_path,
        log_format = %config.log_format,
        "starting burrow gateway"
    );

    let gateway = Gateway::bind(&settings)
        .await
        .context("failed to start gateway")?;

    gateway
        .serve(shutdown_signal())
        .await
        .context("gateway server failed")?;

    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
