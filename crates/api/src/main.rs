use std::path::PathBuf;

use clap::Parser;
use shelf_api::{AppState, Settings};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Personal book tracking server.
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    /// Settings file; defaults to `shelf.toml` when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listening port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .init();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    let state = AppState::from_settings(&settings).await?;
    let app = shelf_api::router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind_address()).await?;
    info!("Shelf listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shelf stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
