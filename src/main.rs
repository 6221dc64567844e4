// Gateway entry point

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_gateway::config::Config;
use yt_gateway::extractor::YtDlp;
use yt_gateway::server::{build_app, AppState};
use yt_gateway::storage::{HttpUploader, SimulatedUploader, Uploader};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,yt_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let extractor = Arc::new(YtDlp::new(&config));

    let uploader: Arc<dyn Uploader> = match (&config.upload_endpoint, &config.public_base_url) {
        (Some(endpoint), Some(public_base)) => {
            tracing::info!(%endpoint, "using HTTP uploader");
            Arc::new(HttpUploader::new(endpoint.clone(), public_base.clone()))
        }
        _ => {
            tracing::warn!("no upload endpoint configured, uploads are simulated");
            Arc::new(SimulatedUploader)
        }
    };

    let app = build_app(
        AppState {
            extractor,
            uploader,
        },
        &config.allowed_origins,
    );

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "yt-gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    } else {
        tracing::info!("shutdown signal received");
    }
}
