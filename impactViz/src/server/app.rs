use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::branding::logos::LogoFetcher;
use crate::config::dashboard_config::DashboardConfig;
use crate::server::handlers;

/// Immutable state shared by every render pass
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub logos: Arc<LogoFetcher>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> anyhow::Result<Self> {
        let logos = LogoFetcher::new(&config).context("failed to build HTTP client")?;
        Ok(Self {
            config: Arc::new(config),
            logos: Arc::new(logos),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard_handler))
        .route("/download/:file", get(handlers::download_handler))
        .route("/api/metrics", get(handlers::metrics_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .with_state(state)
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Bind and serve the dashboard until SIGINT/SIGTERM
pub async fn serve(config: DashboardConfig) -> anyhow::Result<()> {
    let bind_address = config.bind_address.clone();
    let app = build_router(AppState::new(config)?);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    info!(address = %listener.local_addr()?, "dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("server error")?;

    info!("dashboard stopped");
    Ok(())
}
