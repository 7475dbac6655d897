//! Server binary: configuration from the environment (and `.env`), lazy pool,
//! startup ping, graceful shutdown.

use shop_api::{app, AppConfig, AppState, PgStore, SqlStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shop_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store = PgStore::connect_lazy(&config.db);
    match store.fetch_all("SELECT 1", &[]).await {
        Ok(_) => tracing::info!(host = %config.db.host, database = %config.db.database, "database reachable"),
        Err(e) => tracing::error!(error = %e, "database unreachable at startup; serving anyway"),
    }

    let state = AppState::new(Arc::new(store), config.environment.exposes_error_detail());
    let router = app(state, config.body_limit_bytes);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("received ctrl-c, shutting down"),
        _ = terminate => tracing::warn!("received SIGTERM, shutting down"),
    }
}
