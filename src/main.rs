use std::{sync::Arc, time::Duration};

use anyhow::Context;
use http::HeaderValue;
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};
use tracing::{info, warn};

use compras_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(&cfg.log_level, cfg.log_json);

    let db_pool = api::db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to establish database connection")?;
    api::schema::ensure_schema(&db_pool)
        .await
        .context("failed to prepare database schema")?;

    let state = api::AppState::new(Arc::new(db_pool), cfg.clone());

    // First refresh happens before serving so the list is never empty just
    // because the poller has not ticked yet.
    if let Err(err) = state.notification_service.refresh().await {
        warn!(error = %err, "Initial notification refresh failed");
    }
    let poller = state
        .notification_service
        .spawn_poller(Duration::from_secs(cfg.notification_poll_secs));

    let app = api::app_router(state)
        .layer(build_cors_layer(&cfg))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)));

    let addr = cfg.server_addr();
    info!("compras-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.abort();
    Ok(())
}

fn build_cors_layer(cfg: &api::config::AppConfig) -> CorsLayer {
    let configured_origins = cfg
        .cors_allowed_origins
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    match configured_origins {
        Some(origins) => CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
        None => {
            if cfg.is_production() {
                warn!("No CORS origins configured; set APP__CORS_ALLOWED_ORIGINS in production");
            }
            CorsLayer::permissive()
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
