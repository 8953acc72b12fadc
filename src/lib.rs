pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod notifications;
pub mod openapi;
pub mod reports;
pub mod schema;
pub mod scoring;
pub mod services;

use axum::{extract::State, response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::{NotificationService, ReportService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub report_service: ReportService,
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        Self {
            report_service: ReportService::new(db.clone()),
            notification_service: NotificationService::new(db.clone()),
            db,
            config,
        }
    }
}

/// Versioned API routes, mounted under `/api/v1`.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/reports", handlers::reports::report_routes())
        .nest("/notifications", handlers::notifications::notification_routes())
}

/// Full application router: API, status endpoints and Swagger UI.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "compras-api up" }))
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn api_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "compras-api",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    Json(json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
