//! Shared fixtures: an in-memory SQLite database, seed helpers and a small
//! JSON request harness over the full router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use tower::util::ServiceExt;

use compras_api::{
    config::AppConfig,
    entities::{order, product, quote, supplier},
    schema, AppState,
};

/// Fresh application state over an isolated in-memory database.
///
/// The pool is pinned to a single connection; each SQLite `:memory:`
/// connection is its own database, so a larger pool would scatter the tables.
pub async fn test_state() -> AppState {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("connect to in-memory sqlite");
    schema::ensure_schema(&db).await.expect("create schema");

    let config = AppConfig::new(
        "sqlite::memory:".into(),
        "127.0.0.1".into(),
        0,
        "test".into(),
    );
    AppState::new(Arc::new(db), config)
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (compras_api::app_router(state.clone()), state)
}

pub async fn insert_supplier(db: &DatabaseConnection, id: i32, name: &str, status: &str) {
    supplier::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        email: Set(None),
        phone: Set(None),
        status: Set(status.to_string()),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
    .expect("insert supplier");
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_product(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    category: &str,
    price: f64,
    stock: i32,
    min_stock: i32,
    supplier_id: Option<i32>,
    status: &str,
) {
    product::ActiveModel {
        id: Set(id),
        code: Set(format!("PRD-{id:04}")),
        name: Set(name.to_string()),
        description: Set(None),
        category: Set(category.to_string()),
        price: Set(price),
        stock: Set(stock),
        min_stock: Set(min_stock),
        supplier_id: Set(supplier_id),
        status: Set(status.to_string()),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
    .expect("insert product");
}

pub async fn insert_order(
    db: &DatabaseConnection,
    id: i32,
    supplier_id: i32,
    order_date: DateTime<Utc>,
    status: &str,
    total_value: f64,
) {
    insert_order_received(db, id, supplier_id, order_date, status, total_value, None).await;
}

pub async fn insert_order_received(
    db: &DatabaseConnection,
    id: i32,
    supplier_id: i32,
    order_date: DateTime<Utc>,
    status: &str,
    total_value: f64,
    received_date: Option<DateTime<Utc>>,
) {
    order::ActiveModel {
        id: Set(id),
        number: Set(format!("PED-{id:04}")),
        supplier_id: Set(supplier_id),
        order_date: Set(order_date),
        delivery_date: Set(None),
        received_date: Set(received_date),
        status: Set(status.to_string()),
        total_value: Set(total_value),
        created_at: Set(order_date),
        updated_at: Set(None),
    }
    .insert(db)
    .await
    .expect("insert order");
}

pub async fn insert_quote(
    db: &DatabaseConnection,
    id: i32,
    supplier_id: i32,
    status: &str,
    expected_date: Option<DateTime<Utc>>,
    total_value: f64,
) {
    quote::ActiveModel {
        id: Set(id),
        number: Set(format!("COT-{id:04}")),
        supplier_id: Set(supplier_id),
        status: Set(status.to_string()),
        request_date: Set(Utc::now()),
        expected_date: Set(expected_date),
        total_value: Set(total_value),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
    .expect("insert quote");
}

pub async fn get_json(app: &Router, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("send request");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("send request");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
