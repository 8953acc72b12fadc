use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    errors::ServiceError,
    notifications::{Notification, NotificationSummary},
    AppState,
};

/// Build the notifications Router scoped under `/api/v1/notifications`.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/summary", get(notification_summary))
        .route("/:id/read", post(mark_notification_read))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationListResponse {
    pub success: bool,
    pub notifications: Vec<Notification>,
    pub summary: NotificationSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationSummaryResponse {
    pub success: bool,
    pub summary: NotificationSummary,
    #[serde(rename = "hasNotifications")]
    pub has_notifications: bool,
    #[serde(rename = "urgentCount")]
    pub urgent_count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkReadResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "notificationId")]
    pub notification_id: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Active notifications sorted by severity", body = NotificationListResponse)
    ),
    tag = "Notifications"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<NotificationListResponse>, ServiceError> {
    let snapshot = state.notification_service.notifications().await;
    let summary = state.notification_service.summary().await;

    Ok(Json(NotificationListResponse {
        success: true,
        notifications: snapshot.as_ref().clone(),
        summary,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/summary",
    responses(
        (status = 200, description = "Severity counts for the dashboard badge", body = NotificationSummaryResponse)
    ),
    tag = "Notifications"
)]
pub async fn notification_summary(
    State(state): State<AppState>,
) -> Result<Json<NotificationSummaryResponse>, ServiceError> {
    let summary = state.notification_service.summary().await;

    Ok(Json(NotificationSummaryResponse {
        success: true,
        has_notifications: summary.total > 0,
        urgent_count: summary.critical + summary.high,
        summary,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    params(
        ("id" = String, Path, description = "Notification id, e.g. low-stock-7")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = MarkReadResponse),
        (status = 404, description = "Unknown notification id", body = crate::errors::ErrorResponse)
    ),
    tag = "Notifications"
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MarkReadResponse>, ServiceError> {
    state.notification_service.mark_read(&id).await?;

    Ok(Json(MarkReadResponse {
        success: true,
        message: "Notificação marcada como lida".to_string(),
        notification_id: id,
    }))
}
