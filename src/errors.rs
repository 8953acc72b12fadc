use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

/// Error payload returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "success": false,
    "message": "Erro interno do servidor",
    "error": "Parâmetro 'days' deve estar entre 1 e 365"
}))]
pub struct ErrorResponse {
    pub success: bool,
    /// Human-readable description of what went wrong.
    #[schema(example = "Erro interno do servidor")]
    pub message: String,
    /// Short machine-oriented detail, omitted when it adds nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DataAccess(#[from] sea_orm::error::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DataAccess(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message suitable for HTTP responses. Internal failures collapse to a
    /// generic message so the response never leaks implementation detail.
    pub fn response_message(&self) -> String {
        match self {
            Self::DataAccess(_) | Self::Internal(_) => "Erro interno do servidor".to_string(),
            Self::NotFound(msg) => msg.clone(),
            Self::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            success: false,
            message: self.response_message(),
            error: match &self {
                ServiceError::Validation(msg) | ServiceError::NotFound(msg) => Some(msg.clone()),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ServiceError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::DataAccess(sea_orm::error::DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_do_not_leak_detail() {
        let err = ServiceError::DataAccess(sea_orm::error::DbErr::Custom("secret dsn".into()));
        assert_eq!(err.response_message(), "Erro interno do servidor");

        let err = ServiceError::Internal("stack trace".into());
        assert_eq!(err.response_message(), "Erro interno do servidor");
    }

    #[test]
    fn validation_errors_surface_their_message() {
        let err = ServiceError::Validation("dias fora do intervalo".into());
        assert_eq!(err.response_message(), "dias fora do intervalo");
    }
}
