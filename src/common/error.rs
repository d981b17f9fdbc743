use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Stable classification returned to callers alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    PermissionDenied,
    InsufficientStock,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::InsufficientStock => "insufficient_stock",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{}", .0.body_text())]
    JsonRejection(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    PathRejection(#[from] PathRejection),

    #[error("{}", .0.body_text())]
    QueryRejection(#[from] QueryRejection),

    #[error("{0}")]
    Conflict(String),

    // Also used for resources that exist in another organization.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("Insufficient stock. Available: {available}, requested: {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Invalid or missing authentication token")]
    InvalidToken,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        AppError::PermissionDenied(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            // Missing path params means the route and handler disagree.
            AppError::PathRejection(PathRejection::MissingPathParams(_)) => ErrorKind::Internal,
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::JsonRejection(_)
            | AppError::PathRejection(_)
            | AppError::QueryRejection(_) => ErrorKind::Validation,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            AppError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            AppError::InvalidCredentials | AppError::InvalidToken => ErrorKind::Unauthorized,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict | ErrorKind::InsufficientStock => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind().as_str();

        let body = match &self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "error": "One or more fields are invalid.",
                    "kind": kind,
                    "details": details,
                })
            }
            e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                // Logged with full context, never echoed.
                tracing::error!(error = %e, "internal server error");
                json!({ "error": "An unexpected error occurred.", "kind": kind })
            }
            e => json!({ "error": e.to_string(), "kind": kind }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_expected_status_codes() {
        let cases = [
            (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("dup".into()), StatusCode::CONFLICT),
            (AppError::NotFound("Stock item"), StatusCode::NOT_FOUND),
            (AppError::permission_denied("no"), StatusCode::FORBIDDEN),
            (AppError::InsufficientStock { available: 1, requested: 2 }, StatusCode::CONFLICT),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AppError::InternalServerError(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err:?}");
        }
    }

    #[test]
    fn insufficient_stock_message_reports_availability() {
        let err = AppError::InsufficientStock { available: 3, requested: 5 };
        assert_eq!(err.kind().as_str(), "insufficient_stock");
        assert!(err.to_string().contains("Available: 3"));
    }

    #[test]
    fn not_found_does_not_mention_tenant() {
        let err = AppError::NotFound("Shipment");
        assert_eq!(err.to_string(), "Shipment not found");
    }

    #[test]
    fn response_carries_status() {
        let response = AppError::permission_denied("nope").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
