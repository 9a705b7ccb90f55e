use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the store layer. The request path does not retry:
/// a failed read or insert aborts the containing operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

/// The widget error taxonomy. Every failure leaving the router is one of
/// these, rendered as `{ "success": false, "error": { code, message } }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("only POST is accepted")]
    MethodNotAllowed,
    #[error("unknown action '{0}'")]
    InvalidAction(String),
    #[error("{0}")]
    InvalidPayload(String),
    #[error("{0}")]
    SearchFailed(#[source] StoreError),
    #[error("{0}")]
    HoldFailed(String),
    #[error("{0}")]
    ConfirmationFailed(#[source] StoreError),
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ApiError::InvalidAction(_) => "INVALID_ACTION",
            ApiError::InvalidPayload(_) => "INVALID_PAYLOAD",
            ApiError::SearchFailed(_) => "SEARCH_FAILED",
            ApiError::HoldFailed(_) => "HOLD_FAILED",
            ApiError::ConfirmationFailed(_) => "CONFIRMATION_FAILED",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidAction(_) | ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::SearchFailed(_)
            | ApiError::HoldFailed(_)
            | ApiError::ConfirmationFailed(_)
            | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (self.status(), Json(body)).into_response()
    }
}
