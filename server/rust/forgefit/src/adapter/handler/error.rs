use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;
use uuid::Uuid;

use crate::adapter::presenter::response::{ErrorDetail, ErrorResponse};
use crate::domain::entity::session::SessionRealm;
use crate::error::ServiceError;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn new(status: StatusCode, code: &str, message: &str) -> Self {
        Self {
            status,
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn not_found(code: &str, message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: &str, message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        Self::new(StatusCode::CONFLICT, code, message)
    }

    pub fn unauthorized(code: &str, message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn unprocessable(code: &str, message: &str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, code, message)
    }

    pub fn internal(code: &str, message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
    }

    /// セッションが無いか期限切れ。クライアントは details.redirect のログイン画面へ遷移する。
    pub fn session_required(realm: SessionRealm) -> Self {
        Self::unauthorized("SYS_FF_SESSION_REQUIRED", "Login required")
            .with_details(serde_json::json!({ "redirect": realm.login_path() }))
    }

    pub fn confirmation_required() -> Self {
        Self::bad_request(
            "SYS_FF_CONFIRMATION_REQUIRED",
            "Deletion must be confirmed with confirm=true",
        )
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
                request_id: Some(Uuid::new_v4().to_string()),
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                Self::unprocessable("SYS_FF_VALIDATION_FAILED", "Validation failed")
                    .with_details(serde_json::json!(errors))
            }
            ServiceError::NotFound(what) => Self::not_found("SYS_FF_NOT_FOUND", &format!("{what} not found")),
            ServiceError::Protected(id) => Self::conflict(
                "SYS_FF_COLUMN_PROTECTED",
                &format!("default column '{id}' cannot be deleted or have its type or required flag changed"),
            ),
            ServiceError::Rejected => Self::unauthorized("SYS_FF_INVALID_CREDENTIALS", "Invalid username or password"),
            ServiceError::PlanNotFound(id) => {
                Self::not_found("SYS_FF_PLAN_NOT_FOUND", &format!("plan '{id}' not found"))
            }
            ServiceError::InvalidInput(msg) => Self::bad_request("SYS_FF_INVALID_INPUT", &msg),
            ServiceError::Storage(e) => {
                error!(error = %e, "storage failure");
                Self::internal("SYS_FF_STORAGE_ERROR", "Storage failure")
            }
            ServiceError::Serialization(e) => {
                error!(error = %e, "serialization failure");
                Self::internal("SYS_FF_SERIALIZATION_ERROR", "Serialization failure")
            }
        }
    }
}
