use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::{AppError, FieldError};

pub const DEFAULT_LIMIT: u32 = 100;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RootMessage {
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Number of users to skip
    #[serde(default)]
    #[param(default = 0)]
    pub skip: u32,
    /// Maximum number of users to return
    #[serde(default = "default_limit")]
    #[param(default = 100)]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

// Error response struct
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

// Newtype wrapper for AppError to implement IntoResponse
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::InvalidInput(FieldError::new("body", rejection.body_text())))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::InvalidInput(FieldError::new("query", rejection.body_text())))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(AppError::InvalidInput(FieldError::new("path", rejection.body_text())))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, detail) = match self.0 {
            AppError::EmailAlreadyRegistered => (StatusCode::BAD_REQUEST, "Email already registered".to_string()),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AppError::InvalidInput(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("{}: {}", field.field, field.description),
            ),
            err @ (AppError::Database(_) | AppError::Migration(_)) => {
                error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}
