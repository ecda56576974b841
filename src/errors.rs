use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("booking date cannot be in the past")]
    InvalidDate,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("booking not found: {0}")]
    NotFound(i64),

    #[error("a booking already exists for vehicle {0}")]
    DuplicateVehicle(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidDate => StatusCode::BAD_REQUEST,
            ApiError::EmptyField(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateVehicle(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
