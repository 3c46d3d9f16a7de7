use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors a service handler can answer with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
    /// The body did not parse as JSON.
    #[error("{0}")]
    InvalidBody(String),
    #[error("Unsupported media type")]
    UnsupportedMediaType,
    #[error("Internal server error")]
    Internal,
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidBody(err.to_string())
    }
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, String) {
        match self {
            // Unknown routes and wrong methods answer with an empty 404.
            AppError::NotFound => (StatusCode::NOT_FOUND, String::new()),
            AppError::InvalidBody(detail) => {
                if cfg!(debug_assertions) {
                    (StatusCode::UNPROCESSABLE_ENTITY, detail.clone())
                } else {
                    (StatusCode::BAD_REQUEST, "Bad Request".to_string())
                }
            }
            AppError::UnsupportedMediaType => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string())
            }
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(%status, "request failed");
        }
        (status, body).into_response()
    }
}
