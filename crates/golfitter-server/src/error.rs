use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use golfitter_media::NavigationError;
use golfitter_shared::UploadError;
use golfitter_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Upload(e @ UploadError::UnsupportedFormat { .. }) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, e.user_message().to_string())
            }
            ServerError::Upload(e @ UploadError::FileTooLarge { .. }) => {
                (StatusCode::PAYLOAD_TOO_LARGE, e.user_message().to_string())
            }
            ServerError::Navigation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Store(StoreError::DuplicateId(_)) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            ServerError::Store(e) => {
                tracing::error!(error = %e, "Storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error, please retry".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
