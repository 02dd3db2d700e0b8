use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::remote::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of an API handler, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected input; the message is returned as is
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The hosted store failed or is unreachable
    #[error(transparent)]
    Upstream(#[from] StoreError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server-side causes stay in the log.
    fn public_message(self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg,
            ApiError::Upstream(err) => {
                error!(error = %err, "Remote store failure");
                "Remote store unavailable".to_string()
            }
            ApiError::Internal(err) => {
                error!(error = %format!("{err:#}"), "Internal server error");
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
