use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::ResolutionError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid slot \"{0}\"")]
    InvalidSlot(String),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSlot(_) => StatusCode::BAD_REQUEST,
            Self::Resolution(err) => match err {
                ResolutionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                ResolutionError::NotFound(_) => StatusCode::NOT_FOUND,
                ResolutionError::UpstreamUnavailable(_)
                | ResolutionError::Decode(_)
                | ResolutionError::DataIntegrity(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = ?self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = message.as_str(), "Request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
