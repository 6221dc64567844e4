// HTTP error taxonomy
//
// Every upstream failure is caught at the handler boundary and converted to
// one of these; nothing propagates as a raw server error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input (400)
    InvalidRequest(String),

    /// Upstream reports the video as absent, private or inaccessible (404)
    VideoNotFound(String),

    /// Download, mux or upload step failed (500); `details` carries the raw
    /// upstream error text
    ConversionFailed { details: String },

    /// Search upstream failed (500)
    SearchFailed(String),

    /// Metadata extraction failed for a reason other than not-found (500)
    InfoRetrievalFailed(String),

    /// Playlist parsing failed (500)
    PlaylistRetrievalFailed(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::VideoNotFound(_) => StatusCode::NOT_FOUND,
            Self::ConversionFailed { .. }
            | Self::SearchFailed(_)
            | Self::InfoRetrievalFailed(_)
            | Self::PlaylistRetrievalFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            Self::InvalidRequest(message) => serde_json::json!({ "error": message }),
            Self::VideoNotFound(message) => serde_json::json!({ "error": message }),
            Self::ConversionFailed { details } => serde_json::json!({
                "error": "Failed to convert video.",
                "details": details,
            }),
            Self::SearchFailed(message) => serde_json::json!({ "error": message }),
            Self::InfoRetrievalFailed(message) => serde_json::json!({ "error": message }),
            Self::PlaylistRetrievalFailed(message) => serde_json::json!({ "error": message }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
