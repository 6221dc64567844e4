// Request handlers: validate, call exactly one external capability, reshape
// the result, map failures onto the error taxonomy.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::convert::{self, WATCH_URL_PREFIX};
use crate::extractor::{ExtractError, PlaylistInfo, SearchItem, VideoInfo};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

pub async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "yt-gateway is running!" }))
}

#[derive(Debug, Deserialize)]
pub struct ConvertBody {
    #[serde(rename = "youtubeUrl")]
    youtube_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    message: String,
    #[serde(rename = "webmUrl")]
    webm_url: String,
}

pub async fn convert(
    State(state): State<AppState>,
    Json(body): Json<ConvertBody>,
) -> ApiResult<Json<ConvertResponse>> {
    let url = body
        .youtube_url
        .ok_or_else(|| ApiError::InvalidRequest("YouTube URL is required.".to_string()))?;

    if !url.starts_with(WATCH_URL_PREFIX) {
        return Err(ApiError::InvalidRequest(
            "Invalid YouTube URL format.".to_string(),
        ));
    }

    match convert::convert_video(state.extractor.as_ref(), state.uploader.as_ref(), &url).await {
        Ok(outcome) => Ok(Json(ConvertResponse {
            message: "Video converted successfully!".to_string(),
            webm_url: outcome.webm_url,
        })),
        Err(e) => {
            tracing::error!(error = %e, %url, "conversion failed");
            Err(ApiError::ConversionFailed {
                details: e.to_string(),
            })
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<SearchItem>>> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("Search query is required.".to_string()))?;

    match state.extractor.search(&query, 10).await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            tracing::error!(error = %e, %query, "search failed");
            Err(ApiError::SearchFailed(e.to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UrlParams {
    url: Option<String>,
}

pub async fn video_info(
    State(state): State<AppState>,
    Query(params): Query<UrlParams>,
) -> ApiResult<Json<VideoInfo>> {
    let url = params
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("Video URL is required.".to_string()))?;

    match state.extractor.video_info(&url).await {
        Ok(info) => Ok(Json(info)),
        Err(ExtractError::NotFound(message)) => {
            tracing::warn!(%url, %message, "video not found");
            Err(ApiError::VideoNotFound(message))
        }
        Err(e) => {
            tracing::error!(error = %e, %url, "video info retrieval failed");
            Err(ApiError::InfoRetrievalFailed(e.to_string()))
        }
    }
}

pub async fn playlist_info(
    State(state): State<AppState>,
    Query(params): Query<UrlParams>,
) -> ApiResult<Json<PlaylistInfo>> {
    let url = params
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("Playlist URL is required.".to_string()))?;

    match state.extractor.playlist_info(&url).await {
        Ok(playlist) => Ok(Json(playlist)),
        Err(e) => {
            tracing::error!(error = %e, %url, "playlist info retrieval failed");
            Err(ApiError::PlaylistRetrievalFailed(e.to_string()))
        }
    }
}
