// Response value objects returned by the gateway.
//
// Each is a bounded projection of the much larger metadata blob yt-dlp
// produces; fields the upstream omits get explicit defaults instead of
// trusting the upstream schema to stay stable.

use serde::{Deserialize, Serialize};

/// Filtered single-video metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub uploader: String,
    pub thumbnail: String,
    pub duration: Option<u64>,
    pub view_count: Option<u64>,
    pub upload_date: Option<String>,
    pub webpage_url: String,
    /// Direct media URLs, filtered to mp4 entries that actually carry video
    pub formats: Vec<String>,
}

/// One search hit. Serialized with a `type` discriminant so the two variants
/// land in the same JSON array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchItem {
    Video {
        title: String,
        id: String,
        url: String,
        thumbnail: String,
        duration: Option<u64>,
        views: Option<u64>,
        author: String,
    },
    Playlist {
        title: String,
        id: String,
        url: String,
        thumbnail: String,
        video_count: Option<u64>,
        author: String,
    },
}

/// Playlist metadata plus one summary per contained video, upstream order
/// preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub video_count: u64,
    pub videos: Vec<VideoSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    pub duration: Option<u64>,
    pub author: String,
}

/// Fallback author when the upstream result carries no channel information.
pub const UNKNOWN_AUTHOR: &str = "Unknown";
