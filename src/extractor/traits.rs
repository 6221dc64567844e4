// Extraction capability seam

use std::path::Path;

use async_trait::async_trait;

use super::errors::ExtractError;
use super::models::{PlaylistInfo, SearchItem, VideoInfo};

/// The external extraction capability the handlers call. One implementation
/// shells out to the yt-dlp binary; tests substitute their own.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Name of the implementation (for logging)
    fn name(&self) -> &'static str;

    /// Fetch single-video metadata without downloading any media
    async fn video_info(&self, url: &str) -> Result<VideoInfo, ExtractError>;

    /// Text search capped at `limit` results
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchItem>, ExtractError>;

    /// Parse a playlist page into metadata plus per-video summaries
    async fn playlist_info(&self, url: &str) -> Result<PlaylistInfo, ExtractError>;

    /// Download the best webm video+audio streams for a single video, merged
    /// into one file at `dest`
    async fn download_webm(&self, url: &str, dest: &Path) -> Result<(), ExtractError>;
}
