// Conversion workflow: download the best webm streams for one video into a
// request-scoped temp directory, upload the merged file, and clean up on
// every exit path.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::extractor::{ExtractError, MediaExtractor};
use crate::storage::{UploadError, Uploader};

/// Canonical single-video watch-URL prefix. Anything else is rejected before
/// any subprocess or storage call happens.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

lazy_static! {
    static ref VIDEO_ID_RE: Regex =
        Regex::new(r"^https://www\.youtube\.com/watch\?v=([A-Za-z0-9_-]+)").unwrap();
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Extract(#[from] ExtractError),

    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("temp dir error: {0}")]
    TempDir(std::io::Error),
}

pub struct ConversionOutcome {
    pub webm_url: String,
}

/// Content identifier from the `v=` query parameter, or None when the URL
/// does not match the canonical prefix.
pub fn video_id_from_url(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Globally unique output filename: content id plus a fresh random token, so
/// concurrent conversions of the same video never collide.
pub fn unique_webm_name(video_id: &str) -> String {
    format!("{}-{}.webm", video_id, Uuid::new_v4())
}

/// Run the full download-and-upload sequence. The temp directory is removed
/// when this function returns, whichever step failed.
pub async fn convert_video(
    extractor: &dyn MediaExtractor,
    uploader: &dyn Uploader,
    url: &str,
) -> Result<ConversionOutcome, ConvertError> {
    let video_id = video_id_from_url(url).unwrap_or("video");
    let filename = unique_webm_name(video_id);

    let tmpdir = tempfile::tempdir().map_err(ConvertError::TempDir)?;
    let dest = tmpdir.path().join(&filename);

    tracing::info!(%url, file = %filename, "starting conversion");

    let result = async {
        extractor.download_webm(url, &dest).await?;
        let webm_url = uploader.upload(&dest, &filename).await?;
        Ok(ConversionOutcome { webm_url })
    }
    .await;

    // TempDir would clean up on drop anyway; closing explicitly surfaces
    // deletion failures in the log instead of swallowing them.
    if let Err(e) = tmpdir.close() {
        tracing::warn!(error = %e, "failed to remove temp dir");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_extraction() {
        assert_eq!(
            video_id_from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        // Trailing query parameters are not part of the id
        assert_eq!(
            video_id_from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_video_id_rejects_other_urls() {
        assert_eq!(video_id_from_url("https://youtu.be/dQw4w9WgXcQ"), None);
        assert_eq!(video_id_from_url("https://example.com/watch?v=x"), None);
    }

    #[test]
    fn test_unique_names_do_not_collide() {
        let a = unique_webm_name("dQw4w9WgXcQ");
        let b = unique_webm_name("dQw4w9WgXcQ");
        assert_ne!(a, b);
        assert!(a.starts_with("dQw4w9WgXcQ-"));
        assert!(a.ends_with(".webm"));
    }
}
