// yt-dlp CLI adapter
//
// Every operation shells out to the yt-dlp binary and projects its JSON
// output into the bounded models. Nothing here caches or retries beyond the
// retry flags passed to yt-dlp itself.

use std::path::Path;
use std::process::Command as StdCommand;

use async_trait::async_trait;

use super::errors::ExtractError;
use super::models::{PlaylistInfo, SearchItem, VideoInfo, VideoSummary, UNKNOWN_AUTHOR};
use super::traits::MediaExtractor;
use super::utils::run_output_with_timeout;
use crate::config::Config;

/// mp4-preferring format string for metadata lookups (matches what the
/// frontend expects to stream)
const INFO_FORMAT: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]";

/// webm video+audio for the conversion endpoint, merged into one container
const WEBM_FORMAT: &str = "bestvideo[ext=webm]+bestaudio[ext=webm]/best[ext=webm]";

pub struct YtDlp {
    binary: String,
    extract_timeout_secs: u64,
    download_timeout_secs: u64,
}

impl YtDlp {
    pub fn new(config: &Config) -> Self {
        let binary = config
            .ytdlp_path
            .clone()
            .unwrap_or_else(Self::find_binary);
        tracing::info!(%binary, "using yt-dlp");
        Self {
            binary,
            extract_timeout_secs: config.extract_timeout_secs,
            download_timeout_secs: config.download_timeout_secs,
        }
    }

    /// Find the yt-dlp binary in common install locations, falling back to
    /// `which` and finally to bare `yt-dlp` in PATH.
    fn find_binary() -> String {
        let common_paths = [
            "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
            "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac
            "/usr/bin/yt-dlp",          // System installation
        ];

        for path in common_paths {
            if Path::new(path).exists() {
                return path.to_string();
            }
        }

        if let Ok(output) = StdCommand::new("which").arg("yt-dlp").output() {
            if output.status.success() {
                if let Ok(path) = String::from_utf8(output.stdout) {
                    let trimmed = path.trim();
                    if !trimmed.is_empty() {
                        return trimmed.to_string();
                    }
                }
            }
        }

        "yt-dlp".to_string()
    }

    /// Flags shared by every invocation
    fn base_args(&self) -> Vec<String> {
        vec![
            "--no-warnings".to_string(),
            "--socket-timeout".to_string(),
            "15".to_string(),
            "--retries".to_string(),
            "2".to_string(),
        ]
    }

    async fn run(&self, args: Vec<String>, timeout_secs: u64) -> Result<Vec<u8>, ExtractError> {
        let output = run_output_with_timeout(&self.binary, &args, timeout_secs).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::warn!(binary = %self.binary, %stderr, "yt-dlp exited with failure");
            return Err(ExtractError::from(stderr));
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl MediaExtractor for YtDlp {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn video_info(&self, url: &str) -> Result<VideoInfo, ExtractError> {
        let mut args = vec![
            "--dump-json".to_string(),
            "--skip-download".to_string(),
            "--no-playlist".to_string(),
            "-f".to_string(),
            INFO_FORMAT.to_string(),
        ];
        args.extend(self.base_args());
        args.push(url.to_string());

        let stdout = self.run(args, self.extract_timeout_secs).await?;
        let json = parse_json(&stdout)?;
        Ok(project_video_info(&json))
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchItem>, ExtractError> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--flat-playlist".to_string(),
        ];
        args.extend(self.base_args());
        args.push(format!("ytsearch{}:{}", limit, query));

        let stdout = self.run(args, self.extract_timeout_secs).await?;
        let json = parse_json(&stdout)?;
        Ok(project_search_results(&json))
    }

    async fn playlist_info(&self, url: &str) -> Result<PlaylistInfo, ExtractError> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--flat-playlist".to_string(),
        ];
        args.extend(self.base_args());
        args.push(url.to_string());

        let stdout = self.run(args, self.extract_timeout_secs).await?;
        let json = parse_json(&stdout)?;
        Ok(project_playlist_info(&json))
    }

    async fn download_webm(&self, url: &str, dest: &Path) -> Result<(), ExtractError> {
        let mut args = vec![
            "-f".to_string(),
            WEBM_FORMAT.to_string(),
            "--merge-output-format".to_string(),
            "webm".to_string(),
            "--no-cache-dir".to_string(),
            "--no-playlist".to_string(),
            "-o".to_string(),
            dest.to_string_lossy().to_string(),
        ];
        args.extend(self.base_args());
        args.push(url.to_string());

        self.run(args, self.download_timeout_secs).await?;
        Ok(())
    }
}

fn parse_json(stdout: &[u8]) -> Result<serde_json::Value, ExtractError> {
    let text = String::from_utf8_lossy(stdout);
    serde_json::from_str(&text).map_err(|e| ExtractError::Parse(format!("invalid JSON: {}", e)))
}

/// Project the full --dump-json blob into the bounded VideoInfo shape. Each
/// field gets an explicit default when the upstream omits it.
fn project_video_info(json: &serde_json::Value) -> VideoInfo {
    let formats = json["formats"]
        .as_array()
        .map(|fmts| {
            fmts.iter()
                .filter(|f| {
                    f["ext"].as_str() == Some("mp4")
                        && f["vcodec"].as_str().map_or(false, |v| v != "none")
                })
                .filter_map(|f| f["url"].as_str())
                .map(|u| u.to_string())
                .collect()
        })
        .unwrap_or_default();

    VideoInfo {
        id: json["id"].as_str().unwrap_or("").to_string(),
        title: json["title"].as_str().unwrap_or("").to_string(),
        description: json["description"].as_str().unwrap_or("").to_string(),
        uploader: json["uploader"].as_str().unwrap_or("").to_string(),
        thumbnail: json["thumbnail"].as_str().unwrap_or("").to_string(),
        duration: json["duration"].as_f64().map(|d| d as u64),
        view_count: json["view_count"].as_u64(),
        upload_date: json["upload_date"].as_str().map(|s| s.to_string()),
        webpage_url: json["webpage_url"].as_str().unwrap_or("").to_string(),
        formats,
    }
}

/// Map flat-playlist search entries to tagged search items. Entries of a
/// kind we do not recognize are dropped rather than guessed at.
fn project_search_results(json: &serde_json::Value) -> Vec<SearchItem> {
    let entries = match json["entries"].as_array() {
        Some(e) => e,
        None => return Vec::new(),
    };

    entries.iter().filter_map(project_search_entry).collect()
}

fn project_search_entry(entry: &serde_json::Value) -> Option<SearchItem> {
    let author = entry["uploader"]
        .as_str()
        .or_else(|| entry["channel"].as_str())
        .unwrap_or(UNKNOWN_AUTHOR)
        .to_string();

    match entry["ie_key"].as_str() {
        Some("Youtube") => Some(SearchItem::Video {
            title: entry["title"].as_str().unwrap_or("").to_string(),
            id: entry["id"].as_str().unwrap_or("").to_string(),
            url: entry["url"].as_str().unwrap_or("").to_string(),
            thumbnail: entry_thumbnail(entry),
            duration: entry["duration"].as_f64().map(|d| d as u64),
            views: entry["view_count"].as_u64(),
            author,
        }),
        Some("YoutubePlaylist") | Some("YoutubeTab") => Some(SearchItem::Playlist {
            title: entry["title"].as_str().unwrap_or("").to_string(),
            id: entry["id"].as_str().unwrap_or("").to_string(),
            url: entry["url"].as_str().unwrap_or("").to_string(),
            thumbnail: entry_thumbnail(entry),
            video_count: entry["playlist_count"].as_u64(),
            author,
        }),
        _ => None,
    }
}

/// Best thumbnail URL for a flat entry: the last element of `thumbnails` is
/// the highest resolution; fall back to the scalar `thumbnail` field.
fn entry_thumbnail(entry: &serde_json::Value) -> String {
    entry["thumbnails"]
        .as_array()
        .and_then(|t| t.last())
        .and_then(|t| t["url"].as_str())
        .or_else(|| entry["thumbnail"].as_str())
        .unwrap_or("")
        .to_string()
}

fn project_playlist_info(json: &serde_json::Value) -> PlaylistInfo {
    let videos: Vec<VideoSummary> = json["entries"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|entry| VideoSummary {
                    id: entry["id"].as_str().unwrap_or("").to_string(),
                    title: entry["title"].as_str().unwrap_or("").to_string(),
                    url: entry["url"].as_str().unwrap_or("").to_string(),
                    thumbnail_url: entry_thumbnail(entry),
                    duration: entry["duration"].as_f64().map(|d| d as u64),
                    author: entry["uploader"]
                        .as_str()
                        .or_else(|| entry["channel"].as_str())
                        .unwrap_or(UNKNOWN_AUTHOR)
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    PlaylistInfo {
        id: json["id"].as_str().unwrap_or("").to_string(),
        title: json["title"].as_str().unwrap_or("").to_string(),
        description: json["description"].as_str().unwrap_or("").to_string(),
        url: json["webpage_url"].as_str().unwrap_or("").to_string(),
        video_count: json["playlist_count"]
            .as_u64()
            .unwrap_or(videos.len() as u64),
        videos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_video_info_projection() {
        let blob = json!({
            "id": "dQw4w9WgXcQ",
            "title": "Some video",
            "description": "desc",
            "uploader": "Some channel",
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg",
            "duration": 212.0,
            "view_count": 1234567,
            "upload_date": "20091025",
            "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "formats": [
                {"url": "https://cdn/a.mp4", "ext": "mp4", "vcodec": "avc1.64001F"},
                {"url": "https://cdn/b.m4a", "ext": "m4a", "vcodec": "none"},
                {"url": "https://cdn/c.webm", "ext": "webm", "vcodec": "vp9"},
                {"ext": "mp4", "vcodec": "avc1.64001F"}
            ]
        });

        let info = project_video_info(&blob);
        assert_eq!(info.id, "dQw4w9WgXcQ");
        assert_eq!(info.duration, Some(212));
        assert_eq!(info.view_count, Some(1234567));
        // Only the mp4 format with a real vcodec and a URL survives
        assert_eq!(info.formats, vec!["https://cdn/a.mp4"]);
    }

    #[test]
    fn test_video_info_missing_fields_default() {
        let info = project_video_info(&json!({"id": "x"}));
        assert_eq!(info.title, "");
        assert_eq!(info.duration, None);
        assert_eq!(info.view_count, None);
        assert_eq!(info.upload_date, None);
        assert!(info.formats.is_empty());
    }

    #[test]
    fn test_search_projection_keeps_order_and_drops_unknown() {
        let blob = json!({
            "entries": [
                {
                    "ie_key": "Youtube",
                    "id": "v1",
                    "title": "cats video",
                    "url": "https://www.youtube.com/watch?v=v1",
                    "duration": 63.0,
                    "view_count": 99,
                    "uploader": "Cat Channel"
                },
                {
                    "ie_key": "SomethingElse",
                    "id": "weird",
                    "title": "unrecognized"
                },
                {
                    "ie_key": "YoutubePlaylist",
                    "id": "PL123",
                    "title": "cats playlist",
                    "url": "https://www.youtube.com/playlist?list=PL123",
                    "playlist_count": 12,
                    "uploader": "Cat Channel"
                }
            ]
        });

        let items = project_search_results(&blob);
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], SearchItem::Video { .. }));
        assert!(matches!(items[1], SearchItem::Playlist { .. }));
    }

    #[test]
    fn test_search_author_defaults_to_unknown() {
        let blob = json!({
            "entries": [
                {"ie_key": "Youtube", "id": "v1", "title": "t", "url": "u", "duration": 1.0}
            ]
        });

        match &project_search_results(&blob)[0] {
            SearchItem::Video { author, .. } => assert_eq!(author, UNKNOWN_AUTHOR),
            other => panic!("expected video item, got {:?}", other),
        }
    }

    #[test]
    fn test_search_serializes_with_type_tag() {
        let item = SearchItem::Video {
            title: "t".into(),
            id: "v1".into(),
            url: "u".into(),
            thumbnail: "".into(),
            duration: Some(1),
            views: None,
            author: UNKNOWN_AUTHOR.into(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "video");
    }

    #[test]
    fn test_playlist_projection_preserves_order_and_count() {
        let blob = json!({
            "id": "PL123",
            "title": "My list",
            "webpage_url": "https://www.youtube.com/playlist?list=PL123",
            "entries": [
                {"id": "a", "title": "first", "url": "ua", "uploader": "A"},
                {"id": "b", "title": "second", "url": "ub", "uploader": "B"},
                {"id": "c", "title": "third", "url": "uc"}
            ]
        });

        let playlist = project_playlist_info(&blob);
        assert_eq!(playlist.video_count, 3);
        assert_eq!(playlist.videos.len(), 3);
        let ids: Vec<&str> = playlist.videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(playlist.videos[2].author, UNKNOWN_AUTHOR);
    }
}
