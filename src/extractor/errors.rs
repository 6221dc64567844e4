// Error types for the extraction adapter

use thiserror::Error;

/// Errors surfaced by the yt-dlp adapter. `NotFound` is the only variant the
/// HTTP layer maps to 404; everything else becomes a 500 in the handler's
/// taxonomy.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// Upstream reports the content as absent, private or otherwise inaccessible
    #[error("video not found: {0}")]
    NotFound(String),

    /// yt-dlp binary is missing from the system
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// yt-dlp produced output we could not parse
    #[error("parse error: {0}")]
    Parse(String),

    /// Subprocess could not be spawned or exited with an error
    #[error("execution error: {0}")]
    Execution(String),

    /// Subprocess did not finish within the allotted time
    #[error("timed out after {0}s")]
    Timeout(u64),
}

// Classify raw yt-dlp stderr. Detection is substring-based because yt-dlp
// reports failures as free-form "ERROR:" lines, not structured output.
impl From<String> for ExtractError {
    fn from(s: String) -> Self {
        let lower = s.to_lowercase();

        // Absent / inaccessible content
        if lower.contains("video unavailable")
            || lower.contains("private video")
            || lower.contains("this video is not available")
            || lower.contains("does not exist")
            || lower.contains("http error 404")
        {
            return Self::NotFound(first_error_line(&s));
        }

        if lower.contains("not found")
            || lower.contains("no such file")
            || lower.contains("command not found")
        {
            return Self::ToolNotFound(first_error_line(&s));
        }

        Self::Execution(first_error_line(&s))
    }
}

/// First "ERROR:" line of a stderr dump, or the first non-empty line when
/// yt-dlp printed nothing structured. Keeps handler-visible details short.
fn first_error_line(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| stderr.lines().map(str::trim).find(|l| !l.is_empty()))
        .unwrap_or("unknown yt-dlp error")
        .to_string()
}
