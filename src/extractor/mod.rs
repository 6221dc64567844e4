// Extraction adapter around the external yt-dlp capability

pub mod cli;
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;

pub use cli::YtDlp;
pub use errors::ExtractError;
pub use models::{PlaylistInfo, SearchItem, VideoInfo, VideoSummary};
pub use traits::MediaExtractor;
