// Environment-driven configuration

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Frontend origins allowed by CORS; empty means wide open (development)
    pub allowed_origins: Vec<String>,
    /// Explicit yt-dlp binary path, overriding discovery
    pub ytdlp_path: Option<String>,
    pub extract_timeout_secs: u64,
    pub download_timeout_secs: u64,
    /// Object-storage PUT endpoint; unset means simulated uploads
    pub upload_endpoint: Option<String>,
    /// Base of the public URLs returned for uploaded files
    pub public_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = env_or("YT_GATEWAY_HOST", "0.0.0.0");
        let port = env_or("YT_GATEWAY_PORT", "5000")
            .parse::<u16>()
            .context("YT_GATEWAY_PORT must be a port number")?;

        let allowed_origins = std::env::var("YT_GATEWAY_ALLOWED_ORIGINS")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let extract_timeout_secs = env_or("YT_GATEWAY_EXTRACT_TIMEOUT", "30")
            .parse::<u64>()
            .context("YT_GATEWAY_EXTRACT_TIMEOUT must be seconds")?;
        let download_timeout_secs = env_or("YT_GATEWAY_DOWNLOAD_TIMEOUT", "600")
            .parse::<u64>()
            .context("YT_GATEWAY_DOWNLOAD_TIMEOUT must be seconds")?;

        Ok(Self {
            host,
            port,
            allowed_origins,
            ytdlp_path: std::env::var("YT_GATEWAY_YTDLP").ok(),
            extract_timeout_secs,
            download_timeout_secs,
            upload_endpoint: std::env::var("YT_GATEWAY_UPLOAD_ENDPOINT").ok(),
            public_base_url: std::env::var("YT_GATEWAY_PUBLIC_BASE_URL").ok(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
