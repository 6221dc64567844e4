// Object-storage upload capability
//
// The real bucket contract (naming, ACLs, URL shape) is a deployment
// decision, so this stays behind a trait: `HttpUploader` PUTs to whatever
// endpoint is configured, and `SimulatedUploader` stands in when none is.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("storage endpoint returned HTTP {0}")]
    Status(u16),
}

/// Upload a local file under a public name, returning the public URL.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, local_path: &Path, name: &str) -> Result<String, UploadError>;
}

/// PUTs the file to `{endpoint}/{name}` and reports `{public_base}/{name}`
/// as the resulting public URL.
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: String,
    public_base: String,
}

impl HttpUploader {
    pub fn new(endpoint: String, public_base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            public_base,
        }
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, local_path: &Path, name: &str) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|source| UploadError::Io {
                path: local_path.display().to_string(),
                source,
            })?;

        let target = format!("{}/{}", self.endpoint.trim_end_matches('/'), name);
        tracing::info!(%target, size = bytes.len(), "uploading converted file");

        let response = self.client.put(&target).body(bytes).send().await?;
        if !response.status().is_success() {
            return Err(UploadError::Status(response.status().as_u16()));
        }

        Ok(format!(
            "{}/{}",
            self.public_base.trim_end_matches('/'),
            name
        ))
    }
}

/// Placeholder uploader for deployments without storage configured. Reads
/// the file (surfacing missing-file errors the way a real upload would) and
/// fabricates a URL.
pub struct SimulatedUploader;

#[async_trait]
impl Uploader for SimulatedUploader {
    async fn upload(&self, local_path: &Path, name: &str) -> Result<String, UploadError> {
        let metadata = tokio::fs::metadata(local_path)
            .await
            .map_err(|source| UploadError::Io {
                path: local_path.display().to_string(),
                source,
            })?;
        tracing::info!(
            path = %local_path.display(),
            size = metadata.len(),
            "simulating upload to cloud storage"
        );
        Ok(format!("https://your-storage-service.com/videos/{}", name))
    }
}
