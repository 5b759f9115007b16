// Downloader backend trait definition

use async_trait::async_trait;

use super::errors::DownloadError;

/// Fully resolved inputs for one download invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    /// yt-dlp format selection expression
    pub format: String,
    /// yt-dlp output template, rooted at the destination directory
    pub output_template: String,
    /// Subtitle languages to download and embed
    pub subtitle_langs: Vec<String>,
}

/// Trait for download backend implementations
#[async_trait]
pub trait DownloaderBackend: Send + Sync {
    /// Name of the backend (for logging)
    fn name(&self) -> &'static str;

    /// Download `url` according to `request`
    async fn download(&self, url: &str, request: &DownloadRequest) -> Result<(), DownloadError>;
}
