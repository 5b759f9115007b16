// MetadataExtractor trait and configuration

use async_trait::async_trait;

use crate::downloader::errors::DownloadError;
use crate::downloader::models::MediaMetadata;

/// How the extractor subprocess is invoked.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Items to resolve from a collection; "1" keeps metadata fetches cheap
    /// for playlists and channels
    pub playlist_items: String,
    /// Suppress informational output
    pub quiet: bool,
    /// Subprocess timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            playlist_items: "1".to_string(),
            quiet: true,
            timeout_seconds: 60,
        }
    }
}

/// Trait for metadata extractors
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Check if this extractor is available
    fn is_available(&self) -> bool;

    /// Fetch the raw info document for a URL
    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<MediaMetadata, DownloadError>;
}
