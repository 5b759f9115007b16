// Metadata extractor backed by the yt-dlp binary.

use async_trait::async_trait;
use std::process::Command as StdCommand;

use super::traits::{ExtractorConfig, MetadataExtractor};
use crate::downloader::errors::DownloadError;
use crate::downloader::models::MediaMetadata;
use crate::downloader::utils::{find_ytdlp, run_output_with_timeout};

/// Invokes `yt-dlp --dump-single-json` and parses the emitted document.
pub struct CliExtractor {
    ytdlp_path: String,
}

impl CliExtractor {
    pub fn new() -> Self {
        Self {
            ytdlp_path: find_ytdlp(),
        }
    }

    /// Use an explicit binary instead of probing the system. Tests point
    /// this at a stub script.
    pub fn with_binary(path: impl Into<String>) -> Self {
        Self {
            ytdlp_path: path.into(),
        }
    }

    fn build_args(&self, url: &str, config: &ExtractorConfig) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--playlist-items".to_string(),
            config.playlist_items.clone(),
            "--no-warnings".to_string(),
        ];

        if config.quiet {
            args.push("--quiet".to_string());
        }

        args.push(url.to_string());
        args
    }

    fn parse_metadata(stdout: &[u8]) -> Result<MediaMetadata, DownloadError> {
        let text = String::from_utf8_lossy(stdout);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DownloadError::MetadataUnavailable);
        }

        let value: serde_json::Value = serde_json::from_str(trimmed)
            .map_err(|e| DownloadError::ParseError(format!("invalid info JSON: {}", e)))?;
        if value.is_null() {
            return Err(DownloadError::MetadataUnavailable);
        }

        Ok(MediaMetadata::new(value))
    }
}

impl Default for CliExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataExtractor for CliExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    fn is_available(&self) -> bool {
        StdCommand::new(&self.ytdlp_path)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<MediaMetadata, DownloadError> {
        let args = self.build_args(url, config);
        tracing::debug!(binary = %self.ytdlp_path, ?args, "extracting metadata");

        let output = run_output_with_timeout(&self.ytdlp_path, args, config.timeout_seconds)
            .await
            .map_err(DownloadError::from)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DownloadError::from(stderr.to_string()));
        }

        Self::parse_metadata(&output.stdout)
    }
}
