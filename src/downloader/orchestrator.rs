// Download orchestration: metadata -> classification -> format -> invocation.

use std::path::Path;

use super::backends::YtDlpBackend;
use super::cache::CacheStore;
use super::classifier::classify;
use super::errors::DownloadError;
use super::extractors::CliExtractor;
use super::fetcher::MetadataFetcher;
use super::format_selector::{available_qualities, format_expression};
use super::models::{ContentType, MediaMetadata, Quality};
use super::traits::{DownloadRequest, DownloaderBackend};
use crate::config::AppConfig;

const FLAT_FILENAME: &str = "%(title)s.%(ext)s";
const INDEXED_FILENAME: &str = "%(playlist_index)s - %(title)s.%(ext)s";

const UNKNOWN_PLAYLIST: &str = "Unknown Playlist";
const UNKNOWN_ALBUM: &str = "Unknown Album";
const UNKNOWN_CHANNEL: &str = "Unknown Channel";

/// Ties the pipeline together: fetch metadata, classify it, pick the output
/// template and format expression, then hand off to the backend.
pub struct Downloader {
    config: AppConfig,
    fetcher: MetadataFetcher,
    backend: Box<dyn DownloaderBackend>,
}

impl Downloader {
    /// Downloader wired to the system yt-dlp and the configured cache dir.
    pub fn new(config: AppConfig) -> Self {
        let cache = CacheStore::new(config.cache_dir.clone());
        let fetcher = MetadataFetcher::new(Box::new(CliExtractor::new()), cache);
        Self::with_parts(config, fetcher, Box::new(YtDlpBackend::new()))
    }

    /// Explicit wiring; tests substitute stub components here.
    pub fn with_parts(
        config: AppConfig,
        fetcher: MetadataFetcher,
        backend: Box<dyn DownloaderBackend>,
    ) -> Self {
        Self {
            config,
            fetcher,
            backend,
        }
    }

    pub async fn download(
        &self,
        url: &str,
        quality: Quality,
        refresh: bool,
    ) -> Result<(), DownloadError> {
        let metadata = self.fetcher.fetch(url, refresh).await?;

        let content_type = classify(&metadata);
        tracing::info!(
            %content_type,
            title = metadata.title().unwrap_or("<untitled>"),
            "classified content"
        );

        let available = available_qualities(&metadata);
        if !content_type.is_audio() && !available.contains(&quality) {
            tracing::warn!(
                requested = %quality,
                available = ?available,
                "requested quality not advertised, relying on fallback formats"
            );
        }

        let request = DownloadRequest {
            format: format_expression(quality, content_type),
            output_template: output_template(&self.config, content_type, &metadata),
            subtitle_langs: vec!["en".to_string()],
        };

        tracing::info!(
            backend = self.backend.name(),
            format = %request.format,
            output = %request.output_template,
            "starting download"
        );
        self.backend.download(url, &request).await
    }
}

/// yt-dlp output template for a content category. Single items land flat in
/// their destination directory; collections get a subdirectory named after
/// the collection and index-prefixed filenames.
fn output_template(config: &AppConfig, content_type: ContentType, metadata: &MediaMetadata) -> String {
    match content_type {
        ContentType::Video => join_template(&config.target_dir, FLAT_FILENAME),
        ContentType::Song => join_template(&config.music_dir, FLAT_FILENAME),
        ContentType::Playlist => join_template(
            &config
                .target_dir
                .join(metadata.playlist_title().unwrap_or(UNKNOWN_PLAYLIST)),
            INDEXED_FILENAME,
        ),
        ContentType::Album => join_template(
            &config
                .music_dir
                .join(metadata.album().unwrap_or(UNKNOWN_ALBUM)),
            INDEXED_FILENAME,
        ),
        ContentType::Channel => join_template(
            &config
                .target_dir
                .join(metadata.channel().unwrap_or(UNKNOWN_CHANNEL)),
            INDEXED_FILENAME,
        ),
    }
}

fn join_template(dir: &Path, filename: &str) -> String {
    dir.join(filename).to_string_lossy().into_owned()
}
