// Cache-aware metadata resolution.

use super::cache::CacheStore;
use super::errors::DownloadError;
use super::extractors::{ExtractorConfig, MetadataExtractor};
use super::models::MediaMetadata;

/// Resolves a URL to a single metadata record, consulting the cache before
/// any network activity and unwrapping single-item collection wrappers.
pub struct MetadataFetcher {
    extractor: Box<dyn MetadataExtractor>,
    cache: CacheStore,
    config: ExtractorConfig,
}

impl MetadataFetcher {
    pub fn new(extractor: Box<dyn MetadataExtractor>, cache: CacheStore) -> Self {
        Self {
            extractor,
            cache,
            config: ExtractorConfig::default(),
        }
    }

    /// Fetch metadata for `url`. A cached record wins unconditionally unless
    /// `refresh` is set; freshly extracted records are persisted before they
    /// are returned.
    pub async fn fetch(&self, url: &str, refresh: bool) -> Result<MediaMetadata, DownloadError> {
        if !refresh {
            if let Some(cached) = self.cache.load(url)? {
                tracing::debug!(url, "metadata cache hit");
                return Ok(cached);
            }
        }

        tracing::info!(url, extractor = self.extractor.name(), "fetching metadata");
        let raw = self.extractor.extract(url, &self.config).await?;

        let resolved = raw
            .resolve_entries()
            .ok_or(DownloadError::MetadataUnavailable)?;

        self.cache.save(url, &resolved)?;
        Ok(resolved)
    }
}
