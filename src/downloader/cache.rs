// Content-addressed metadata cache keyed by md5(url).

use std::fs;
use std::path::PathBuf;

use md5::{Digest, Md5};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use super::errors::DownloadError;
use super::models::MediaMetadata;

/// On-disk store mapping a URL to its cached yt-dlp info document.
///
/// Entries are never expired; callers that want fresh metadata bypass the
/// store explicitly and the next `save` replaces the file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Deterministic cache path for a URL: `<dir>/<md5 hex>.json`.
    pub fn locate(&self, url: &str) -> PathBuf {
        let digest = Md5::digest(url.as_bytes());
        self.dir.join(format!("{:x}.json", digest))
    }

    /// Serialize `metadata` to its cache file as 4-space-indented JSON. The
    /// write lands in a temp file in the same directory and is renamed into
    /// place, so a crashed or concurrent run never leaves a torn entry.
    pub fn save(&self, url: &str, metadata: &MediaMetadata) -> Result<(), DownloadError> {
        fs::create_dir_all(&self.dir)?;

        let mut file = NamedTempFile::new_in(&self.dir)?;
        {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut file, formatter);
            metadata.serialize(&mut serializer)?;
        }

        file.persist(self.locate(url))
            .map_err(|e| DownloadError::Io(e.error))?;
        Ok(())
    }

    /// Parsed cache entry for `url`, or None when nothing has been stored.
    pub fn load(&self, url: &str) -> Result<Option<MediaMetadata>, DownloadError> {
        let path = self.locate(url);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        let metadata = serde_json::from_str(&raw)?;
        Ok(Some(metadata))
    }
}
