// Common data models for the downloader

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coarse category of a URL's target, inferred from extractor metadata.
/// Drives the output path layout and the format expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    Album,
    Channel,
    Playlist,
    Song,
    Video,
}

impl ContentType {
    /// True for categories downloaded as audio-only streams.
    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Album | Self::Song)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Album => write!(f, "album"),
            Self::Channel => write!(f, "channel"),
            Self::Playlist => write!(f, "playlist"),
            Self::Song => write!(f, "song"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// User-selected quality level, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    High,
    Medium,
    Low,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::High, Quality::Medium, Quality::Low];

    /// Resolution label used as the format table key.
    pub fn label(&self) -> &'static str {
        match self {
            Quality::High => "1080p",
            Quality::Medium => "720p",
            Quality::Low => "480p",
        }
    }
}

impl From<&str> for Quality {
    /// CLI validation makes unknown values unreachable; fall back to High
    /// anyway so the conversion stays total.
    fn from(value: &str) -> Self {
        match value {
            "high" => Quality::High,
            "medium" => Quality::Medium,
            "low" => Quality::Low,
            _ => Quality::High,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw yt-dlp info document. The full JSON is kept intact so cached entries
/// round-trip exactly; typed accessors expose the handful of consumed fields.
///
/// Field access follows the extractor's convention that null and the empty
/// string both mean "absent".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaMetadata(Value);

impl MediaMetadata {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    fn text_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn track(&self) -> Option<&str> {
        self.text_field("track")
    }

    pub fn playlist_id(&self) -> Option<&str> {
        self.text_field("playlist_id")
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.text_field("channel_id")
    }

    pub fn playlist_title(&self) -> Option<&str> {
        self.text_field("playlist_title")
    }

    pub fn album(&self) -> Option<&str> {
        self.text_field("album")
    }

    pub fn channel(&self) -> Option<&str> {
        self.text_field("channel")
    }

    pub fn title(&self) -> Option<&str> {
        self.text_field("title")
    }

    /// Format ids advertised under `formats[]`. Missing or malformed entries
    /// are skipped.
    pub fn format_ids(&self) -> HashSet<&str> {
        self.0
            .get("formats")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|format| format.get("format_id").and_then(Value::as_str))
            .collect()
    }

    /// Unwrap nested `entries` wrappers, keeping only the first entry, until
    /// a plain record remains. The extractor wraps single-item playlist and
    /// search results this way. Returns None when a wrapper has no entries.
    pub fn resolve_entries(mut self) -> Option<MediaMetadata> {
        loop {
            let first = match self.0.get_mut("entries").and_then(Value::as_array_mut) {
                Some(entries) if entries.is_empty() => return None,
                Some(entries) => entries[0].take(),
                None => return Some(self),
            };
            self = MediaMetadata(first);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quality_labels_match_resolutions() {
        assert_eq!(Quality::High.label(), "1080p");
        assert_eq!(Quality::Medium.label(), "720p");
        assert_eq!(Quality::Low.label(), "480p");
    }

    #[test]
    fn quality_from_str_falls_back_to_high() {
        assert_eq!(Quality::from("medium"), Quality::Medium);
        assert_eq!(Quality::from("low"), Quality::Low);
        assert_eq!(Quality::from("8k"), Quality::High);
    }

    #[test]
    fn empty_string_fields_count_as_absent() {
        let metadata = MediaMetadata::new(json!({
            "track": "",
            "playlist_id": null,
            "channel_id": "UCabc",
        }));
        assert_eq!(metadata.track(), None);
        assert_eq!(metadata.playlist_id(), None);
        assert_eq!(metadata.channel_id(), Some("UCabc"));
    }

    #[test]
    fn format_ids_collects_from_formats_array() {
        let metadata = MediaMetadata::new(json!({
            "formats": [
                { "format_id": "136" },
                { "format_id": "140" },
                { "ext": "mp4" },
            ]
        }));
        let ids = metadata.format_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("136"));
        assert!(ids.contains("140"));
    }

    #[test]
    fn format_ids_is_empty_without_formats() {
        let metadata = MediaMetadata::new(json!({ "title": "clip" }));
        assert!(metadata.format_ids().is_empty());
    }

    #[test]
    fn resolve_entries_unwraps_nested_wrappers() {
        let metadata = MediaMetadata::new(json!({
            "entries": [
                { "entries": [ { "title": "inner" } ] },
                { "title": "second" },
            ]
        }));
        let resolved = metadata.resolve_entries().unwrap();
        assert_eq!(resolved.title(), Some("inner"));
    }

    #[test]
    fn resolve_entries_keeps_plain_records() {
        let metadata = MediaMetadata::new(json!({ "title": "plain" }));
        let resolved = metadata.clone().resolve_entries().unwrap();
        assert_eq!(resolved, metadata);
    }

    #[test]
    fn resolve_entries_rejects_empty_wrappers() {
        let metadata = MediaMetadata::new(json!({ "entries": [] }));
        assert!(metadata.resolve_entries().is_none());
    }
}
