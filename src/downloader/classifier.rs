// Content classification from extractor metadata.

use super::models::{ContentType, MediaMetadata};

/// Derive the content category from metadata fields. Ordered decision list,
/// first match wins.
///
/// The channel rule relies on the extractor reporting the same value for
/// `channel_id` and `playlist_id` on channel pages. That is observed
/// behavior, not a documented guarantee.
pub fn classify(metadata: &MediaMetadata) -> ContentType {
    let track = metadata.track();
    let playlist_id = metadata.playlist_id();
    let channel_id = metadata.channel_id();

    if track.is_none() && playlist_id.is_none() {
        return ContentType::Video;
    }
    if track.is_some() && playlist_id.is_none() {
        return ContentType::Song;
    }
    if channel_id.is_some() && channel_id == playlist_id {
        return ContentType::Channel;
    }
    if track.is_some() && playlist_id.is_some() {
        return ContentType::Album;
    }

    ContentType::Playlist
}
