// Quality-to-format mapping and yt-dlp format expression construction.

use super::models::{ContentType, MediaMetadata, Quality};

// Ordered fallback chains of yt-dlp format ids per resolution tier. The
// last element is a catch-all sentinel so an expression never dead-ends.
const FORMATS_1080P: &[&str] = &["137", "248", "bestvideo"];
const FORMATS_720P: &[&str] = &["136", "247", "bestvideo"];
const FORMATS_480P: &[&str] = &["135", "244", "bestvideo"];
const FORMATS_AUDIO: &[&str] = &["140", "251", "140-1", "140-drc", "251-drc", "bestaudio"];

/// Video format chain for a quality tier, most preferred first.
pub fn video_formats(quality: Quality) -> &'static [&'static str] {
    match quality {
        Quality::High => FORMATS_1080P,
        Quality::Medium => FORMATS_720P,
        Quality::Low => FORMATS_480P,
    }
}

/// Audio format chain shared by every tier.
pub fn audio_formats() -> &'static [&'static str] {
    FORMATS_AUDIO
}

/// Quality tiers whose mapped chain intersects the formats the record
/// actually advertises. A record without `formats` yields no tiers.
pub fn available_qualities(metadata: &MediaMetadata) -> Vec<Quality> {
    let advertised = metadata.format_ids();
    Quality::ALL
        .into_iter()
        .filter(|quality| {
            video_formats(*quality)
                .iter()
                .any(|id| advertised.contains(id))
        })
        .collect()
}

/// yt-dlp format selection expression for a download. Audio-only for songs
/// and albums; combined video+audio otherwise, with `/` separating fallback
/// alternatives and `+` muxing the two streams.
pub fn format_expression(quality: Quality, content_type: ContentType) -> String {
    let audio = audio_formats().join("/");
    if content_type.is_audio() {
        audio
    } else {
        format!("({})+({})", video_formats(quality).join("/"), audio)
    }
}
