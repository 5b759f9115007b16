// yt-dlp download backend with streamed progress reporting.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::downloader::errors::DownloadError;
use crate::downloader::traits::{DownloadRequest, DownloaderBackend};
use crate::downloader::utils::find_ytdlp;

/// Runs the actual download through the yt-dlp binary, letting its
/// post-processors embed subtitles and the thumbnail.
pub struct YtDlpBackend {
    ytdlp_path: String,
}

impl YtDlpBackend {
    pub fn new() -> Self {
        Self {
            ytdlp_path: find_ytdlp(),
        }
    }

    /// Use an explicit binary instead of probing the system.
    pub fn with_binary(path: impl Into<String>) -> Self {
        Self {
            ytdlp_path: path.into(),
        }
    }

    /// Argument vector for a download run. `--newline` keeps progress lines
    /// parseable one per line.
    pub fn build_args(url: &str, request: &DownloadRequest) -> Vec<String> {
        vec![
            "-f".to_string(),
            request.format.clone(),
            "-o".to_string(),
            request.output_template.clone(),
            "--no-warnings".to_string(),
            "--newline".to_string(),
            "--write-subs".to_string(),
            "--sub-langs".to_string(),
            request.subtitle_langs.join(","),
            "--embed-subs".to_string(),
            "--write-thumbnail".to_string(),
            "--embed-thumbnail".to_string(),
            url.to_string(),
        ]
    }
}

impl Default for YtDlpBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a yt-dlp progress line like
/// `[download]  42.7% of 10.23MiB at 1.09MiB/s ETA 00:05`
/// into (percent, status text).
fn parse_progress(line: &str) -> Option<(f32, String)> {
    lazy_static! {
        static ref PROGRESS_RE: Regex = Regex::new(
            r"\[download\]\s+(\d+\.?\d*)%\s+of\s+~?\s*(\S+)(?:\s+at\s+(\S+))?(?:\s+ETA\s+(\S+))?"
        )
        .unwrap();
        static ref DEST_RE: Regex = Regex::new(r"\[download\]\s+Destination:\s+(.+)").unwrap();
    }

    if let Some(caps) = PROGRESS_RE.captures(line) {
        let percent: f32 = caps.get(1)?.as_str().parse().ok()?;
        let size = caps.get(2).map(|m| m.as_str()).unwrap_or("?");
        let speed = caps.get(3).map(|m| m.as_str());
        let eta = caps.get(4).map(|m| m.as_str());

        let status = match (speed, eta) {
            (Some(speed), Some(eta)) => {
                format!("{:.1}% of {} at {} ETA {}", percent, size, speed, eta)
            }
            _ => format!("{:.1}% of {}", percent, size),
        };
        return Some((percent, status));
    }

    DEST_RE
        .captures(line)
        .map(|caps| (0.0, format!("writing {}", &caps[1])))
}

#[async_trait]
impl DownloaderBackend for YtDlpBackend {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn download(&self, url: &str, request: &DownloadRequest) -> Result<(), DownloadError> {
        let args = Self::build_args(url, request);
        tracing::debug!(binary = %self.ytdlp_path, ?args, "spawning download");

        let mut child = Command::new(&self.ytdlp_path)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DownloadError::ToolNotFound(format!("{}: {}", self.ytdlp_path, e)))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            DownloadError::ExecutionError("failed to capture yt-dlp stdout".to_string())
        })?;

        // Progress is logged at ~5% steps.
        let mut lines = BufReader::new(stdout).lines();
        let mut last_logged = f32::NEG_INFINITY;
        while let Some(line) = lines.next_line().await? {
            if let Some((percent, status)) = parse_progress(&line) {
                if percent - last_logged >= 5.0 || percent >= 100.0 {
                    tracing::info!("{}", status);
                    last_logged = percent;
                }
            }
        }

        let output = child.wait_with_output().await?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(DownloadError::from(stderr.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_args_carries_format_template_and_embeds() {
        let request = DownloadRequest {
            format: "(137/248/bestvideo)+(140/bestaudio)".to_string(),
            output_template: "/videos/%(title)s.%(ext)s".to_string(),
            subtitle_langs: vec!["en".to_string()],
        };

        let args = YtDlpBackend::build_args("https://youtu.be/x", &request);
        assert_eq!(
            args,
            vec![
                "-f",
                "(137/248/bestvideo)+(140/bestaudio)",
                "-o",
                "/videos/%(title)s.%(ext)s",
                "--no-warnings",
                "--newline",
                "--write-subs",
                "--sub-langs",
                "en",
                "--embed-subs",
                "--write-thumbnail",
                "--embed-thumbnail",
                "https://youtu.be/x",
            ]
        );
    }

    #[test]
    fn parses_a_full_progress_line() {
        let (percent, status) =
            parse_progress("[download]  42.7% of 10.23MiB at 1.09MiB/s ETA 00:05").unwrap();
        assert_eq!(percent, 42.7);
        assert!(status.contains("42.7%"));
        assert!(status.contains("ETA 00:05"));
    }

    #[test]
    fn parses_an_estimated_size_progress_line() {
        let (percent, _) =
            parse_progress("[download]   6.2% of ~ 343.72MiB at  420.30KiB/s ETA 12:32").unwrap();
        assert_eq!(percent, 6.2);
    }

    #[test]
    fn parses_a_destination_line() {
        let (percent, status) =
            parse_progress("[download] Destination: /videos/clip.mp4").unwrap();
        assert_eq!(percent, 0.0);
        assert!(status.contains("/videos/clip.mp4"));
    }

    #[test]
    fn ignores_unrelated_lines() {
        assert!(parse_progress("[Merger] Merging formats").is_none());
        assert!(parse_progress("random noise").is_none());
    }
}
