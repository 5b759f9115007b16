// Error types for the downloader pipeline

use std::fmt;

#[derive(Debug)]
pub enum DownloadError {
    /// The extractor produced no usable metadata record
    MetadataUnavailable,

    /// Network timeout while talking to the media site
    NetworkTimeout,

    /// yt-dlp not found or not launchable
    ToolNotFound(String),

    /// URL rejected by the extractor
    UnsupportedUrl(String),

    /// Failed to parse yt-dlp JSON output
    ParseError(String),

    /// Subprocess execution failed
    ExecutionError(String),

    /// Cache or output filesystem error
    Io(std::io::Error),

    /// Unknown error with details
    Unknown(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetadataUnavailable => write!(f, "unable to fetch metadata"),
            Self::NetworkTimeout => write!(f, "network timeout: the media site is not responding"),
            Self::ToolNotFound(tool) => write!(f, "tool not found: {}", tool),
            Self::UnsupportedUrl(url) => write!(f, "unsupported URL: {}", url),
            Self::ParseError(msg) => write!(f, "parse error: {}", msg),
            Self::ExecutionError(msg) => write!(f, "execution error: {}", msg),
            Self::Io(err) => write!(f, "I/O error: {}", err),
            Self::Unknown(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DownloadError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

// Classify raw yt-dlp stderr text into a structured variant.
impl From<String> for DownloadError {
    fn from(s: String) -> Self {
        if s.contains("timeout") || s.contains("timed out") {
            return Self::NetworkTimeout;
        }

        if s.contains("not found") || s.contains("No such file") || s.contains("command not found")
        {
            return Self::ToolNotFound(s);
        }

        if s.contains("Unsupported URL") || s.contains("is not a valid URL") {
            return Self::UnsupportedUrl(s);
        }

        if s.contains("JSON") || s.contains("Expecting value") {
            return Self::ParseError(s);
        }

        Self::Unknown(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_timeout_text() {
        let err = DownloadError::from("ERROR: Connection timed out".to_string());
        assert!(matches!(err, DownloadError::NetworkTimeout));
    }

    #[test]
    fn classifies_unsupported_url() {
        let err = DownloadError::from("ERROR: Unsupported URL: ftp://x".to_string());
        assert!(matches!(err, DownloadError::UnsupportedUrl(_)));
    }

    #[test]
    fn classifies_missing_tool() {
        let err = DownloadError::from("yt-dlp: command not found".to_string());
        assert!(matches!(err, DownloadError::ToolNotFound(_)));
    }

    #[test]
    fn unrecognized_text_stays_unknown() {
        let err = DownloadError::from("something else entirely".to_string());
        assert!(matches!(err, DownloadError::Unknown(_)));
    }
}
