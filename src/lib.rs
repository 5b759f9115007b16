pub mod config;
pub mod downloader;

pub use config::AppConfig;
pub use downloader::{ContentType, DownloadError, Downloader, MediaMetadata, Quality};
