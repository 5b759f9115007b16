use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ytd_go::config::AppConfig;
use ytd_go::downloader::{Downloader, Quality};

#[derive(Debug, Parser)]
#[command(name = "ytd")]
#[command(about = "Download YouTube videos, songs, albums, playlists and channels")]
#[command(version)]
struct Cli {
    /// URL of the media to download
    url: String,

    /// Video quality (high/medium/low)
    #[arg(short, long, value_parser = ["high", "medium", "low"], default_value = "high")]
    quality: String,

    /// Ignore any cached metadata and fetch a fresh record
    #[arg(long)]
    refresh: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let quality = Quality::from(cli.quality.as_str());

    let config = AppConfig::from_environment();
    let downloader = Downloader::new(config);

    downloader
        .download(&cli.url, quality, cli.refresh)
        .await
        .with_context(|| format!("downloading {}", cli.url))?;

    Ok(())
}
