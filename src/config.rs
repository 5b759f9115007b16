// Runtime directory configuration, resolved once at startup.

use std::path::{Path, PathBuf};

/// Shared storage root exposed on Termux, where `$HOME` is app-private and
/// invisible to media players.
const TERMUX_STORAGE_ROOT: &str = "/storage/emulated/0";

/// Directories the downloader reads and writes. Built once in `main` and
/// passed to each component instead of living in module-level statics.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Destination for videos, playlists and channels
    pub target_dir: PathBuf,
    /// Destination for songs and albums
    pub music_dir: PathBuf,
    /// Metadata cache directory
    pub cache_dir: PathBuf,
}

impl AppConfig {
    /// Resolve directories for the current platform: videos under
    /// `<home>/YouTube Videos`, music under `<home>/Music`, metadata cache
    /// under the platform cache directory.
    pub fn from_environment() -> Self {
        let home = resolve_home();
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| home.join(".cache"))
            .join("ytd-go");
        Self::from_dirs(&home, cache_dir)
    }

    /// Build a config rooted at an explicit home directory. Tests use this to
    /// operate on sandboxed roots.
    pub fn from_dirs(home: &Path, cache_dir: PathBuf) -> Self {
        Self {
            target_dir: home.join("YouTube Videos"),
            music_dir: home.join("Music"),
            cache_dir,
        }
    }
}

fn resolve_home() -> PathBuf {
    if std::env::var_os("TERMUX_VERSION").is_some() {
        return PathBuf::from(TERMUX_STORAGE_ROOT);
    }
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dirs_lays_out_media_directories() {
        let config = AppConfig::from_dirs(Path::new("/data/user"), PathBuf::from("/data/cache"));
        assert_eq!(config.target_dir, PathBuf::from("/data/user/YouTube Videos"));
        assert_eq!(config.music_dir, PathBuf::from("/data/user/Music"));
        assert_eq!(config.cache_dir, PathBuf::from("/data/cache"));
    }

    #[test]
    fn from_environment_names_the_cache_subdirectory() {
        let config = AppConfig::from_environment();
        assert!(config.cache_dir.ends_with("ytd-go"));
    }
}
