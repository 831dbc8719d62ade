use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Time-related constants
// =============================================================================

/// How long a cached check result stays valid (30 minutes)
pub const CACHE_TTL_MS: i64 = 30 * 60 * 1000;

/// Timeout for each request against the release feed
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Release feed constants
// =============================================================================

/// Base URL for the GitHub REST API
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Base URL for human-navigable release pages
pub const GITHUB_HTML_BASE: &str = "https://github.com";

/// Number of tags requested when falling back to the tag list
pub const TAGS_PER_PAGE: u32 = 100;

/// Storage key under which the single check record is kept
pub const CACHE_KEY: &str = "version-info";

/// Returns the path to the data directory for relcheck.
/// Uses $XDG_DATA_HOME/relcheck if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/relcheck,
/// or ./relcheck if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the cache database file.
pub fn db_path() -> PathBuf {
    data_dir().join("cache.db")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("relcheck")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/relcheck"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/relcheck"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./relcheck"));
    }
}
