//! Configuration for yts-cli.
//!
//! Read from `~/.config/yts-cli/config.toml` at startup. If the file doesn't
//! exist, a commented default is written and the defaults are used.

pub mod colors;

pub use colors::ColorConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    pub catalog: CatalogConfig,
    pub metadata: MetadataConfig,
    pub download: DownloadConfig,
    pub colors: ColorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            catalog: CatalogConfig::default(),
            metadata: MetadataConfig::default(),
            download: DownloadConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

/// Torrent catalog API and browse pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Time budget per page request, in seconds.
    pub budget_secs: u64,
    /// Search pages scanned when resolving a browse title to a record.
    pub exact_match_max_pages: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://yts.mx".to_string(),
            budget_secs: 3,
            exact_match_max_pages: 5,
        }
    }
}

impl CatalogConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.budget_secs)
    }
}

/// Movie information site scraped for the detail view.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub base_url: String,
    pub budget_secs: u64,
    pub cast_limit: usize,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.imdb.com".to_string(),
            budget_secs: 10,
            cast_limit: 9,
        }
    }
}

impl MetadataConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.budget_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Falls back to the platform download directory.
    pub dir: Option<PathBuf>,
    pub budget_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: None,
            budget_secs: 10,
        }
    }
}

impl DownloadConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.budget_secs)
    }

    pub fn resolved_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Config {
    /// Load configuration from the default path, creating it when missing.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing the commented default there first
    /// if nothing exists yet. Missing keys take their default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/yts-cli/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("yts-cli").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, DEFAULT_CONFIG).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

const DEFAULT_CONFIG: &str = r##"# yts-cli configuration
#
# Colors can be named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB" / "#RGB").

# User-Agent sent with every request
# user_agent = "Mozilla/5.0 ..."

[catalog]
base_url = "https://yts.mx"

# Give up on a catalog page after this many seconds of failed attempts
budget_secs = 3

# Search pages scanned when matching a browsed title to its catalog entry
exact_match_max_pages = 5

[metadata]
base_url = "https://www.imdb.com"
budget_secs = 10

# Number of cast members shown
cast_limit = 9

[download]
# Where .torrent files are saved (default: your Downloads folder)
# dir = "/home/me/Downloads"
budget_secs = 10

[colors]
prompt = "Cyan"
query = "White"
match_highlight = "Yellow"
selection_fg = "Black"
selection_bg = "Cyan"
border = "DarkGray"
status_fg = "White"
status_bg = "DarkGray"
heading_name = "Yellow"
heading_director = "#FFA500"
heading_synopsis = "Blue"
heading_rating = "Magenta"
heading_cast = "Green"
"##;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config =
            toml::from_str(DEFAULT_CONFIG).expect("Default config should be valid TOML");

        assert_eq!(config.catalog.base_url, "https://yts.mx");
        assert_eq!(config.catalog.budget(), Duration::from_secs(3));
        assert_eq!(config.metadata.cast_limit, 9);
        assert_eq!(config.colors.heading_director, Color::Rgb(255, 165, 0));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[catalog]
budget_secs = 5

[download]
dir = "/tmp/torrents"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.catalog.budget(), Duration::from_secs(5));
        assert_eq!(config.catalog.exact_match_max_pages, 5);
        assert_eq!(config.download.resolved_dir(), PathBuf::from("/tmp/torrents"));
        assert_eq!(config.metadata.budget(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.metadata.base_url, "https://www.imdb.com");
        assert_eq!(config.download.budget(), Duration::from_secs(10));
        assert_eq!(config.colors.prompt, Color::Cyan);
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.catalog.exact_match_max_pages, 5);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.catalog.base_url, config.catalog.base_url);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[catalog\nbase_url = 1").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
