//! Configuration loading from shelf.toml.

use library::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where the library is stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// How the book list is shown.
    #[serde(default)]
    pub view: ViewConfig,

    /// Log output.
    #[serde(default)]
    pub log: LogConfig,
}

/// Storage configuration.
#[derive(Debug, Deserialize, Default)]
pub struct StorageConfig {
    /// SQLite file holding the library. Defaults to the user data directory.
    pub path: Option<PathBuf>,
}

/// Book list configuration.
#[derive(Debug, Deserialize)]
pub struct ViewConfig {
    /// Books per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration.
    pub fn default_config() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.view.page_size == 0 {
            return Err(ConfigError::Invalid(
                "view.page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The database path: the configured one, or `library.db` in the data
    /// directory.
    pub fn database_path(&self) -> PathBuf {
        self.storage.path.clone().unwrap_or_else(|| {
            dirs_data_dir()
                .unwrap_or_else(|| ".shelf".into())
                .join("library.db")
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

fn dirs_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share/shelf"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share")))
            .map(|p| p.join("shelf"))
    }
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|h| PathBuf::from(h).join("shelf"))
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.view.page_size, 6);
        assert_eq!(config.log.level, "warn");
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn parse_all_sections() {
        let toml = r#"
[storage]
path = "/tmp/books.db"

[view]
page_size = 10

[log]
level = "debug"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/books.db"));
        assert_eq!(config.view.page_size, 10);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = Config::parse("[view]\npage_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse("[view\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn default_database_is_library_db() {
        let path = Config::default_config().database_path();
        assert_eq!(path.file_name().unwrap(), "library.db");
    }
}
