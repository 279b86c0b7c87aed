//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOOKCLUB_STORAGE_BACKEND=file                                      │
//! │     BOOKCLUB_API_KEY=...                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/book-club/bookclub.toml (Linux)                          │
//! │     ~/Library/Application Support/com.stormy.book-club/bookclub.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     SQLite backend, key "stormyBookClub", Google Books, 12 results     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! backend = "sqlite"          # sqlite | file | memory
//! key = "stormyBookClub"
//! path = "/home/me/books.db"  # db file (sqlite) or directory (file)
//!
//! [search]
//! endpoint = "https://www.googleapis.com/books/v1/volumes"
//! max_results = 12
//! timeout_secs = 10
//! # api_key = "..."
//!
//! [books]
//! placeholder_cover_url = "https://via.placeholder.com/150x200?text=No+Cover"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use bookclub_core::{DEFAULT_COVER_URL, DEFAULT_STORAGE_KEY};
use bookclub_search::{GoogleBooksConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_RESULTS};
use bookclub_store::StoreOptions;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

const CONFIG_FILE_NAME: &str = "bookclub.toml";
const SQLITE_FILE_NAME: &str = "bookclub.db";

/// Google Books accepts at most 40 results per page.
pub const MAX_SEARCH_RESULTS: u32 = 40;

// =============================================================================
// Storage
// =============================================================================

/// Which blob store backs the reading list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Sqlite,
    File,
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::File => write!(f, "file"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "db" => Ok(BackendKind::Sqlite),
            "file" | "json" => Ok(BackendKind::File),
            "memory" | "mem" => Ok(BackendKind::Memory),
            other => Err(ConfigError::Invalid(format!(
                "Unknown storage backend: '{}'. Valid options: sqlite, file, memory",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// Blob key the reading list is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// SQLite file, or directory for the file backend.
    /// Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            backend: BackendKind::default(),
            key: default_storage_key(),
            path: None,
        }
    }
}

impl StorageConfig {
    /// Where the configured backend keeps its data, if anywhere.
    ///
    /// ## Platform-Specific Defaults
    /// - **Linux**: `~/.local/share/book-club/`
    /// - **macOS**: `~/Library/Application Support/com.stormy.book-club/`
    /// - **Windows**: `%APPDATA%\stormy\book-club\data\`
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match self.backend {
            BackendKind::Memory => None,
            BackendKind::Sqlite => self
                .path
                .clone()
                .or_else(|| data_dir().map(|dir| dir.join(SQLITE_FILE_NAME))),
            BackendKind::File => self.path.clone().or_else(data_dir),
        }
    }
}

// =============================================================================
// Search
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_max_results")]
    pub max_results: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            endpoint: default_endpoint(),
            max_results: default_max_results(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SearchConfig {
    pub fn client_config(&self) -> GoogleBooksConfig {
        GoogleBooksConfig::default()
            .endpoint(self.endpoint.clone())
            .api_key(self.api_key.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
    }
}

// =============================================================================
// Books
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooksConfig {
    #[serde(default = "default_placeholder_cover_url")]
    pub placeholder_cover_url: String,
}

fn default_placeholder_cover_url() -> String {
    DEFAULT_COVER_URL.to_string()
}

impl Default for BooksConfig {
    fn default() -> Self {
        BooksConfig {
            placeholder_cover_url: default_placeholder_cover_url(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub books: BooksConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (bookclub.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.key must not be empty".into()));
        }

        let endpoint = &self.search.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "search.endpoint must start with http:// or https://, got: {}",
                endpoint
            )));
        }

        if !(1..=MAX_SEARCH_RESULTS).contains(&self.search.max_results) {
            return Err(ConfigError::Invalid(format!(
                "search.max_results must be between 1 and {}",
                MAX_SEARCH_RESULTS
            )));
        }

        if self.search.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "search.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.books.placeholder_cover_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "books.placeholder_cover_url must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Applies `BOOKCLUB_*` overrides read through `lookup`.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = lookup("BOOKCLUB_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(_) => warn!(backend = %backend, "Unknown storage backend in environment"),
            }
        }

        if let Some(key) = lookup("BOOKCLUB_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(path) = lookup("BOOKCLUB_DATA_PATH") {
            debug!(path = %path, "Overriding data path from environment");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(endpoint) = lookup("BOOKCLUB_SEARCH_ENDPOINT") {
            self.search.endpoint = endpoint;
        }

        if let Some(max) = lookup("BOOKCLUB_SEARCH_MAX_RESULTS") {
            if let Ok(n) = max.parse::<u32>() {
                self.search.max_results = n;
            }
        }

        if let Some(key) = lookup("BOOKCLUB_API_KEY") {
            if !key.is_empty() {
                self.search.api_key = Some(key);
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::default()
            .with_key(self.storage.key.clone())
            .with_placeholder_cover_url(self.books.placeholder_cover_url.clone())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "stormy", "book-club")
}

fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, BackendKind::Sqlite);
        assert_eq!(config.storage.key, "stormyBookClub");
        assert_eq!(config.search.max_results, 12);
        assert_eq!(config.search.endpoint, "https://www.googleapis.com/books/v1/volumes");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("sqlite".parse::<BackendKind>().unwrap(), BackendKind::Sqlite);
        assert_eq!("FILE".parse::<BackendKind>().unwrap(), BackendKind::File);
        assert_eq!("memory".parse::<BackendKind>().unwrap(), BackendKind::Memory);
        assert!("redis".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [storage]
            backend = "file"
            path = "/tmp/books"

            [search]
            max_results = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.storage.key, "stormyBookClub");
        assert_eq!(config.storage.resolved_path(), Some(PathBuf::from("/tmp/books")));
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.search.timeout_secs, 10);
        assert_eq!(config.books, BooksConfig::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bookclub.toml");

        let mut config = AppConfig::default();
        config.storage.backend = BackendKind::Memory;
        config.storage.key = "myClub".to_string();
        config.search.api_key = Some("abc".to_string());
        config.save(Some(path.clone())).unwrap();

        assert_eq!(AppConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookclub.toml");
        std::fs::write(&path, "[storage\nbackend = ").unwrap();

        assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.storage.key = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.search.endpoint = "ftp://books".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.search.max_results = 0;
        assert!(config.validate().is_err());
        config.search.max_results = 41;
        assert!(config.validate().is_err());
        config.search.max_results = 40;
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.search.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(lookup_from(&[
            ("BOOKCLUB_STORAGE_BACKEND", "file"),
            ("BOOKCLUB_STORAGE_KEY", "otherClub"),
            ("BOOKCLUB_DATA_PATH", "/srv/books"),
            ("BOOKCLUB_SEARCH_ENDPOINT", "http://localhost:8080/volumes"),
            ("BOOKCLUB_SEARCH_MAX_RESULTS", "5"),
            ("BOOKCLUB_API_KEY", "secret"),
        ]));

        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.storage.key, "otherClub");
        assert_eq!(config.storage.path, Some(PathBuf::from("/srv/books")));
        assert_eq!(config.search.endpoint, "http://localhost:8080/volumes");
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(lookup_from(&[
            ("BOOKCLUB_STORAGE_BACKEND", "redis"),
            ("BOOKCLUB_SEARCH_MAX_RESULTS", "many"),
            ("BOOKCLUB_API_KEY", ""),
        ]));

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_memory_backend_has_no_path() {
        let mut storage = StorageConfig::default();
        storage.backend = BackendKind::Memory;
        storage.path = Some(PathBuf::from("/ignored"));
        assert_eq!(storage.resolved_path(), None);
    }

    #[test]
    fn test_store_options_follow_config() {
        let mut config = AppConfig::default();
        config.storage.key = "club".to_string();
        config.books.placeholder_cover_url = "file:///blank.png".to_string();

        let options = config.store_options();
        assert_eq!(options.key, "club");
        assert_eq!(options.placeholder_cover_url, "file:///blank.png");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_platform_paths_on_linux() {
        // No home directory means no platform paths at all.
        let Some(config_path) = AppConfig::default_config_path() else {
            return;
        };
        assert!(config_path.ends_with("book-club/bookclub.toml"));

        let sqlite = StorageConfig::default().resolved_path().unwrap();
        assert!(sqlite.ends_with("book-club/bookclub.db"));

        let file = StorageConfig {
            backend: BackendKind::File,
            ..StorageConfig::default()
        };
        assert!(file.resolved_path().unwrap().ends_with("book-club"));
    }
}
