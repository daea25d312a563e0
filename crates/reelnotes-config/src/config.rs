use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub imdb: ImdbConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how the IMDb pages are fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Class-name prefix of the search result section. IMDb generates these
    /// names, so this changes whenever their frontend is rebuilt.
    #[serde(default = "default_search_marker")]
    pub search_marker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Review database file. Relative paths are resolved against the data dir.
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: Option<bool>,
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://www.imdb.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/111.0".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_search_marker() -> String {
    "sc-17bafbdb-2".to_string()
}

fn default_database() -> PathBuf {
    PathBuf::from("Movies.db")
}

fn default_pool_size() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ImdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            search_marker: default_search_marker(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            pool_size: default_pool_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl StoreConfig {
    /// Absolute database path, resolving relative paths against `data_dir`
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        if self.database.is_absolute() {
            self.database.clone()
        } else {
            data_dir.join(&self.database)
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.store.pool_size == 0 {
            return Err(anyhow::anyhow!("store.pool_size must be at least 1"));
        }

        if self.imdb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("imdb.timeout_secs must be greater than zero"));
        }

        if !self.imdb.base_url.starts_with("http://") && !self.imdb.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("imdb.base_url must be an http(s) URL: {}", self.imdb.base_url));
        }

        if self.imdb.search_marker.trim().is_empty() {
            return Err(anyhow::anyhow!("imdb.search_marker cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            imdb: ImdbConfig {
                timeout_secs: 10,
                ..ImdbConfig::default()
            },
            store: StoreConfig {
                database: PathBuf::from("reviews.db"),
                pool_size: 4,
            },
            logging: LoggingConfig::default(),
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.imdb.timeout_secs, 10);
        assert_eq!(loaded.imdb.base_url, "https://www.imdb.com");
        assert_eq!(loaded.store.database, PathBuf::from("reviews.db"));
        assert_eq!(loaded.store.pool_size, 4);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[store]\npool_size = 2\n").unwrap();
        assert_eq!(config.store.pool_size, 2);
        assert_eq!(config.store.database, PathBuf::from("Movies.db"));
        assert_eq!(config.imdb.timeout_secs, 5);
        assert_eq!(config.imdb.search_marker, "sc-17bafbdb-2");
        assert!(config.imdb.user_agent.contains("Firefox"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.store.pool_size, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.store.pool_size = 0;
        assert!(config.validate().is_err());
        config.store.pool_size = 1;

        config.imdb.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.imdb.timeout_secs = 5;

        config.imdb.base_url = "www.imdb.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_path_resolution() {
        let store = StoreConfig::default();
        assert_eq!(
            store.database_path(Path::new("/data")),
            PathBuf::from("/data/Movies.db")
        );

        let absolute = StoreConfig {
            database: PathBuf::from("/srv/reviews.db"),
            pool_size: 1,
        };
        assert_eq!(
            absolute.database_path(Path::new("/data")),
            PathBuf::from("/srv/reviews.db")
        );
    }
}
