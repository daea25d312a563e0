use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const BASE_PATH_ENV: &str = "REELNOTES_BASE_PATH";

/// Container base directory, only when `REELNOTES_BASE_PATH` names an existing directory
pub fn container_base_path() -> Option<PathBuf> {
    base_path_from(std::env::var_os(BASE_PATH_ENV))
}

fn base_path_from(value: Option<OsString>) -> Option<PathBuf> {
    value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.is_dir())
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelnotes");

        Ok(Self::from_base(base_dir))
    }

    /// Lay out config, data and logs under a single directory
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join("search_history.json")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = container_base_path() {
            return Self::from_base(base);
        }

        // Platform config dir (e.g. ~/.config/reelnotes on Linux), else the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".reelnotes")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base(PathBuf::from("/tmp/reelnotes"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/reelnotes/config.toml"));
        assert_eq!(paths.history_file(), PathBuf::from("/tmp/reelnotes/data/search_history.json"));
    }

    #[test]
    fn test_base_path_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(base_path_from(None), None);
        assert_eq!(base_path_from(Some(OsString::new())), None);
        assert_eq!(base_path_from(Some(dir.path().join("missing").into_os_string())), None);
        assert_eq!(
            base_path_from(Some(dir.path().as_os_str().to_owned())),
            Some(dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_default_without_base_path_uses_platform_dir() {
        if std::env::var_os(BASE_PATH_ENV).is_some() {
            return;
        }

        let paths = PathManager::default();
        assert!(paths.config_dir().ends_with("reelnotes") || paths.config_dir().ends_with(".reelnotes"));
        assert_ne!(paths.config_dir(), Path::new("/app"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("base"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
