use anyhow::{anyhow, Result};
use reelnotes_models::MovieId;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Recently searched titles, oldest first, without duplicates
#[derive(Debug, Clone)]
pub struct SearchHistory {
    path: PathBuf,
}

impl SearchHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<MovieId>> {
        if !self.path.exists() {
            debug!("Search history miss (file does not exist)");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Vec<MovieId>>(&content) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                warn!("Search history corruption detected: {}. Deleting corrupted file.", e);
                if let Err(rm_err) = std::fs::remove_file(&self.path) {
                    warn!("Failed to delete corrupted search history: {}", rm_err);
                }
                Ok(Vec::new())
            }
        }
    }

    /// Append `id` unless it is already in the history
    pub fn record(&self, id: &MovieId) -> Result<()> {
        let mut ids = self.load()?;
        if ids.contains(id) {
            return Ok(());
        }
        ids.push(id.clone());
        self.save(&ids)
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            debug!("Cleared search history: {:?}", self.path);
        }
        Ok(())
    }

    fn save(&self, ids: &[MovieId]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(ids)
            .map_err(|e| anyhow!("Failed to serialize search history: {}", e))?;
        std::fs::write(&self.path, json)
            .map_err(|e| anyhow!("Failed to write search history: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str) -> MovieId {
        MovieId::parse(id).unwrap()
    }

    #[test]
    fn test_empty_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let history = SearchHistory::new(dir.path().join("history.json"));
        assert!(history.load().unwrap().is_empty());
    }

    #[test]
    fn test_record_deduplicates_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let history = SearchHistory::new(dir.path().join("data").join("history.json"));

        history.record(&movie("tt0111161")).unwrap();
        history.record(&movie("tt0068646")).unwrap();
        history.record(&movie("tt0111161")).unwrap();

        assert_eq!(history.load().unwrap(), vec![movie("tt0111161"), movie("tt0068646")]);
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let history = SearchHistory::new(dir.path().join("history.json"));

        history.record(&movie("tt0111161")).unwrap();
        history.clear().unwrap();
        assert!(history.load().unwrap().is_empty());

        // Clearing twice is fine
        history.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[\"not-an-id\"]").unwrap();

        let history = SearchHistory::new(&path);
        assert!(history.load().unwrap().is_empty());
        assert!(!path.exists());
    }
}
