//! Persisted best score for the human front ends
//!
//! The file holds a single integer. Any failure to read or write it is
//! logged and otherwise ignored, so a broken or read-only file never stops
//! a game.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored high score, or 0 when the file is missing or unreadable
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(err) => {
                tracing::debug!("high score unavailable, using 0: {:#}", err);
                0
            }
        }
    }

    /// Persist `score` if it beats the stored one; returns the best known score
    pub fn record(&self, score: u32) -> u32 {
        let current = self.load();
        if score <= current {
            return current;
        }

        if let Err(err) = self.try_save(score) {
            tracing::warn!("could not save high score to {:?}: {:#}", self.path, err);
        }
        score
    }

    fn try_load(&self) -> Result<u32> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        text.trim()
            .parse()
            .with_context(|| format!("Malformed high score in {:?}", self.path))
    }

    fn try_save(&self, score: u32) -> Result<()> {
        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write {:?}", self.path))
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(temp_dir.path().join("highscore.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_malformed_file_loads_zero() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("highscore.txt");
        std::fs::write(&path, "not a number").unwrap();

        assert_eq!(HighScoreStore::new(path).load(), 0);
    }

    #[test]
    fn test_record_only_raises() {
        let temp_dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(temp_dir.path().join("highscore.txt"));

        assert_eq!(store.record(5), 5);
        assert_eq!(store.load(), 5);

        assert_eq!(store.record(3), 5);
        assert_eq!(store.load(), 5);

        assert_eq!(store.record(9), 9);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "9");
    }

    #[test]
    fn test_unwritable_location_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in place of the file makes both read and write fail.
        let store = HighScoreStore::new(temp_dir.path());

        assert_eq!(store.record(4), 4);
        assert_eq!(store.load(), 0);
    }
}
