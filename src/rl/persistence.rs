//! Saving and loading learned value tables
//!
//! A table is written as JSON to `<path>` with a metadata side file next to
//! it, extension swapped for `.meta.json` (`q_table.json` pairs with
//! `q_table.meta.json`). Every stored pair round-trips exactly, floats
//! included.

use super::{QLearningConfig, QTable};
use super::q_table::QEntry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata saved with the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Hyperparameters used during training
    pub q_config: QLearningConfig,

    /// Grid side length the table was learned on
    pub grid_size: usize,

    /// Total environment steps during training
    pub training_steps: usize,

    /// Number of episodes trained
    pub episodes_trained: usize,

    /// Version identifier for compatibility checking
    pub version: String,
}

impl ModelMetadata {
    /// Create new metadata
    pub fn new(
        q_config: QLearningConfig,
        grid_size: usize,
        training_steps: usize,
        episodes_trained: usize,
    ) -> Self {
        Self {
            q_config,
            grid_size,
            training_steps,
            episodes_trained,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct TableRecord {
    entries: Vec<QEntry>,
}

/// Path of the metadata side file for a table path
pub fn metadata_path(path: &Path) -> PathBuf {
    path.with_extension("meta.json")
}

/// Save a value table and its metadata
///
/// Creates parent directories if they don't exist.
pub fn save_q_table(table: &QTable, metadata: &ModelMetadata, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let record = TableRecord {
        entries: table.entries(),
    };
    let table_json = serde_json::to_string(&record).context("Failed to serialize value table")?;
    std::fs::write(path, table_json)
        .with_context(|| format!("Failed to write value table to {:?}", path))?;

    let meta_path = metadata_path(path);
    let meta_json =
        serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    tracing::debug!(path = ?path, entries = table.len(), "saved value table");

    Ok(())
}

/// Load a value table and its metadata
///
/// The table file is required. A missing or unreadable metadata file only
/// yields `None`, since the table alone is enough for greedy playback.
pub fn load_q_table(path: &Path) -> Result<(QTable, Option<ModelMetadata>)> {
    let table_json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read value table from {:?}", path))?;
    let record: TableRecord =
        serde_json::from_str(&table_json).context("Failed to deserialize value table")?;
    let table: QTable = record.entries.into_iter().collect();

    let meta_path = metadata_path(path);
    let metadata = match load_metadata(&meta_path) {
        Ok(metadata) => Some(metadata),
        Err(err) => {
            tracing::warn!("No usable metadata at {:?}: {:#}", meta_path, err);
            None
        }
    };

    tracing::debug!(path = ?path, entries = table.len(), "loaded value table");

    Ok((table, metadata))
}

fn load_metadata(meta_path: &Path) -> Result<ModelMetadata> {
    let meta_json = std::fs::read_to_string(meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    serde_json::from_str(&meta_json).context("Failed to deserialize metadata")
}
