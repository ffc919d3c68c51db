//! Whole-file JSON table shared by the file repositories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{RepositoryError, Result};

/// A row type keyed by a numeric id.
pub(super) trait Row: Serialize + DeserializeOwned {
    fn key(&self) -> u32;
}

/// One JSON file holding every row of a table as a pretty-printed array.
///
/// Writes go through a temp file followed by an atomic rename. The mutex
/// serializes read-modify-write cycles within this process.
pub(super) struct JsonTable {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonTable {
    pub(super) fn open(base_dir: &Path, file_name: &str) -> Result<Self> {
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join(file_name),
            guard: Mutex::new(()),
        })
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all rows. A missing file is an empty table.
    pub(super) fn read_all<R: Row>(&self) -> Result<BTreeMap<u32, R>> {
        let _lock = self.guard.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        self.read_unlocked()
    }

    pub(super) fn get<R: Row>(&self, key: u32) -> Result<Option<R>> {
        Ok(self.read_all::<R>()?.remove(&key))
    }

    /// Applies `change` to the table and writes it back.
    pub(super) fn modify<R, F>(&self, change: F) -> Result<()>
    where
        R: Row,
        F: FnOnce(&mut BTreeMap<u32, R>),
    {
        let _lock = self.guard.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        let mut rows = self.read_unlocked()?;
        change(&mut rows);
        self.write_unlocked(&rows)
    }

    fn read_unlocked<R: Row>(&self) -> Result<BTreeMap<u32, R>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let bytes = fs::read(&self.path)?;
        let rows: Vec<R> =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;

        let mut table = BTreeMap::new();
        for row in rows {
            let key = row.key();
            if table.insert(key, row).is_some() {
                return Err(RepositoryError::CorruptedData(format!(
                    "duplicate row {} in {}",
                    key,
                    self.path.display()
                )));
            }
        }
        Ok(table)
    }

    fn write_unlocked<R: Row>(&self, rows: &BTreeMap<u32, R>) -> Result<()> {
        let rows: Vec<&R> = rows.values().collect();
        let json =
            serde_json::to_vec_pretty(&rows).map_err(|e| RepositoryError::Json(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
