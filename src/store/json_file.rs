// src/store/json_file.rs

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::record::ListingRecord;
use crate::errors::ServerError;
use crate::store::SnapshotStore;

/// Flat-file snapshot store: one pretty-printed JSON array of records.
///
/// Reads and writes go through whole-file load/save. The mutex serializes
/// writers so a scheduler append and an admin clear can't interleave; readers
/// only ever see a fully written file because writes replace the content in
/// one pass.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<Vec<ListingRecord>, ServerError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| ServerError::DbError(format!("Read {} failed: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| ServerError::DbError(format!("Parse {} failed: {e}", self.path.display())))
    }

    fn write_all(&self, records: &[ListingRecord]) -> Result<(), ServerError> {
        let raw = serde_json::to_string_pretty(records)
            .map_err(|e| ServerError::DbError(format!("Serialize failed: {e}")))?;
        fs::write(&self.path, raw)
            .map_err(|e| ServerError::DbError(format!("Write {} failed: {e}", self.path.display())))
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self, scope: &str) -> Result<Vec<ListingRecord>, ServerError> {
        let records = self.read_all()?;
        Ok(records
            .into_iter()
            .filter(|r| r.complex_name == scope)
            .collect())
    }

    fn load_all(&self) -> Result<Vec<ListingRecord>, ServerError> {
        self.read_all()
    }

    fn append(&self, records: &[ListingRecord]) -> Result<(), ServerError> {
        if records.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().map_err(|_| ServerError::InternalError)?;
        let mut current = self.read_all()?;
        current.extend(records.iter().cloned());
        self.write_all(&current)
    }

    fn clear(&self, scope: &str) -> Result<(), ServerError> {
        let _guard = self.write_lock.lock().map_err(|_| ServerError::InternalError)?;
        let mut current = self.read_all()?;
        current.retain(|r| r.complex_name != scope);
        self.write_all(&current)
    }
}
