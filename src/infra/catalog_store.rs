// ============================================================
// Layer 6 — JSON Catalog Store
// ============================================================
// A flat-file implementation of the CatalogStore contract.
//
// The file is one JSON array of {id, name, label} objects —
// the narrow view and nothing else. That is the whole point of
// the contract: the core never learns what other fields the
// real catalog carries.
//
// Write strategy:
//   update_label mutates the in-memory copy and rewrites the
//   whole file. For a batch tool over a small catalog this is
//   simpler and safer than partial writes; a real database
//   behind the same trait would do a row update instead.
//
// Errors are surfaced as CoreError::Datastore so callers can
// tell a store failure apart from everything else.
//
// Reference: Rust Book §9 (Error Handling), §12 (File I/O)

use anyhow::Result;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::CoreError;
use crate::domain::record::CatalogRecord;
use crate::domain::traits::CatalogStore;

pub struct JsonCatalogStore {
    path:    PathBuf,
    records: Vec<CatalogRecord>,
}

impl JsonCatalogStore {
    /// Open a catalog file and load all records into memory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let json = fs::read_to_string(&path).map_err(|e| {
            CoreError::Datastore(format!("cannot read catalog '{}': {e}", path.display()))
        })?;

        let records: Vec<CatalogRecord> = serde_json::from_str(&json).map_err(|e| {
            CoreError::Datastore(format!("malformed catalog '{}': {e}", path.display()))
        })?;

        tracing::debug!("Loaded {} catalog records from '{}'", records.len(), path.display());
        Ok(Self { path, records })
    }

    /// Create a catalog file from a set of records (used by
    /// tests and seeding scripts).
    pub fn create(path: impl AsRef<Path>, records: Vec<CatalogRecord>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&path, &json).map_err(|e| {
            CoreError::Datastore(format!("cannot write catalog '{}': {e}", path.display()))
        })?;
        Ok(Self { path, records })
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, json).map_err(|e| {
            CoreError::Datastore(format!(
                "cannot write catalog '{}': {e}",
                self.path.display()
            ))
        })?;
        Ok(())
    }
}

impl CatalogStore for JsonCatalogStore {
    fn fetch_all(&self) -> Result<Vec<CatalogRecord>> {
        Ok(self.records.clone())
    }

    fn update_label(&mut self, id: u64, label: &str) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::Datastore(format!("no record with id {id}")))?;

        record.label = label.to_string();
        self.flush()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_records() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord::new(1, "Kopi Hitam", "Drink"),
            CatalogRecord::new(2, "Nasi Goreng", "Food"),
        ]
    }

    #[test]
    fn test_create_then_fetch_all() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let store = JsonCatalogStore::create(&path, sample_records()).unwrap();
        assert_eq!(store.fetch_all().unwrap(), sample_records());
    }

    #[test]
    fn test_update_label_persists() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut store = JsonCatalogStore::create(&path, sample_records()).unwrap();
        store.update_label(2, "Drink").unwrap();

        // A fresh open sees the write
        let reopened = JsonCatalogStore::open(&path).unwrap();
        let records  = reopened.fetch_all().unwrap();
        assert_eq!(records[1].label, "Drink");
    }

    #[test]
    fn test_update_unknown_id_errors() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut store = JsonCatalogStore::create(&path, sample_records()).unwrap();
        assert!(store.update_label(99, "Drink").is_err());
    }

    #[test]
    fn test_open_missing_file_errors() {
        let dir = tempdir().unwrap();
        assert!(JsonCatalogStore::open(dir.path().join("absent.json")).is_err());
    }
}
