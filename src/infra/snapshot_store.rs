// ============================================================
// Layer 6 — Snapshot Store
// ============================================================
// Persists the trained model as a single JSON blob.
//
// What gets saved:
//   model_snapshot.json — sizes, learning rate, both weight
//                         matrices, both bias vectors
//
// Why JSON?
//   The snapshot is tiny (a few KB for the default 32→8→1
//   architecture), human-inspectable when debugging a bad
//   model, and serde_json round-trips every f64 exactly —
//   a reloaded network reproduces forward passes bit-for-bit.
//
// Lifecycle contract:
//   - Written ONLY by a successful training run (overwriting
//     the previous snapshot in one write)
//   - Loaded once per orchestration or healing run
//   - Validation of the loaded contents (dimension checks)
//     belongs to the Classifier, not to this store
//
// Reference: Rust Book §9 (Error Handling), §12 (File I/O)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::ml::network::ModelSnapshot;

/// File name of the snapshot inside the model directory.
const SNAPSHOT_FILE: &str = "model_snapshot.json";

/// Manages saving and loading of the model snapshot.
/// All files live in the configured directory.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `dir`.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        // create_dir_all creates parent directories too, like `mkdir -p`
        // .ok() ignores the error if the directory already exists
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    /// Whether a snapshot has ever been written here.
    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Overwrite the snapshot with the given parameters.
    pub fn save(&self, snapshot: &ModelSnapshot) -> Result<()> {
        let path = self.path();

        // to_string_pretty so a bad model can be eyeballed
        let json = serde_json::to_string_pretty(snapshot)?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot to '{}'", path.display()))?;

        tracing::debug!("Saved model snapshot to '{}'", path.display());
        Ok(())
    }

    /// Read the snapshot back. Errors when no snapshot exists or
    /// the file is unreadable — callers decide whether that means
    /// "retrain" (orchestrator) or "abort" (healer).
    pub fn load(&self) -> Result<ModelSnapshot> {
        let path = self.path();

        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read model snapshot from '{}'. \
                 Have you run 'train' first?",
                path.display()
            )
        })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed model snapshot in '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::network::NeuralNetwork;
    use rand::{rngs::StdRng, SeedableRng};
    use tempfile::tempdir;

    #[test]
    fn test_exists_before_and_after_save() {
        let dir   = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        assert!(!store.exists());

        let mut rng = StdRng::seed_from_u64(3);
        let net = NeuralNetwork::new(4, 2, 1, 0.1, &mut rng);
        store.save(&net.snapshot()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir   = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        let mut rng = StdRng::seed_from_u64(11);
        let net = NeuralNetwork::new(6, 3, 1, 0.25, &mut rng);
        store.save(&net.snapshot()).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.is_consistent());

        let restored = NeuralNetwork::from_snapshot(loaded);
        let x = [0.0, 0.5, 1.0, 0.25, 0.75, 0.1];
        assert_eq!(net.forward(&x), restored.forward(&x));
    }

    #[test]
    fn test_load_without_snapshot_errors() {
        let dir   = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        assert!(store.load().is_err());
    }
}
