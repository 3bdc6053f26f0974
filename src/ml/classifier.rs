// ============================================================
// Layer 5 — Classifier
// ============================================================
// Composes the FeatureEncoder and the NeuralNetwork into a
// name → category predictor, and owns the model lifecycle:
// build training set → train → evaluate → save / load.
//
// Single-output-unit design (THE confidence scheme, fixed once):
//   The network has exactly one output unit. Target encoding is
//   Drink → 1.0, Food → 0.0. The decision rule is
//       output ≥ 0.5 → Drink, else Food
//   and the confidence is the winning activation,
//       confidence = max(output, 1 − output)  ∈ [0.5, 1] ⊂ [0, 1].
//   Every downstream confidence gate (auto-heal) depends on this
//   exact formula. It assumes strictly two classes — a third
//   class is a redesign, not a tweak.
//
// Snapshot lifecycle: `auto_train` is the ONLY path that writes
// a snapshot. `load` never throws on a stale or mismatched
// snapshot — it returns Ok(false) so callers fall back to
// retraining from scratch.
//
// Reference: Rust Book §5 (Structs), §9 (Error Handling)

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::data::dataset::LabeledExample;
use crate::data::encoder::FeatureEncoder;
use crate::domain::category::ItemCategory;
use crate::domain::healing::PredictionResult;
use crate::domain::record::CatalogRecord;
use crate::domain::traits::CatalogStore;
use crate::infra::snapshot_store::SnapshotStore;
use crate::ml::network::NeuralNetwork;

// ─── Classifier Configuration ────────────────────────────────────────────────
// Hyperparameters for one training run. Serialisable so a run's
// settings can be logged and reproduced. The input size is never
// configurable — it is always the encoder's vector length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub hidden_size:   usize,
    pub learning_rate: f64,
    pub iterations:    usize,
    pub seed:          u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            hidden_size:   8,
            learning_rate: 0.3,
            iterations:    500,
            seed:          42,
        }
    }
}

// ─── Classifier ───────────────────────────────────────────────────────────────
pub struct Classifier {
    encoder:    FeatureEncoder,
    network:    NeuralNetwork,
    iterations: usize,
}

impl Classifier {
    /// Build a fresh, untrained classifier. Weight initialisation
    /// is driven entirely by `config.seed`, so two classifiers
    /// built from the same config behave identically.
    pub fn new(config: ClassifierConfig) -> Self {
        let encoder = FeatureEncoder::new();
        let mut rng = StdRng::seed_from_u64(config.seed);

        // One output unit — see the confidence scheme above
        let network = NeuralNetwork::new(
            encoder.len(),
            config.hidden_size,
            1,
            config.learning_rate,
            &mut rng,
        );

        Self {
            encoder,
            network,
            iterations: config.iterations,
        }
    }

    /// Encode a corpus into training pairs. Records whose label
    /// is not one of the two supported classes are excluded —
    /// mislabeled rows must not teach the model their mistake.
    pub fn build_training_set(&self, corpus: &[CatalogRecord]) -> Vec<LabeledExample> {
        corpus
            .iter()
            .filter_map(|record| {
                ItemCategory::parse_label(&record.label).map(|category| {
                    LabeledExample::new(
                        self.encoder.encode(&record.name),
                        vec![category.target()],
                    )
                })
            })
            .collect()
    }

    /// Train on a corpus for the configured iteration count.
    pub fn train(&mut self, corpus: &[CatalogRecord]) {
        let training_set = self.build_training_set(corpus);
        tracing::info!(
            "Training on {} examples ({} records supplied) for {} iterations",
            training_set.len(),
            corpus.len(),
            self.iterations,
        );
        self.network.train(&training_set, self.iterations);
    }

    /// Accuracy of the decision rule against stored labels,
    /// as a percentage of the corpus.
    pub fn evaluate(&self, corpus: &[CatalogRecord]) -> f64 {
        if corpus.is_empty() {
            return 0.0;
        }

        let matches = corpus
            .iter()
            .filter(|record| {
                ItemCategory::parse_label(&record.label)
                    == Some(self.predict(&record.name).category)
            })
            .count();

        matches as f64 / corpus.len() as f64 * 100.0
    }

    /// Classify one name. Confidence is the winning activation
    /// of the binary decision rule (header comment).
    pub fn predict(&self, name: &str) -> PredictionResult {
        let output = self.network.predict(&self.encoder.encode(name))[0];

        if output >= 0.5 {
            PredictionResult {
                category:   ItemCategory::Drink,
                confidence: output,
            }
        } else {
            PredictionResult {
                category:   ItemCategory::Food,
                confidence: 1.0 - output,
            }
        }
    }

    /// Try to adopt a persisted snapshot. Returns Ok(false) —
    /// never an error — when the snapshot is absent, unreadable,
    /// or its dimensions disagree with the current encoder, so
    /// the caller can fall back to retraining.
    pub fn load(&mut self, store: &SnapshotStore) -> Result<bool> {
        if !store.exists() {
            return Ok(false);
        }

        let snapshot = match store.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!("Snapshot unreadable, will retrain: {err:#}");
                return Ok(false);
            }
        };

        // A snapshot trained against a different feature length
        // (or with mangled matrices) must be rejected outright,
        // never reshaped to fit
        if snapshot.input_size != self.encoder.len() || !snapshot.is_consistent() {
            tracing::warn!(
                "Snapshot dimensions ({} inputs) do not match encoder ({}), will retrain",
                snapshot.input_size,
                self.encoder.len(),
            );
            return Ok(false);
        }

        self.network = NeuralNetwork::from_snapshot(snapshot);
        Ok(true)
    }

    /// Persist the current parameters as the new snapshot.
    pub fn save(&self, store: &SnapshotStore) -> Result<()> {
        store.save(&self.network.snapshot())
    }

    /// The only snapshot-mutating path: fetch every record whose
    /// stored label is a supported class, train on them, and
    /// overwrite the snapshot. A datastore read failure aborts
    /// before anything is written — no partial snapshot.
    pub fn auto_train(
        &mut self,
        catalog:        &dyn CatalogStore,
        snapshot_store: &SnapshotStore,
    ) -> Result<()> {
        let corpus: Vec<CatalogRecord> = catalog
            .fetch_all()?
            .into_iter()
            .filter(|record| ItemCategory::parse_label(&record.label).is_some())
            .collect();

        self.train(&corpus);
        self.save(snapshot_store)?;

        tracing::info!("Snapshot saved after training on {} records", corpus.len());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::FEATURE_LEN;

    fn record(id: u64, name: &str, label: &str) -> CatalogRecord {
        CatalogRecord::new(id, name, label)
    }

    #[test]
    fn test_training_set_excludes_unsupported_labels() {
        let classifier = Classifier::new(ClassifierConfig::default());
        let corpus = vec![
            record(1, "Teh Manis", "Drink"),
            record(2, "Rendang", "Food"),
            record(3, "Kerupuk", "Snack"),
            record(4, "???", ""),
        ];

        let set = classifier.build_training_set(&corpus);
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].target, vec![1.0]);
        assert_eq!(set[1].target, vec![0.0]);
        assert!(set.iter().all(|ex| ex.features.len() == FEATURE_LEN));
    }

    #[test]
    fn test_prediction_confidence_is_winning_activation() {
        let classifier = Classifier::new(ClassifierConfig::default());
        let prediction = classifier.predict("Kopi Hitam");

        // Whatever the untrained output, the winning side is
        // always at least as likely as the losing one
        assert!(prediction.confidence >= 0.5);
        assert!(prediction.confidence <= 1.0);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let classifier = Classifier::new(ClassifierConfig::default());
        assert_eq!(classifier.predict("Es Jeruk"), classifier.predict("Es Jeruk"));
    }

    #[test]
    fn test_load_rejects_dimension_mismatch() {
        use tempfile::tempdir;

        let dir   = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        // Persist a snapshot with the wrong input size
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let wrong   = NeuralNetwork::new(FEATURE_LEN + 1, 4, 1, 0.1, &mut rng);
        store.save(&wrong.snapshot()).unwrap();

        let mut classifier = Classifier::new(ClassifierConfig::default());
        assert_eq!(classifier.load(&store).unwrap(), false);
    }

    #[test]
    fn test_load_returns_false_when_absent() {
        use tempfile::tempdir;

        let dir            = tempdir().unwrap();
        let store          = SnapshotStore::new(dir.path());
        let mut classifier = Classifier::new(ClassifierConfig::default());
        assert_eq!(classifier.load(&store).unwrap(), false);
    }

    #[test]
    fn test_save_then_load_reproduces_predictions() {
        use tempfile::tempdir;

        let corpus = vec![
            record(1, "Kopi Hitam", "Drink"),
            record(2, "Teh Manis", "Drink"),
            record(3, "Nasi Goreng", "Food"),
            record(4, "Sate Ayam", "Food"),
        ];

        let mut trained = Classifier::new(ClassifierConfig::default());
        trained.train(&corpus);

        let dir   = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        trained.save(&store).unwrap();

        let mut reloaded = Classifier::new(ClassifierConfig::default());
        assert!(reloaded.load(&store).unwrap());

        for name in ["Kopi Hitam", "Nasi Goreng", "Es Teh"] {
            assert_eq!(trained.predict(name), reloaded.predict(name));
        }
    }
}
