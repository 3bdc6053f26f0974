// ============================================================
// Layer 2 — TrainUseCase (Auto-Train Orchestrator)
// ============================================================
// A small state machine that guarantees a usable model exists
// before anything downstream runs:
//
//   NoModel → Training → Evaluating → {Acceptable | Retraining} → Ready
//
// Transitions:
//   1. Try to load the persisted snapshot. On any load failure
//      (absent, unreadable, wrong dimensions) → Training.
//   2. Evaluate accuracy against the supported corpus.
//   3. Below the threshold → Retraining, then re-evaluate
//      EXACTLY ONCE. A single bounded retry, never a loop —
//      a model that stays below threshold still reaches Ready,
//      it is just logged loudly.
//   4. Ready runs a fixed battery of smoke-test predictions so
//      the operator can eyeball what the model actually learned.
//
// Failure semantics: any datastore read failure aborts the whole
// orchestration via `?`; no partial snapshot is ever persisted
// (the classifier writes its snapshot only after training
// completes).
//
// Reference: Rust Book §6 (Enums), §9 (Error Handling)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::category::ItemCategory;
use crate::domain::record::CatalogRecord;
use crate::domain::traits::CatalogStore;
use crate::infra::{catalog_store::JsonCatalogStore, snapshot_store::SnapshotStore};
use crate::ml::classifier::{Classifier, ClassifierConfig};

/// Names fed through the model once it is Ready, purely for
/// operator visibility. A mix both classes should nail.
const SMOKE_TEST_NAMES: &[&str] = &[
    "Kopi Hitam",
    "Teh Manis",
    "Es Jeruk",
    "Nasi Goreng",
    "Sate Ayam",
    "Rendang",
];

// ─── Orchestrator States ──────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    NoModel,
    Training,
    Evaluating,
    Acceptable,
    Retraining,
    Ready,
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrchestratorState::NoModel    => "no-model",
            OrchestratorState::Training   => "training",
            OrchestratorState::Evaluating => "evaluating",
            OrchestratorState::Acceptable => "acceptable",
            OrchestratorState::Retraining => "retraining",
            OrchestratorState::Ready      => "ready",
        };
        f.write_str(name)
    }
}

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a training run needs. Serialisable so a run's
// settings can be logged and reproduced later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub catalog_path: String,
    pub model_dir:    String,

    pub hidden_size:   usize,
    pub learning_rate: f64,
    pub iterations:    usize,
    pub seed:          u64,

    /// Minimum acceptable evaluation accuracy, in percent.
    /// Below this the orchestrator retrains exactly once.
    pub accuracy_threshold: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            catalog_path:       "data/catalog.json".to_string(),
            model_dir:          "model".to_string(),
            hidden_size:        8,
            learning_rate:      0.3,
            iterations:         500,
            seed:               42,
            accuracy_threshold: 90.0,
        }
    }
}

impl TrainConfig {
    fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            hidden_size:   self.hidden_size,
            learning_rate: self.learning_rate,
            iterations:    self.iterations,
            seed:          self.seed,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Open the configured stores and run the orchestration.
    pub fn execute(&self) -> Result<()> {
        let catalog        = JsonCatalogStore::open(&self.config.catalog_path)?;
        let snapshot_store = SnapshotStore::new(&self.config.model_dir);
        self.run(&catalog, &snapshot_store)
    }

    /// The state machine proper, generic over the store so tests
    /// can drive it with an in-memory catalog.
    pub fn run(&self, catalog: &dyn CatalogStore, snapshot_store: &SnapshotStore) -> Result<()> {
        let cfg = &self.config;
        let mut classifier = Classifier::new(cfg.classifier_config());

        // ── Step 1: Load or train ─────────────────────────────────────────────
        // The evaluation corpus is every record with a supported
        // label — a read failure here aborts the orchestration.
        let corpus = supported_corpus(catalog)?;
        tracing::info!("Evaluation corpus: {} records with supported labels", corpus.len());

        let mut state = OrchestratorState::NoModel;
        tracing::info!("State → {state}: looking for an existing snapshot");
        if classifier.load(snapshot_store)? {
            tracing::info!("Loaded existing model snapshot");
        } else {
            state = OrchestratorState::Training;
            tracing::info!("State → {state}: no usable snapshot, training from scratch");
            classifier.auto_train(catalog, snapshot_store)?;
        }

        // ── Step 2: Evaluate ──────────────────────────────────────────────────
        state = OrchestratorState::Evaluating;
        let mut accuracy = classifier.evaluate(&corpus);
        tracing::info!("State → {state}: accuracy {accuracy:.1}%");

        // ── Step 3: Bounded retry ─────────────────────────────────────────────
        // One retrain, one re-evaluation, and we move on either
        // way. Never a loop.
        if accuracy < cfg.accuracy_threshold {
            state = OrchestratorState::Retraining;
            tracing::info!(
                "State → {state}: accuracy {accuracy:.1}% below threshold {:.1}%, retraining once",
                cfg.accuracy_threshold,
            );
            classifier.auto_train(catalog, snapshot_store)?;
            accuracy = classifier.evaluate(&corpus);

            if accuracy < cfg.accuracy_threshold {
                tracing::warn!(
                    "Accuracy still {accuracy:.1}% after retraining — proceeding anyway",
                );
            }
        } else {
            state = OrchestratorState::Acceptable;
            tracing::info!("State → {state}: accuracy meets threshold");
        }

        // ── Step 4: Ready — smoke-test battery ────────────────────────────────
        state = OrchestratorState::Ready;
        tracing::info!("State → {state}");
        println!("\nModel ready — accuracy {accuracy:.1}%");
        println!("Smoke-test predictions:");
        for name in SMOKE_TEST_NAMES {
            let prediction = classifier.predict(name);
            println!(
                "  {:<12} → {:<5} ({:.0}% confident)",
                name,
                prediction.category,
                prediction.confidence * 100.0,
            );
        }

        Ok(())
    }
}

/// Fetch all records whose stored label parses to a supported
/// class — the corpus both training and evaluation use.
fn supported_corpus(catalog: &dyn CatalogStore) -> Result<Vec<CatalogRecord>> {
    Ok(catalog
        .fetch_all()?
        .into_iter()
        .filter(|record| ItemCategory::parse_label(&record.label).is_some())
        .collect())
}
