// ============================================================
// Layer 2 — HealUseCase (Auto-Heal Controller)
// ============================================================
// The batch job that reconciles stored catalog labels with the
// model's predictions, under a confidence gate.
//
// Two phases, strictly in order:
//
//   DECIDE — a pure function of the model and the records.
//     Per record:
//       1. Stored label parses to a valid class AND the
//          prediction agrees → Skip (healthy).
//       2. Otherwise: confidence ≥ threshold → stage Fix,
//          else → Flag for manual review.
//
//   APPLY — skipped entirely in dry-run. Staged fixes are
//     persisted one at a time, sequentially; a single failed
//     write is counted and the batch CONTINUES. Partial
//     success is the design, not an accident.
//
// Because deciding never writes, dry-run and normal mode are
// guaranteed to produce the identical decision set — they share
// the decide phase verbatim and differ only in whether apply
// runs.
//
// Every run ends with a printed summary, whatever failed.
//
// Reference: Rust Book §9 (Error Handling), §13 (Iterators)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::category::ItemCategory;
use crate::domain::error::CoreError;
use crate::domain::healing::{HealAction, HealReport, HealingDecision, PredictionResult};
use crate::domain::record::CatalogRecord;
use crate::domain::traits::CatalogStore;
use crate::infra::{catalog_store::JsonCatalogStore, snapshot_store::SnapshotStore};
use crate::ml::classifier::{Classifier, ClassifierConfig};

// ─── Healing Configuration ───────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealConfig {
    pub catalog_path: String,
    pub model_dir:    String,

    /// Minimum prediction confidence before a fix is applied
    /// without human review.
    pub confidence_threshold: f64,

    /// Report decisions but never write.
    pub dry_run: bool,

    /// Suppress per-item logs; the final summary always prints.
    pub quiet: bool,
}

impl Default for HealConfig {
    fn default() -> Self {
        Self {
            catalog_path:         "data/catalog.json".to_string(),
            model_dir:            "model".to_string(),
            confidence_threshold: 0.75,
            dry_run:              false,
            quiet:                false,
        }
    }
}

// ─── HealUseCase ──────────────────────────────────────────────────────────────
pub struct HealUseCase {
    config: HealConfig,
}

impl HealUseCase {
    pub fn new(config: HealConfig) -> Self {
        Self { config }
    }

    /// Load the trained model and heal the configured catalog.
    /// Fails fast — before touching the catalog — when no
    /// trained model exists.
    pub fn execute(&self) -> Result<HealReport> {
        let snapshot_store = SnapshotStore::new(&self.config.model_dir);

        let mut classifier = Classifier::new(ClassifierConfig::default());
        if !classifier.load(&snapshot_store)? {
            return Err(CoreError::ModelAbsent.into());
        }

        let mut catalog = JsonCatalogStore::open(&self.config.catalog_path)?;
        self.run(&classifier, &mut catalog)
    }

    /// Decide-then-apply over every record. Generic over the
    /// store so tests can drive it with an in-memory catalog.
    pub fn run(
        &self,
        classifier: &Classifier,
        catalog:    &mut dyn CatalogStore,
    ) -> Result<HealReport> {
        let records   = catalog.fetch_all()?;
        let decisions = decide(classifier, &records, self.config.confidence_threshold);

        let mut report = HealReport {
            total: decisions.len(),
            ..HealReport::default()
        };

        // ── Decide-phase bookkeeping and per-item logs ────────────────────────
        for decision in &decisions {
            match &decision.action {
                HealAction::Skip => {
                    report.healthy += 1;
                    if !self.config.quiet {
                        tracing::info!(
                            "'{}' [{}] — healthy",
                            decision.record.name,
                            decision.record.label,
                        );
                    }
                }
                HealAction::Fix { old, new } => {
                    if !self.config.quiet {
                        tracing::info!(
                            "'{}' [{}] → {} ({:.0}% confident)",
                            decision.record.name,
                            old,
                            new,
                            decision.prediction.confidence * 100.0,
                        );
                    }
                }
                HealAction::Flag => {
                    report.low_confidence += 1;
                    if !self.config.quiet {
                        tracing::info!(
                            "'{}' [{}] — flagged for review ({} at {:.0}%, below gate)",
                            decision.record.name,
                            decision.record.label,
                            decision.prediction.category,
                            decision.prediction.confidence * 100.0,
                        );
                    }
                }
            }
        }

        // ── Apply phase ───────────────────────────────────────────────────────
        if self.config.dry_run {
            // Report what WOULD be fixed; write nothing
            report.fixed = decisions
                .iter()
                .filter(|d| matches!(d.action, HealAction::Fix { .. }))
                .count();
            tracing::info!("Dry run: {} fixes staged, no writes performed", report.fixed);
        } else {
            let (fixed, errors) = apply_fixes(catalog, &decisions, self.config.quiet);
            report.fixed  = fixed;
            report.errors = errors;
        }

        print_summary(&report, self.config.dry_run);
        Ok(report)
    }
}

/// The pure decide phase: one staged decision per record,
/// no side effects.
pub fn decide(
    classifier: &Classifier,
    records:    &[CatalogRecord],
    threshold:  f64,
) -> Vec<HealingDecision> {
    records
        .iter()
        .map(|record| {
            let prediction = classifier.predict(&record.name);
            HealingDecision {
                record:     record.clone(),
                prediction,
                action: stage_action(&record.label, prediction, threshold),
            }
        })
        .collect()
}

/// The confidence gate for a single record.
pub fn stage_action(
    current_label: &str,
    prediction:    PredictionResult,
    threshold:     f64,
) -> HealAction {
    match ItemCategory::parse_label(current_label) {
        // Valid label the model agrees with — nothing to do
        Some(current) if current == prediction.category => HealAction::Skip,

        // Invalid label, or the model disagrees: fix only when
        // the model is confident enough, otherwise hand it to a
        // human
        _ => {
            if prediction.confidence >= threshold {
                HealAction::Fix {
                    old: current_label.to_string(),
                    new: prediction.category,
                }
            } else {
                HealAction::Flag
            }
        }
    }
}

/// Persist every staged fix, one at a time. A failed write is
/// logged, counted, and skipped — later records still get their
/// chance. Returns (fixed, errors).
fn apply_fixes(
    catalog:   &mut dyn CatalogStore,
    decisions: &[HealingDecision],
    quiet:     bool,
) -> (usize, usize) {
    let mut fixed  = 0;
    let mut errors = 0;

    for decision in decisions {
        if let HealAction::Fix { new, .. } = &decision.action {
            match catalog.update_label(decision.record.id, new.as_label()) {
                Ok(()) => {
                    fixed += 1;
                    if !quiet {
                        tracing::info!("Fixed record {} → {}", decision.record.id, new);
                    }
                }
                Err(err) => {
                    errors += 1;
                    tracing::warn!(
                        "Failed to update record {}: {err:#} — continuing",
                        decision.record.id,
                    );
                }
            }
        }
    }

    (fixed, errors)
}

/// The end-of-run summary. Printed on every run, dry or not,
/// partial failures included.
fn print_summary(report: &HealReport, dry_run: bool) {
    let mode = if dry_run { " (dry run)" } else { "" };
    println!("\nHealing summary{mode}:");
    println!("  total records:   {}", report.total);
    println!("  healthy:         {}", report.healthy);
    println!("  fixed:           {}", report.fixed);
    println!("  low confidence:  {}", report.low_confidence);
    println!("  errors:          {}", report.errors);
    println!("  quality score:   {:.1}%", report.quality_score());
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{seeded_corpus, MockCatalogStore};

    fn prediction(category: ItemCategory, confidence: f64) -> PredictionResult {
        PredictionResult { category, confidence }
    }

    /// A classifier trained on the canonical corpus, used where
    /// real predictions are needed.
    fn trained_classifier() -> Classifier {
        let mut classifier = Classifier::new(ClassifierConfig::default());
        classifier.train(&seeded_corpus());
        classifier
    }

    // ── Confidence gating ────────────────────────────────────────────────────

    #[test]
    fn test_confident_disagreement_stages_fix() {
        let action = stage_action("Food", prediction(ItemCategory::Drink, 0.9), 0.75);
        assert_eq!(
            action,
            HealAction::Fix { old: "Food".to_string(), new: ItemCategory::Drink }
        );
    }

    #[test]
    fn test_unconfident_disagreement_stages_flag() {
        let action = stage_action("Food", prediction(ItemCategory::Drink, 0.5), 0.75);
        assert_eq!(action, HealAction::Flag);
    }

    #[test]
    fn test_agreement_is_healthy() {
        let action = stage_action("Drink", prediction(ItemCategory::Drink, 0.99), 0.75);
        assert_eq!(action, HealAction::Skip);
    }

    #[test]
    fn test_invalid_label_is_gated_like_disagreement() {
        let fix = stage_action("Snack", prediction(ItemCategory::Food, 0.9), 0.75);
        assert!(matches!(fix, HealAction::Fix { .. }));

        let flag = stage_action("Snack", prediction(ItemCategory::Food, 0.6), 0.75);
        assert_eq!(flag, HealAction::Flag);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let action = stage_action("Food", prediction(ItemCategory::Drink, 0.75), 0.75);
        assert!(matches!(action, HealAction::Fix { .. }));
    }

    // ── Partial-failure tolerance ────────────────────────────────────────────

    #[test]
    fn test_one_failed_write_of_four_does_not_abort() {
        let records: Vec<CatalogRecord> = (1..=4)
            .map(|id| CatalogRecord::new(id, format!("Item {id}"), "Snack"))
            .collect();

        // Four staged fixes, one doomed write
        let decisions: Vec<HealingDecision> = records
            .iter()
            .map(|record| HealingDecision {
                record:     record.clone(),
                prediction: prediction(ItemCategory::Food, 0.9),
                action: HealAction::Fix {
                    old: record.label.clone(),
                    new: ItemCategory::Food,
                },
            })
            .collect();

        let mut catalog = MockCatalogStore::new(records).failing_on([3]);
        let (fixed, errors) = apply_fixes(&mut catalog, &decisions, true);

        assert_eq!(fixed, 3);
        assert_eq!(errors, 1);
        // Every record was attempted, including the ones after
        // the failure
        assert_eq!(catalog.attempts, 4);
    }

    // ── Dry-run equivalence ──────────────────────────────────────────────────

    #[test]
    fn test_dry_run_decides_identically_and_writes_nothing() {
        let classifier = trained_classifier();

        // A corpus with deliberate damage: wrong labels and an
        // unsupported one
        let mut records = seeded_corpus();
        records[0].label = "Food".to_string();   // Kopi Hitam mislabeled
        records[7].label = "Snack".to_string();  // Rendang invalid

        let dry_case = HealUseCase::new(HealConfig {
            dry_run: true,
            quiet:   true,
            ..HealConfig::default()
        });
        let wet_case = HealUseCase::new(HealConfig {
            quiet: true,
            ..HealConfig::default()
        });

        let mut dry_catalog = MockCatalogStore::new(records.clone());
        let dry_report      = dry_case.run(&classifier, &mut dry_catalog).unwrap();

        let mut wet_catalog = MockCatalogStore::new(records.clone());
        let wet_report      = wet_case.run(&classifier, &mut wet_catalog).unwrap();

        // Identical decision sets — deciding is pure
        assert_eq!(
            decide(&classifier, &records, 0.75),
            decide(&classifier, &records, 0.75),
        );
        assert_eq!(dry_report.total, wet_report.total);
        assert_eq!(dry_report.healthy, wet_report.healthy);
        assert_eq!(dry_report.low_confidence, wet_report.low_confidence);
        assert_eq!(dry_report.fixed, wet_report.fixed);

        // Only normal mode writes
        assert_eq!(dry_catalog.attempts, 0);
        assert_eq!(wet_catalog.attempts, wet_report.fixed + wet_report.errors);
    }

    #[test]
    fn test_report_partitions_every_record() {
        let classifier  = trained_classifier();
        let mut catalog = MockCatalogStore::new(seeded_corpus());

        let report = HealUseCase::new(HealConfig { quiet: true, ..HealConfig::default() })
            .run(&classifier, &mut catalog)
            .unwrap();

        assert_eq!(report.total, 10);
        assert_eq!(report.errors, 0);
        // Whatever the model got right is healthy; nothing it
        // got right was written back
        assert_eq!(report.healthy + report.fixed + report.low_confidence, 10);
    }
}
