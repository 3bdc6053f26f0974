// ============================================================
// Layer 3 — Prediction & Healing Domain Types
// ============================================================
// The value types flowing through the auto-heal pipeline:
//
//   PredictionResult — what the classifier says about one name
//   HealAction       — what the healer decided to do about it
//   HealingDecision  — record + prediction + action, staged
//                      before any write happens
//   HealReport       — the per-run summary printed at the end
//
// The decision types are deliberately plain data: the decide
// phase of healing is a pure function from (model, records) to
// a list of HealingDecisions, and dry-run vs normal mode differ
// ONLY in whether the staged Fix actions are applied. Keeping
// the decision as data is what makes that equivalence testable.
//
// Reference: Rust Book §6 (Enums), §5 (Structs)

use serde::{Deserialize, Serialize};

use crate::domain::category::ItemCategory;
use crate::domain::record::CatalogRecord;

/// One classification outcome. Confidence is the winning
/// activation of the binary decision rule, always in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub category:   ItemCategory,
    pub confidence: f64,
}

/// What the healer decided for a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum HealAction {
    /// The stored label is valid and the model agrees — healthy,
    /// nothing to do
    Skip,

    /// The model disagrees with enough confidence to fix the
    /// label automatically
    Fix {
        old: String,
        new: ItemCategory,
    },

    /// The model disagrees but is not confident enough —
    /// flagged for manual review. This is a first-class outcome,
    /// never an error.
    Flag,
}

/// A fully staged decision for one record. Built during the
/// decide phase, applied (or merely reported) afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct HealingDecision {
    pub record:     CatalogRecord,
    pub prediction: PredictionResult,
    pub action:     HealAction,
}

/// Counters for one healing run. `errors` counts records whose
/// staged fix failed to persist — those never abort the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealReport {
    pub total:          usize,
    pub healthy:        usize,
    pub fixed:          usize,
    pub low_confidence: usize,
    pub errors:         usize,
}

impl HealReport {
    /// Share of records that are in a good state after the run:
    /// already healthy plus successfully fixed, as a percentage.
    pub fn quality_score(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.healthy + self.fixed) as f64 / self.total as f64 * 100.0
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_score() {
        let report = HealReport {
            total:          10,
            healthy:        6,
            fixed:          2,
            low_confidence: 1,
            errors:         1,
        };
        assert!((report.quality_score() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_quality_score_empty_run() {
        // An empty catalog has nothing wrong with it
        assert_eq!(HealReport::default().quality_score(), 100.0);
    }
}
