// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// The failures this system distinguishes, as a thiserror enum.
//
// Notably NOT errors:
//   - A snapshot whose dimensions disagree with the encoder —
//     Classifier::load returns Ok(false) so the caller can fall
//     back to retraining instead of crashing.
//   - A low-confidence prediction — that is a Flag decision,
//     reported and never propagated as a failure.
//
// Everything else flows through anyhow::Result with context,
// bubbles to main, and maps to a non-zero process exit.
//
// Reference: Rust Book §9 (Error Handling)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Read/write failure against the catalog datastore.
    /// Fatal during training and orchestration; downgraded to a
    /// per-item counted error during healing's apply phase.
    #[error("catalog datastore failure: {0}")]
    Datastore(String),

    /// Healing was requested but no trained model snapshot
    /// exists. Fatal, with a pointer at the fix.
    #[error("no trained model found — run `catalog-heal train` first")]
    ModelAbsent,
}
