// ============================================================
// Layer 4 — Data Layer
// ============================================================
// Everything between raw catalog text and the numbers the
// network consumes:
//
//   encoder.rs — FeatureEncoder: item name → fixed-length
//                numeric vector. Pure, deterministic, no
//                learned parameters.
//
//   dataset.rs — LabeledExample: one (features, target) pair,
//                the unit of training.
//
// Reference: Rust Book §7 (Modules)

/// Deterministic name → feature vector encoding
pub mod encoder;

/// The (features, target) training pair
pub mod dataset;
