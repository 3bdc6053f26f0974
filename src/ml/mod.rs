// ============================================================
// Layer 5 — Machine Learning Layer
// ============================================================
// The numeric core of the system:
//
//   network.rs    — NeuralNetwork: a hand-rolled two-layer
//                   feed-forward net (input → hidden → output,
//                   sigmoid everywhere) with per-example SGD
//                   training and exact snapshot round-tripping.
//
//   classifier.rs — Classifier: FeatureEncoder + NeuralNetwork
//                   composed into a name → category predictor
//                   with train / evaluate / load / save.
//
// No ML framework here on purpose — the model is small enough
// (32 → 8 → 1 by default) that plain Vec<f64> math is clearer,
// faster to build, and trivially portable.
//
// Reference: Rust Book §8 (Vectors), §13 (Iterators)

/// The two-layer feed-forward network and its snapshot
pub mod network;

/// Encoder + network composed into a label predictor
pub mod classifier;
