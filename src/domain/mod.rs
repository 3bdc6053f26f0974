// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs,
// enums, and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO neural network math here
//   - NO file I/O or datastore access
//   - NO CLI or logging concerns
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no trained model needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// The two supported item classes and their label text mapping
pub mod category;

// The narrow view of a catalog record the core is allowed to see
pub mod record;

// Prediction results, healing decisions, and the final report
pub mod healing;

// Core abstractions (traits) that other layers implement
pub mod traits;

// The error taxonomy shared by all layers
pub mod error;
