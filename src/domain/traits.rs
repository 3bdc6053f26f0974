// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - JsonCatalogStore implements CatalogStore
//   - A future SqliteCatalogStore could also implement it
//   - The application layer only sees CatalogStore
//     and works with both without any changes
//
// This is also what makes the healing pipeline testable:
// the tests plug in an in-memory store with injected write
// failures and exercise the exact production code path.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;

use crate::domain::record::CatalogRecord;

// ─── CatalogStore ─────────────────────────────────────────────────────────────
/// The full contract between the core and the catalog datastore.
/// Deliberately narrow: read everything, write one label by id.
/// Any store that can do these two things — row-based,
/// document-based, or a flat file — is acceptable.
pub trait CatalogStore {
    /// Fetch every catalog record as the narrow {id, name, label}
    /// view. A failure here aborts training and orchestration
    /// outright — there is no sensible partial result.
    fn fetch_all(&self) -> Result<Vec<CatalogRecord>>;

    /// Update a single record's label by id. During healing's
    /// apply phase a failure here is counted per record and the
    /// batch continues.
    fn update_label(&mut self, id: u64, label: &str) -> Result<()>;
}
