// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles the concerns that touch the outside world:
//
//   snapshot_store.rs — ModelSnapshot persistence
//                       One JSON blob per model directory.
//                       Saving overwrites atomically enough for
//                       this single-process batch tool; loading
//                       fails with an actionable message when
//                       training has never run.
//
//   catalog_store.rs  — JsonCatalogStore
//                       A flat JSON file implementing the
//                       narrow CatalogStore contract (read all
//                       records, update one label by id). Any
//                       other store meeting the contract can
//                       replace it without touching the core.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap the JSON file for a real database)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules), §9 (Error Handling)

/// ModelSnapshot saving and loading
pub mod snapshot_store;

/// Flat-file implementation of the CatalogStore contract
pub mod catalog_store;
