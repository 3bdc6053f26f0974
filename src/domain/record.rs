// ============================================================
// Layer 3 — CatalogRecord Domain Type
// ============================================================
// The narrow view of a catalog row the core is allowed to see.
//
// The real catalog store carries many more fields (prices,
// descriptions, regions, ...). None of them matter for
// classification or healing, so none of them appear here —
// whatever else the datastore holds stays in the datastore.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// One catalog item as seen by the classifier and healer:
/// an id to write back to, a name to classify, and the label
/// currently stored for it (free text — it may be wrong,
/// that is the whole point of healing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Datastore identity — only ever used to address the
    /// update-label write-back
    pub id: u64,

    /// The item name the model classifies
    pub name: String,

    /// The label currently stored in the catalog
    pub label: String,
}

impl CatalogRecord {
    pub fn new(id: u64, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            name:  name.into(),
            label: label.into(),
        }
    }
}
