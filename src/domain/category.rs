// ============================================================
// Layer 3 — ItemCategory Domain Type
// ============================================================
// The two supported item classes, modelled as a closed enum.
//
// Why an enum instead of raw label strings?
//   Catalog labels arrive as free text and are compared in
//   several places (training-set construction, evaluation,
//   healing decisions). Comparing strings ad hoc invites
//   silent drift from casing differences ("drink" vs "Drink").
//   A closed enum gives us ONE parsing point and ONE textual
//   mapping, checked by the compiler everywhere else.
//
// The mapping to label text is fixed here and nowhere else:
//   Drink ↔ "Drink"
//   Food  ↔ "Food"
// Parsing is case-insensitive and trims surrounding whitespace;
// anything else is simply not a supported class (None).
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two classes the model can predict. Exactly two — the
/// confidence formula downstream assumes a binary decision,
/// so adding a variant is a design change, not an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Drink,
    Food,
}

impl ItemCategory {
    /// The canonical label text stored in the catalog.
    pub fn as_label(&self) -> &'static str {
        match self {
            ItemCategory::Drink => "Drink",
            ItemCategory::Food  => "Food",
        }
    }

    /// Parse free-text label into a supported class.
    /// Case-insensitive, whitespace-tolerant. Returns None for
    /// anything that is not one of the two supported classes —
    /// callers decide whether that means "skip" or "heal".
    pub fn parse_label(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "drink" => Some(ItemCategory::Drink),
            "food"  => Some(ItemCategory::Food),
            _       => None,
        }
    }

    /// Binary target encoding used by the single-output network:
    /// Drink → 1.0, Food → 0.0. The decision rule in the
    /// classifier is the inverse of this mapping.
    pub fn target(&self) -> f64 {
        match self {
            ItemCategory::Drink => 1.0,
            ItemCategory::Food  => 0.0,
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
