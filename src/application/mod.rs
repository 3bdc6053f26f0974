// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training a model or healing the catalog).
//
// Rules for this layer:
//   - No neural network math here
//   - No argument parsing here (that's Layer 1)
//   - No direct file formats here (that's Layer 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The load-or-train / evaluate / bounded-retrain state machine
pub mod train_use_case;

// The confidence-gated catalog healing batch job
pub mod heal_use_case;

// ─── Shared Test Support ──────────────────────────────────────────────────────
// An in-memory CatalogStore with injectable write failures, plus
// the canonical ten-name corpus used by the end-to-end tests.
#[cfg(test)]
pub(crate) mod testing {
    use anyhow::Result;
    use std::cell::Cell;
    use std::collections::HashSet;

    use crate::domain::error::CoreError;
    use crate::domain::record::CatalogRecord;
    use crate::domain::traits::CatalogStore;

    /// In-memory catalog store. Records every write attempt so
    /// tests can assert on ordering and partial-failure behaviour.
    pub struct MockCatalogStore {
        pub records:  Vec<CatalogRecord>,
        /// Ids whose update_label call should fail
        pub fail_ids: HashSet<u64>,
        /// Successful writes, in order
        pub writes:   Vec<(u64, String)>,
        /// Every update attempt, successful or not
        pub attempts: usize,
        /// fetch_all call count
        pub fetches:  Cell<usize>,
    }

    impl MockCatalogStore {
        pub fn new(records: Vec<CatalogRecord>) -> Self {
            Self {
                records,
                fail_ids: HashSet::new(),
                writes:   Vec::new(),
                attempts: 0,
                fetches:  Cell::new(0),
            }
        }

        pub fn failing_on(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
            self.fail_ids = ids.into_iter().collect();
            self
        }
    }

    impl CatalogStore for MockCatalogStore {
        fn fetch_all(&self) -> Result<Vec<CatalogRecord>> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.records.clone())
        }

        fn update_label(&mut self, id: u64, label: &str) -> Result<()> {
            self.attempts += 1;
            if self.fail_ids.contains(&id) {
                return Err(CoreError::Datastore(format!("injected failure for id {id}")).into());
            }
            if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
                record.label = label.to_string();
            }
            self.writes.push((id, label.to_string()));
            Ok(())
        }
    }

    /// Ten well-separated names, five per class.
    pub fn seeded_corpus() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord::new(1, "Kopi Hitam", "Drink"),
            CatalogRecord::new(2, "Teh Manis", "Drink"),
            CatalogRecord::new(3, "Es Jeruk", "Drink"),
            CatalogRecord::new(4, "Jus Mangga", "Drink"),
            CatalogRecord::new(5, "Air Kelapa", "Drink"),
            CatalogRecord::new(6, "Nasi Goreng", "Food"),
            CatalogRecord::new(7, "Sate Ayam", "Food"),
            CatalogRecord::new(8, "Rendang", "Food"),
            CatalogRecord::new(9, "Soto Ayam", "Food"),
            CatalogRecord::new(10, "Bakso", "Food"),
        ]
    }
}
