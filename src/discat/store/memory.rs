use super::{Added, CatalogStore};
use crate::error::{DiscatError, Result};
use crate::model::{Disc, DiscDraft, DiscId};

const FIRST_ID: DiscId = 1;

/// The catalog: discs in insertion order plus the identity counter.
///
/// Lookups are linear scans. Catalogs are small enough that an index would
/// only add a second structure to keep in sync.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    discs: Vec<Disc>,
    next_id: DiscId,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self {
            discs: Vec::new(),
            next_id: FIRST_ID,
        }
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.discs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discs.is_empty()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn next_id(&self) -> DiscId {
        self.next_id
    }

    fn add(&mut self, draft: DiscDraft) -> Result<Added> {
        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or(DiscatError::IdsExhausted(id))?;
        let (disc, correction) = Disc::create(id, draft)?;
        log::debug!("adding disc {}: {}", id, disc.name());
        self.discs.push(disc);
        self.next_id = next_id;
        Ok(Added { id, correction })
    }

    fn delete(&mut self, id: DiscId) -> bool {
        match self.discs.iter().position(|d| d.id() == id) {
            Some(pos) => {
                let removed = self.discs.remove(pos);
                log::debug!("deleted disc {}: {}", id, removed.name());
                true
            }
            None => false,
        }
    }

    fn find(&self, id: DiscId) -> Option<&Disc> {
        self.discs.iter().find(|d| d.id() == id)
    }

    fn find_mut(&mut self, id: DiscId) -> Option<&mut Disc> {
        self.discs.iter_mut().find(|d| d.id() == id)
    }

    fn all(&self) -> &[Disc] {
        &self.discs
    }

    fn restore(&mut self, discs: Vec<Disc>, next_id: DiscId) {
        self.discs = discs;
        self.next_id = next_id;
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryCatalog,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryCatalog::new(),
            }
        }

        pub fn with_discs(mut self, count: usize) -> Self {
            for i in 0..count {
                let draft = DiscDraft::new(format!("Test Disc {}", i + 1), 700.0, 52, 100.0);
                self.store.add(draft).unwrap();
            }
            self
        }

        pub fn with_disc(mut self, draft: DiscDraft) -> Self {
            self.store.add(draft).unwrap();
            self
        }

        pub fn with_finalized_disc(mut self, name: &str) -> Self {
            let draft = DiscDraft::new(name, 700.0, 24, 650.0).with_sessions(1, "Finalized");
            self.store.add(draft).unwrap();
            self
        }

        /// The demo library: 1 "Album 1" (open, 450 free), 2 "Windows XP ISO"
        /// (finalized, 20 free), 3 "My Backups" (open, 650 free).
        pub fn with_sample_library(mut self) -> Self {
            for draft in crate::commands::seed::sample_library() {
                self.store.add(draft).unwrap();
            }
            self
        }
    }
}
