//! # Storage Layer
//!
//! The [`CatalogStore`] trait is the repository abstraction for disc records.
//! Commands and the query layer only ever talk to this trait, so an alternate
//! backend can be dropped in without touching callers.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryCatalog`]: the catalog itself, an insertion-ordered
//!   `Vec<Disc>` plus the identity counter.
//!
//! ## Persistence
//!
//! [`json`] reads and writes a whole store to a single JSON document. It works
//! against the trait ([`CatalogStore::all`], [`CatalogStore::next_id`] and
//! [`CatalogStore::restore`]) rather than against a concrete store.
//!
//! ```text
//! {
//!   "records": [ { "id": 1, "name": "...", "size": 700.0, ... } ],
//!   "nextId": 2
//! }
//! ```
//!
//! ## Identities
//!
//! Identities come from a counter owned by the store. The counter only moves
//! forward: deleting a disc never frees its identity for reuse.

use crate::error::Result;
use crate::model::{Disc, DiscDraft, DiscId, UsedSpaceCorrection};

pub mod json;
pub mod memory;

/// Outcome of a successful [`CatalogStore::add`].
#[derive(Debug, Clone, PartialEq)]
pub struct Added {
    pub id: DiscId,
    pub correction: Option<UsedSpaceCorrection>,
}

/// Abstract interface for disc storage.
pub trait CatalogStore {
    /// The identity the next `add` will assign. Does not consume it.
    fn next_id(&self) -> DiscId;

    /// Assign the next identity to `draft` and append it.
    ///
    /// Fails only when the draft itself is invalid (see [`Disc::create`]); the
    /// counter is not advanced in that case.
    fn add(&mut self, draft: DiscDraft) -> Result<Added>;

    /// Remove a disc. Returns false when no disc has this identity.
    fn delete(&mut self, id: DiscId) -> bool;

    fn find(&self, id: DiscId) -> Option<&Disc>;

    fn find_mut(&mut self, id: DiscId) -> Option<&mut Disc>;

    /// Every disc, in insertion order.
    fn all(&self) -> &[Disc];

    /// Replace the whole catalog. Used by loaders.
    fn restore(&mut self, discs: Vec<Disc>, next_id: DiscId);

    /// Discs with strictly more than `threshold` MB free.
    fn filter_by_min_free_space(&self, threshold: f64) -> Vec<&Disc> {
        self.all()
            .iter()
            .filter(|d| d.free_space() > threshold)
            .collect()
    }

    /// Discs whose session is still open.
    fn filter_open_sessions(&self) -> Vec<&Disc> {
        self.all().iter().filter(|d| d.is_open()).collect()
    }
}
