//! Read-only ordering over a [`CatalogStore`].
//!
//! Every sort is stable and returns a fresh list of references, so the store's
//! own insertion order is never touched. Ties keep insertion order.

use crate::model::Disc;
use crate::store::CatalogStore;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending, case-sensitive.
    Name,
    /// Fastest first.
    Speed,
    /// Largest capacity first.
    Size,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "speed" => Ok(SortKey::Speed),
            "size" => Ok(SortKey::Size),
            other => Err(format!("unknown sort key '{}' (name, speed, size)", other)),
        }
    }
}

pub fn sorted<S: CatalogStore + ?Sized>(store: &S, key: SortKey) -> Vec<&Disc> {
    let mut discs: Vec<&Disc> = store.all().iter().collect();
    sort_discs(&mut discs, key);
    discs
}

pub fn sort_by_name<S: CatalogStore + ?Sized>(store: &S) -> Vec<&Disc> {
    sorted(store, SortKey::Name)
}

pub fn sort_by_speed<S: CatalogStore + ?Sized>(store: &S) -> Vec<&Disc> {
    sorted(store, SortKey::Speed)
}

pub fn sort_by_size<S: CatalogStore + ?Sized>(store: &S) -> Vec<&Disc> {
    sorted(store, SortKey::Size)
}

/// Sort an already-selected list in place. `sort_by` is stable.
pub fn sort_discs(discs: &mut [&Disc], key: SortKey) {
    match key {
        SortKey::Name => discs.sort_by(|a, b| a.name().cmp(b.name())),
        SortKey::Speed => discs.sort_by(|a, b| b.write_speed().cmp(&a.write_speed())),
        SortKey::Size => discs.sort_by(|a, b| b.capacity().total_cmp(&a.capacity())),
    }
}
