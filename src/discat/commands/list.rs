use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Disc;
use crate::query::{sort_discs, SortKey};
use crate::store::CatalogStore;

/// Which discs to list and in what order. The default lists everything in
/// insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListFilter {
    pub sort: Option<SortKey>,
    /// Only discs with strictly more free space than this (MB).
    pub min_free_space: Option<f64>,
    pub open_only: bool,
}

impl ListFilter {
    pub fn sorted_by(key: SortKey) -> Self {
        Self {
            sort: Some(key),
            ..Default::default()
        }
    }

    pub fn min_free_space(threshold: f64) -> Self {
        Self {
            min_free_space: Some(threshold),
            ..Default::default()
        }
    }

    pub fn open_sessions() -> Self {
        Self {
            open_only: true,
            ..Default::default()
        }
    }
}

pub fn run<S: CatalogStore>(store: &S, filter: ListFilter) -> Result<CmdResult> {
    let mut discs: Vec<&Disc> = match filter.min_free_space {
        Some(threshold) => store.filter_by_min_free_space(threshold),
        None => store.all().iter().collect(),
    };
    if filter.open_only {
        discs.retain(|d| d.is_open());
    }
    if let Some(key) = filter.sort {
        sort_discs(&mut discs, key);
    }

    let mut result = CmdResult::default();
    if discs.is_empty() {
        result.add_message(CmdMessage::info("No discs found."));
    }
    Ok(result.with_listed_discs(discs.into_iter().cloned().collect()))
}
