//! # API Facade
//!
//! The single entry point for every catalog operation, whatever the UI. It
//! dispatches to `commands/*.rs` and returns structured [`CmdResult`]s; it does
//! no printing and holds no business logic of its own.
//!
//! `CatalogApi<S: CatalogStore>` is generic over the storage backend so UI code
//! can be exercised against an [`InMemoryCatalog`] without touching disk.
//!
//! [`InMemoryCatalog`]: crate::store::memory::InMemoryCatalog

use crate::commands;
use crate::error::Result;
use crate::model::{Disc, DiscDraft, DiscId};
use crate::store::json::SaveOptions;
use crate::store::CatalogStore;
use std::path::Path;

pub struct CatalogApi<S: CatalogStore> {
    store: S,
    save_options: SaveOptions,
}

impl<S: CatalogStore> CatalogApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            save_options: SaveOptions::default(),
        }
    }

    pub fn with_save_options(mut self, options: SaveOptions) -> Self {
        self.save_options = options;
        self
    }

    pub fn add_disc(&mut self, draft: DiscDraft) -> Result<CmdResult> {
        commands::add::run(&mut self.store, draft)
    }

    pub fn delete_discs(&mut self, ids: &[DiscId]) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, ids)
    }

    pub fn find_disc(&self, id: DiscId) -> Result<CmdResult> {
        commands::find::run(&self.store, id)
    }

    pub fn list_discs(&self, filter: ListFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn set_finalized(&mut self, id: DiscId, finalized: bool) -> Result<CmdResult> {
        commands::finalize::set_finalized(&mut self.store, id, finalized)
    }

    pub fn seed(&mut self) -> Result<CmdResult> {
        commands::seed::run(&mut self.store)
    }

    pub fn save(&self, path: &Path) -> Result<CmdResult> {
        commands::persist::save(&self.store, path, self.save_options)
    }

    pub fn load(&mut self, path: &Path) -> Result<CmdResult> {
        commands::persist::load(&mut self.store, path)
    }

    pub fn next_id(&self) -> DiscId {
        self.store.next_id()
    }

    pub fn discs(&self) -> &[Disc] {
        self.store.all()
    }
}

pub use crate::commands::list::ListFilter;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::query::SortKey;
