use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::json::{self, LoadOutcome, SaveOptions};
use crate::store::CatalogStore;
use std::path::Path;

pub fn save<S: CatalogStore>(store: &S, path: &Path, options: SaveOptions) -> Result<CmdResult> {
    json::save(store, path, options)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved {} discs to {}",
        store.all().len(),
        path.display()
    )));
    Ok(result)
}

pub fn load<S: CatalogStore>(store: &mut S, path: &Path) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match json::load(store, path)? {
        LoadOutcome::Missing => result.add_message(CmdMessage::info(
            "No save file found. Starting with an empty library.",
        )),
        LoadOutcome::Loaded { count } => result.add_message(CmdMessage::info(format!(
            "Loaded {} discs from {}",
            count,
            path.display()
        ))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryCatalog;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_is_empty_catalog() {
        let dir = tempdir().unwrap();
        let mut store = InMemoryCatalog::new();
        let result = load(&mut store, &dir.path().join("nope.json")).unwrap();

        assert!(store.all().is_empty());
        assert_eq!(store.next_id(), 1);
        assert!(!result.has_warnings());
    }

    #[test]
    fn load_corrupt_file_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ \"records\": [ {\"id\": 1, ").unwrap();

        let mut store = StoreFixture::new().with_sample_library().store;
        let before = store.clone();
        let err = load(&mut store, &path).unwrap_err();

        assert!(err.is_persistence());
        assert_eq!(store.all(), before.all());
        assert_eq!(store.next_id(), before.next_id());
    }

    #[test]
    fn save_then_load_reports_counts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let store = StoreFixture::new().with_sample_library().store;
        save(&store, &path, SaveOptions::default()).unwrap();

        let mut fresh = InMemoryCatalog::new();
        let result = load(&mut fresh, &path).unwrap();
        assert!(result.messages[0].content.contains("Loaded 3 discs"));
        assert_eq!(fresh.all(), store.all());
    }
}
