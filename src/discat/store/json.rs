//! JSON persistence for a [`CatalogStore`].
//!
//! Saving is atomic: the document is written to a temp file next to the target
//! and renamed over it, so a failed save leaves the previous file intact.
//!
//! Loading never partially applies. The whole document is parsed and every
//! record validated before the store is touched.

use super::CatalogStore;
use crate::error::{DiscatError, Result};
use crate::model::{Disc, DiscDraft, DiscId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Also write `free_space` and `is_open` on each record. Loaders ignore them.
    pub include_derived: bool,
    pub pretty: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            include_derived: false,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file at the path. The store was reset to an empty catalog.
    Missing,
    Loaded { count: usize },
}

#[derive(Debug, Serialize, Deserialize)]
struct DiscRecord {
    id: DiscId,
    name: String,
    size: f64,
    encryption_speed: u32,
    occupied_space: f64,
    session_count: u32,
    session_type: String,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    free_space: Option<f64>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    is_open: Option<bool>,
}

impl DiscRecord {
    fn from_disc(disc: &Disc, include_derived: bool) -> Self {
        Self {
            id: disc.id(),
            name: disc.name().to_string(),
            size: disc.capacity(),
            encryption_speed: disc.write_speed(),
            occupied_space: disc.used_space(),
            session_count: disc.session_count(),
            session_type: disc.session_type().to_string(),
            free_space: include_derived.then_some(disc.free_space()),
            is_open: include_derived.then_some(disc.is_open()),
        }
    }

    fn into_disc(self) -> Result<Disc> {
        let id = self.id;
        let draft = DiscDraft::new(self.name, self.size, self.encryption_speed, self.occupied_space)
            .with_sessions(self.session_count, self.session_type);
        let (disc, _) = Disc::create(id, draft)
            .map_err(|e| DiscatError::InvalidDocument(format!("record {}: {}", id, e)))?;
        Ok(disc)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(alias = "cds")]
    records: Vec<DiscRecord>,
    #[serde(rename = "nextId", default, skip_serializing_if = "Option::is_none")]
    next_id: Option<DiscId>,
}

/// Write the whole store to `path`.
pub fn save<S: CatalogStore + ?Sized>(store: &S, path: &Path, options: SaveOptions) -> Result<()> {
    let document = CatalogDocument {
        records: store
            .all()
            .iter()
            .map(|d| DiscRecord::from_disc(d, options.include_derived))
            .collect(),
        next_id: Some(store.next_id()),
    };
    let content = if options.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .map_err(DiscatError::Serialization)?;

    write_atomic(path, &content)?;
    log::debug!(
        "saved {} discs to {}",
        document.records.len(),
        path.display()
    );
    Ok(())
}

/// Replace the store's contents with the document at `path`.
///
/// A missing file is an empty catalog, not an error. Any other read failure,
/// permissions included, is an error, and on any failure the store is left
/// exactly as it was.
pub fn load<S: CatalogStore + ?Sized>(store: &mut S, path: &Path) -> Result<LoadOutcome> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no catalog at {}, starting empty", path.display());
            store.restore(Vec::new(), 1);
            return Ok(LoadOutcome::Missing);
        }
        Err(e) => {
            log::warn!("failed to read catalog at {}: {}", path.display(), e);
            return Err(DiscatError::Io(e));
        }
    };

    let (discs, next_id) = decode(&content).inspect_err(|e| {
        log::warn!("failed to load catalog from {}: {}", path.display(), e);
    })?;

    let count = discs.len();
    store.restore(discs, next_id);
    log::debug!("loaded {} discs from {}", count, path.display());
    Ok(LoadOutcome::Loaded { count })
}

fn decode(content: &str) -> Result<(Vec<Disc>, DiscId)> {
    let document: CatalogDocument =
        serde_json::from_str(content).map_err(DiscatError::Serialization)?;

    let mut seen = HashSet::new();
    let mut discs = Vec::with_capacity(document.records.len());
    for record in document.records {
        if !seen.insert(record.id) {
            return Err(DiscatError::InvalidDocument(format!(
                "duplicate disc id {}",
                record.id
            )));
        }
        discs.push(record.into_disc()?);
    }

    // The counter must land above every id, so a record holding the last id
    // leaves nothing to hand out.
    let floor = match discs.iter().map(|d| d.id()).max() {
        Some(max) => max.checked_add(1).ok_or_else(|| {
            DiscatError::InvalidDocument(format!("id space exhausted by record {}", max))
        })?,
        None => 1,
    };
    let next_id = document
        .next_id
        .unwrap_or(discs.len() as DiscId + 1)
        .max(floor);
    Ok((discs, next_id))
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(DiscatError::Io)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| DiscatError::InvalidArgument(format!("not a file path: {}", path.display())))?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(".{}.tmp", Uuid::new_v4()));
    let tmp_file = dir.join(tmp_name);

    let written = fs::write(&tmp_file, content).and_then(|_| fs::rename(&tmp_file, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_file);
        return Err(DiscatError::Io(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryCatalog;
    use tempfile::tempdir;

    #[test]
    fn test_record_keys_match_file_format() {
        let store = StoreFixture::new().with_sample_library().store;
        let record = DiscRecord::from_disc(&store.all()[0], false);
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "encryption_speed",
                "id",
                "name",
                "occupied_space",
                "session_count",
                "session_type",
                "size"
            ]
        );
        assert_eq!(obj["size"], 700.0);
        assert_eq!(obj["encryption_speed"], 52);
    }

    #[test]
    fn test_derived_fields_written_only_on_request() {
        let store = StoreFixture::new().with_sample_library().store;
        let record = DiscRecord::from_disc(&store.all()[1], true);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["free_space"], 20.0);
        assert_eq!(value["is_open"], false);
    }

    #[test]
    fn test_decode_ignores_unknown_and_derived_keys() {
        let doc = r#"{
            "records": [
                { "id": 1, "name": "A", "size": 700.0, "encryption_speed": 52,
                  "occupied_space": 100.0, "session_count": 1, "session_type": "Data",
                  "free_space": 12345.0, "is_open": false, "label_color": "red" }
            ],
            "nextId": 2
        }"#;
        let (discs, next_id) = decode(doc).unwrap();
        assert_eq!(next_id, 2);
        assert_eq!(discs[0].free_space(), 600.0);
        assert!(discs[0].is_open());
    }

    #[test]
    fn test_decode_defaults_next_id_to_count_plus_one() {
        let doc = r#"{ "records": [
            { "id": 1, "name": "A", "size": 700, "encryption_speed": 52,
              "occupied_space": 0, "session_count": 1, "session_type": "Data" },
            { "id": 2, "name": "B", "size": 700, "encryption_speed": 52,
              "occupied_space": 0, "session_count": 1, "session_type": "Data" }
        ] }"#;
        let (_, next_id) = decode(doc).unwrap();
        assert_eq!(next_id, 3);
    }

    #[test]
    fn test_decode_never_hands_out_a_used_id() {
        let doc = r#"{ "records": [
            { "id": 7, "name": "A", "size": 700, "encryption_speed": 52,
              "occupied_space": 0, "session_count": 1, "session_type": "Data" }
        ], "nextId": 3 }"#;
        let (_, next_id) = decode(doc).unwrap();
        assert_eq!(next_id, 8);
    }

    #[test]
    fn test_decode_accepts_legacy_cds_key() {
        let doc = r#"{ "cds": [
            { "id": 1, "name": "A", "size": 700, "encryption_speed": 52,
              "occupied_space": 0, "session_count": 1, "session_type": "Data" }
        ], "nextId": 2 }"#;
        let (discs, _) = decode(doc).unwrap();
        assert_eq!(discs.len(), 1);
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let doc = r#"{ "records": [
            { "id": 1, "name": "A", "size": 700, "encryption_speed": 52,
              "occupied_space": 0, "session_count": 1, "session_type": "Data" },
            { "id": 1, "name": "B", "size": 700, "encryption_speed": 52,
              "occupied_space": 0, "session_count": 1, "session_type": "Data" }
        ] }"#;
        assert!(matches!(
            decode(doc).unwrap_err(),
            DiscatError::InvalidDocument(_)
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_record() {
        let doc = r#"{ "records": [
            { "id": 1, "name": "", "size": 700, "encryption_speed": 52,
              "occupied_space": 0, "session_count": 1, "session_type": "Data" }
        ] }"#;
        assert!(matches!(
            decode(doc).unwrap_err(),
            DiscatError::InvalidDocument(_)
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(decode("[1, 2, 3]").is_err());
        assert!(decode(r#"{ "nextId": 4 }"#).is_err());
        assert!(decode("{ not json").is_err());
    }

    #[test]
    fn test_decode_rejects_record_holding_the_last_id() {
        let doc = r#"{ "records": [
            { "id": 18446744073709551615, "name": "A", "size": 700, "encryption_speed": 52,
              "occupied_space": 0, "session_count": 1, "session_type": "Data" }
        ] }"#;
        assert!(matches!(
            decode(doc).unwrap_err(),
            DiscatError::InvalidDocument(_)
        ));
    }

    #[test]
    fn test_counter_at_last_id_loads_but_refuses_to_add() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{ "records": [], "nextId": 18446744073709551615 }"#).unwrap();

        let mut store = InMemoryCatalog::new();
        load(&mut store, &path).unwrap();
        assert_eq!(store.next_id(), DiscId::MAX);

        let err = store.add(DiscDraft::new("X", 700.0, 52, 0.0)).unwrap_err();
        assert!(matches!(err, DiscatError::IdsExhausted(_)));
        assert_eq!(store.next_id(), DiscId::MAX);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_failure_keeps_store_when_last_id_is_taken() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{ "records": [
                { "id": 18446744073709551615, "name": "A", "size": 700, "encryption_speed": 52,
                  "occupied_space": 0, "session_count": 1, "session_type": "Data" }
            ] }"#,
        )
        .unwrap();

        let mut store = StoreFixture::new().with_discs(2).store;
        assert!(load(&mut store, &path).is_err());
        assert_eq!(store.len(), 2);
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn test_unreadable_path_is_an_error_not_missing() {
        let dir = tempdir().unwrap();
        // A directory exists at the path but cannot be read as a file.
        let path = dir.path().join("catalog.json");
        fs::create_dir(&path).unwrap();

        let mut store = StoreFixture::new().with_discs(2).store;
        let err = load(&mut store, &path).unwrap_err();
        assert!(matches!(err, DiscatError::Io(_)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn test_missing_file_resets_store() {
        let dir = tempdir().unwrap();
        let mut store = StoreFixture::new().with_discs(2).store;
        let outcome = load(&mut store, &dir.path().join("absent.json")).unwrap();
        assert_eq!(outcome, LoadOutcome::Missing);
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_accepts_non_utf8_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"cat\xffalog.json"));
        let store = StoreFixture::new().with_discs(1).store;
        save(&store, &path, SaveOptions::default()).unwrap();

        let mut loaded = InMemoryCatalog::new();
        assert_eq!(
            load(&mut loaded, &path).unwrap(),
            LoadOutcome::Loaded { count: 1 }
        );
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut original = StoreFixture::new().with_sample_library().store;
        original.delete(1);
        save(&original, &path, SaveOptions::default()).unwrap();

        let mut loaded = InMemoryCatalog::new();
        let outcome = load(&mut loaded, &path).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { count: 2 });
        assert_eq!(loaded.all(), original.all());
        assert_eq!(loaded.next_id(), original.next_id());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("catalog.json");
        let store = StoreFixture::new().with_discs(1).store;
        save(&store, &path, SaveOptions::default()).unwrap();
        assert!(path.exists());
    }
}
