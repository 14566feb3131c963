use crate::error::{DiscatError, Result};
use crate::store::json::SaveOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Configuration for discat, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog document, relative to the data directory unless absolute
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Write `free_space` and `is_open` next to each record for readability
    #[serde(default)]
    pub include_derived: bool,

    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_catalog_file() -> String {
    DEFAULT_CATALOG_FILE.to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_file: default_catalog_file(),
            include_derived: false,
            pretty: default_pretty(),
        }
    }
}

impl CatalogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(DiscatError::Io(e)),
        };
        let config: CatalogConfig =
            serde_json::from_str(&content).map_err(DiscatError::Serialization)?;
        Ok(config)
    }

    pub fn catalog_path(&self, data_dir: &Path) -> PathBuf {
        let file = Path::new(&self.catalog_file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            data_dir.join(file)
        }
    }

    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            include_derived: self.include_derived,
            pretty: self.pretty,
        }
    }
}
