//! Key-value persistence for bindings.
//!
//! The binding table only needs `get`/`set` by storage name. Three backends:
//!
//! - [`FileStore`]: a TOML table on disk, rewritten on every `set`
//! - [`MemoryStore`]: a session-only map
//! - [`DefaultsStore`]: the "storage unavailable" fallback; reads return the
//!   built-in defaults and writes are dropped

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::keys::KeyId;
use crate::types::Action;

pub trait BindingStore {
    fn get(&self, name: &str) -> Option<String>;

    fn set(&mut self, name: &str, value: &str) -> Result<()>;

    /// Whether values outlive the process.
    fn is_persistent(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BindingStore for MemoryStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsStore;

impl BindingStore for DefaultsStore {
    fn get(&self, name: &str) -> Option<String> {
        Action::ALL
            .iter()
            .find(|a| a.storage_name() == name)
            .map(|a| a.default_key().to_string())
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        tracing::debug!(name, value, "storage unavailable, binding not persisted");
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

/// Bindings persisted as a flat TOML table (`rotateKey = "w"`).
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, KeyId>,
}

impl FileStore {
    /// Open (or create) the store at `path`.
    ///
    /// Fails when the location cannot be written. An unreadable or malformed
    /// file is not fatal: it is moved to [`FileStore::backup_path`] and a
    /// fresh table is written in its place.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let values = if path.is_file() {
            match Self::read(&path) {
                Ok(values) => values,
                Err(e) => {
                    let backup = Self::backup_path(&path);
                    fs::rename(&path, &backup).with_context(|| {
                        format!("Failed to move {} aside", path.display())
                    })?;
                    tracing::warn!(
                        path = %path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "unreadable bindings file moved aside"
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        let store = Self { path, values };
        // Probe: the store is only usable if we can write it back.
        store.save()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a file that failed to parse is kept: `bindings.toml.bak`.
    pub fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".bak");
        path.with_file_name(name)
    }

    fn read(path: &Path) -> Result<BTreeMap<String, KeyId>> {
        let contents = fs::read_to_string(path).context("Failed to read bindings file")?;
        toml::from_str(&contents).context("Failed to parse bindings file")
    }

    fn save(&self) -> Result<()> {
        let contents =
            toml::to_string_pretty(&self.values).context("Failed to serialize bindings")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

impl BindingStore for FileStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).map(|key| key.as_str().to_string())
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.insert(name.to_string(), KeyId::new(value));
        self.save()
    }
}

/// Open the file store at `path`, falling back to [`DefaultsStore`].
///
/// `None` means persistence was switched off.
pub fn open_store(path: Option<&Path>) -> Box<dyn BindingStore> {
    let Some(path) = path else {
        tracing::info!("binding persistence disabled");
        return Box::new(DefaultsStore);
    };

    match FileStore::open(path) {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "bindings store opened");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = ?e, "bindings storage unavailable, using defaults");
            Box::new(DefaultsStore)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir()
            .join(format!("blockfall_store_{tag}_{nanos}"))
            .join("bindings.toml")
    }

    #[test]
    fn defaults_store_answers_with_builtin_keys() {
        let mut store = DefaultsStore;
        assert_eq!(store.get("rotateKey").as_deref(), Some("w"));
        assert_eq!(store.get("downKey").as_deref(), Some("s"));
        assert_eq!(store.get("unknown"), None);

        store.set("rotateKey", "x").unwrap();
        assert_eq!(store.get("rotateKey").as_deref(), Some("w"));
        assert!(!store.is_persistent());
    }

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("leftKey"), None);
        store.set("leftKey", "a").unwrap();
        store.set("leftKey", "ArrowLeft").unwrap();
        assert_eq!(store.get("leftKey").as_deref(), Some("ArrowLeft"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("rightKey", "l").unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("rightKey").as_deref(), Some("l"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_is_replaced() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "this is = = not toml").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("rotateKey"), None);
        store.set("rotateKey", "k").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("rotateKey").as_deref(), Some("k"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_is_kept_as_backup() {
        let path = temp_path("backup");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "rotateKey = \"k\"\nleftKey = ").unwrap();

        FileStore::open(&path).unwrap();

        let backup = FileStore::backup_path(&path);
        assert!(backup.ends_with("bindings.toml.bak"));
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            "rotateKey = \"k\"\nleftKey = "
        );
        assert!(fs::read_to_string(&path).unwrap().is_empty());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_is_written_as_plain_strings() {
        let path = temp_path("format");
        let mut store = FileStore::open(&path).unwrap();
        store.set("leftKey", "ArrowLeft").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim(), "leftKey = \"ArrowLeft\"");
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn open_store_without_path_uses_defaults() {
        let store = open_store(None);
        assert!(!store.is_persistent());
        assert_eq!(store.get("leftKey").as_deref(), Some("a"));
    }

    #[test]
    fn unwritable_location_falls_back_to_defaults() {
        // A directory cannot be written as a file.
        let dir = temp_path("unwritable");
        fs::create_dir_all(&dir).unwrap();

        let store = open_store(Some(&dir));
        assert!(!store.is_persistent());
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }
}
