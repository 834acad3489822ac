//! File-backed secret store.
//!
//! The whole store is one JSON object (`key -> value`) in a single file.
//! Every operation re-reads the file from disk, so an interrupted write
//! never leaves stale state cached in memory — the file is ground truth.
//!
//! Writes are atomic: the new content goes to a temp file in the same
//! directory, which is then renamed over the store file. Readers never
//! see a half-written store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::errors::{Result, VaultError};
use crate::store::SecretStore;

/// Secret store persisted as a JSON map in a single file.
pub struct FileSecretStore {
    /// Path to the store file on disk.
    path: PathBuf,

    /// Serializes whole-file read-modify-write cycles. Two `set` calls
    /// on different keys still rewrite the same file, so they must not
    /// interleave.
    lock: Mutex<()>,
}

impl FileSecretStore {
    /// Create a store handle for the file at `path`.
    ///
    /// The file does not have to exist yet — a missing file reads as an
    /// empty store, and the first `set` creates it (including parent
    /// directories).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the store file. A missing file is an empty map.
    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| VaultError::StoreUnavailable(format!("read {}: {e}", self.path.display())))?;

        serde_json::from_str(&raw).map_err(|e| {
            VaultError::StoreUnavailable(format!(
                "store file {} is not valid JSON: {e}",
                self.path.display()
            ))
        })
    }

    /// Serialize the map and write it to disk atomically (temp + rename).
    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string(map)
            .map_err(|e| VaultError::StoreUnavailable(format!("serialize store: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    VaultError::StoreUnavailable(format!(
                        "create store directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        // The temp file lives in the same directory so the rename is
        // atomic on the same filesystem.
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, raw.as_bytes())
            .map_err(|e| VaultError::StoreUnavailable(format!("write {}: {e}", tmp_path.display())))?;

        // On Unix, restrict the store file to owner-only read/write.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&tmp_path, perms);
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            VaultError::StoreUnavailable(format!("rename into {}: {e}", self.path.display()))
        })?;

        Ok(())
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileSecretStore) {
        let dir = TempDir::new().unwrap();
        let store = FileSecretStore::new(dir.path().join("store.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_dir, store) = store();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn set_then_get_roundtrip() {
        let (_dir, store) = store();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let (_dir, store) = store();
        store.set("k", "old").unwrap();
        store.set("k", "new").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn delete_removes_key() {
        let (_dir, store) = store();
        store.set("k", "v").unwrap();
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn delete_absent_key_is_noop() {
        let (_dir, store) = store();
        assert!(store.delete("ghost").is_ok());
    }

    #[test]
    fn keys_are_independent() {
        let (_dir, store) = store();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn values_survive_reopening_the_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        FileSecretStore::new(&path).set("k", "v").unwrap();

        let reopened = FileSecretStore::new(&path);
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn creates_parent_directories_on_first_set() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");

        let store = FileSecretStore::new(&path);
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unparsable_store_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all {{").unwrap();

        let store = FileSecretStore::new(&path);
        let err = store.get("k").unwrap_err();
        assert!(matches!(err, VaultError::StoreUnavailable(_)));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        FileSecretStore::new(&path).set("k", "v").unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn store_file_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = store();
        store.set("k", "v").unwrap();

        let perms = fs::metadata(store.path()).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
