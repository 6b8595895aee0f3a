use crate::error::{Error, Result};
use crate::layout::LayoutRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CACHE_FILE_NAME: &str = "g80-layouts-cache.json";

#[cfg(unix)]
const CACHE_FILE_MODE: u32 = 0o644;

/// Write-through cache of layout records keyed by layout id.
///
/// Published layouts are treated as immutable, so entries never expire and
/// are never evicted. The store lives in memory for the length of a run and
/// is read from and written to disk explicitly with [`LayoutStore::load`] and
/// [`LayoutStore::save`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutStore {
    entries: BTreeMap<String, LayoutRecord>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `path`. A missing or empty file gives an empty
    /// store; a file that does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No layout cache at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(Error::CacheRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }

        let entries = serde_json::from_slice(&bytes).map_err(|source| Error::CacheCorrupt {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { entries };
        log::debug!(
            "Loaded {} cached layouts from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Write the whole store to `path`. The data goes to a sibling temporary
    /// file first and is renamed into place, so a failed write leaves the
    /// previous cache intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(&self.entries).map_err(Error::CacheEncode)?;
        let write_err = |source: io::Error| Error::CacheWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = temp_path(path);
        fs::write(&tmp, bytes).map_err(write_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::Permissions::from_mode(CACHE_FILE_MODE);
            if let Err(err) = fs::set_permissions(&tmp, mode) {
                let _ = fs::remove_file(&tmp);
                return Err(write_err(err));
            }
        }
        if let Err(err) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(err));
        }

        log::info!("Successfully wrote cache to disk.");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&LayoutRecord> {
        self.entries.get(id)
    }

    /// Insert `record` under `id`, replacing whatever was cached there.
    pub fn put(&mut self, id: impl Into<String>, record: LayoutRecord) {
        let id = id.into();
        log::debug!("Stored layout in cache with id: {}", id);
        self.entries.insert(id, record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_entries: self.entries.len(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_entries: usize,
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutMeta;
    use serde_json::json;
    use tempdir::TempDir;

    fn record(id: &str, title: &str, creator: &str) -> LayoutRecord {
        let mut meta = LayoutMeta::new(id, title, creator);
        meta.set_date(1_700_000_000);
        meta.set_tags(vec!["qwerty".to_string()]);
        let mut record = LayoutRecord::new(meta);
        record.set_config(json!({"layers": [[1, 2, 3]], "name": title}));
        record
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new("store").unwrap();
        let store = LayoutStore::load(&dir.path().join("nope.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let dir = TempDir::new("store").unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        fs::write(&path, "").unwrap();
        assert!(LayoutStore::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new("store").unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        fs::write(&path, "{\"abc\": [").unwrap();
        let err = LayoutStore::load(&path).unwrap_err();
        assert!(matches!(err, Error::CacheCorrupt { .. }));
        assert!(!err.is_remote());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new("store").unwrap();
        let path = dir.path().join("nested").join(CACHE_FILE_NAME);

        let mut store = LayoutStore::new();
        store.put("1", record("1", "Foo", "Alice"));
        store.put("2", record("2", "Bar", "Bob"));
        store.save(&path).unwrap();

        let loaded = LayoutStore::load(&path).unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.get("2").unwrap().title(), "Bar");
        assert_eq!(
            loaded.get("1").unwrap().config(),
            &json!({"layers": [[1, 2, 3]], "name": "Foo"})
        );
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_cache_file_is_a_json_object_keyed_by_id() {
        let dir = TempDir::new("store").unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);

        let mut store = LayoutStore::new();
        store.put("abc", record("abc", "Foo", "Alice"));
        store.save(&path).unwrap();

        let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["abc"]["layout_meta"]["title"], "Foo");
        assert_eq!(raw["abc"]["layout_meta"]["date"], 1_700_000_000);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new("store").unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        LayoutStore::new().save(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, CACHE_FILE_MODE);
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = TempDir::new("store").unwrap();
        // A directory where the file should go
        let path = dir.path().join(CACHE_FILE_NAME);
        fs::create_dir(&path).unwrap();
        let err = LayoutStore::new().save(&path).unwrap_err();
        assert!(matches!(err, Error::CacheWrite { .. }));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_put_overwrites() {
        let mut store = LayoutStore::new();
        store.put("1", record("1", "Foo", "Alice"));
        store.put("1", record("1", "Foo v2", "Alice"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1").unwrap().title(), "Foo v2");
        assert_eq!(store.stats().total_entries, 1);
    }
}
