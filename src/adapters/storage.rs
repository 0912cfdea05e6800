use crate::domain::ports::KeyValueStore;
use crate::utils::error::{Result, TeamError};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Key-value store kept as a single JSON object on disk.
///
/// Every call reads the file afresh, so several handles on the same path see
/// each other's writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| TeamError::MalformedPersistedState {
            key: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // 先寫入暫存檔再改名，避免中途失敗留下半個檔案
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(map)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn read_map_for_update(&self) -> Result<BTreeMap<String, String>> {
        match self.read_map() {
            Err(TeamError::MalformedPersistedState { message, .. }) => {
                tracing::warn!(
                    "⚠️ Store file {} is unreadable ({}), starting from an empty store",
                    self.path.display(),
                    message
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map_for_update()?;
        map.insert(key.to_string(), value.to_string());
        tracing::debug!("Persisting '{}' to {}", key, self.path.display());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.read_map_for_update()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-process store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| TeamError::IoError(std::io::Error::other("memory store lock poisoned")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("absent.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested").join("store.json"));

        store.set("random-team-size", "3").unwrap();
        store.set("random-team-players", r#"["A","B"]"#).unwrap();

        // 另一個 handle 看得到同樣的資料
        let other = FileStore::new(store.path().to_path_buf());
        assert_eq!(other.get("random-team-size").unwrap().as_deref(), Some("3"));

        other.remove("random-team-size").unwrap();
        assert_eq!(store.get("random-team-size").unwrap(), None);
        assert_eq!(
            store.get("random-team-players").unwrap().as_deref(),
            Some(r#"["A","B"]"#)
        );
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("random-team-players"),
            Err(TeamError::MalformedPersistedState { .. })
        ));

        // 下一次寫入會覆蓋壞掉的檔案
        store.set("random-team-size", "2").unwrap();
        assert_eq!(store.get("random-team-size").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_poisoned_memory_store_is_a_storage_error() {
        let store = MemoryStore::new();
        let handle = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = handle.entries.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = store.get("k").unwrap_err();
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Storage);
        assert!(matches!(err, TeamError::IoError(_)));
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(handle.get("k").unwrap(), None);
    }
}
