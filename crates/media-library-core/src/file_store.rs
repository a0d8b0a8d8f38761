use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::kv_store::KeyValueStore;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Key-value store backed by one `<slot>.json` file per slot in a directory.
///
/// Writes go to a temp file that is then renamed over the slot, so a reader
/// sees either the old value or the new one, never a torn write.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Unique per write so overlapping writers never share a temp file.
    fn temp_path(&self, key: &str) -> PathBuf {
        let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{}.{}.{}.tmp", key, std::process::id(), n))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Slot {} absent ({:?} does not exist)", key, path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let temp_path = self.temp_path(key);
        tokio::fs::write(&temp_path, value).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        debug!("Slot {} written ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                tokio::fs::remove_file(&path).await?;
                removed += 1;
            }
        }
        info!("Cleared {} slot(s) in {:?}", removed, self.dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_absent_slot() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("store"));
        assert_eq!(store.get_item("favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_round_trip_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("store"));

        store.set_item("history", "[\"a\",\"b\"]").await.unwrap();
        assert_eq!(
            store.get_item("history").await.unwrap().as_deref(),
            Some("[\"a\",\"b\"]")
        );
        assert!(store.dir().join("history.json").exists());
        let leftovers = std::fs::read_dir(store.dir())
            .unwrap()
            .filter(|e| e.as_ref().unwrap().path().extension() == Some(std::ffi::OsStr::new("tmp")))
            .count();
        assert_eq!(leftovers, 0);

        store.set_item("history", "[]").await.unwrap();
        assert_eq!(store.get_item("history").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_file_store_concurrent_writes_all_succeed() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(FileStore::new(dir.path()));

        for round in 0..50 {
            let first = format!("[\"a{}\"]", round);
            let second = format!("[\"b{}\"]", round);
            let a = {
                let store = store.clone();
                let value = first.clone();
                tokio::spawn(async move { store.set_item("favorites", &value).await })
            };
            let b = {
                let store = store.clone();
                let value = second.clone();
                tokio::spawn(async move { store.set_item("favorites", &value).await })
            };
            a.await.unwrap().unwrap();
            b.await.unwrap().unwrap();

            let stored = store.get_item("favorites").await.unwrap().unwrap();
            assert!(stored == first || stored == second, "torn slot: {}", stored);
        }
    }

    #[tokio::test]
    async fn test_file_store_remove_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store.set_item("favorites", "[]").await.unwrap();
        store.set_item("history", "[]").await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        store.remove_item("favorites").await.unwrap();
        store.remove_item("favorites").await.unwrap();
        assert_eq!(store.get_item("favorites").await.unwrap(), None);

        store.clear().await.unwrap();
        assert_eq!(store.get_item("history").await.unwrap(), None);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_file_store_clear_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        for key in ["", "../escape", "a/b", "slot.json"] {
            assert!(matches!(
                store.set_item(key, "[]").await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
