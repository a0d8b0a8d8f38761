use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::StorageError;

/// String-keyed, string-valued persistent storage.
///
/// Each key is a slot holding one whole serialized value. Writes replace the
/// previous value entirely; there are no partial or append writes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. An absent slot is `Ok(None)`, not an error.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value of a slot, creating it if needed.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Removing an absent slot succeeds.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every slot.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory store, used by tests and ephemeral sessions.
///
/// Reads and writes can be switched to fail so callers' degradation paths
/// can be exercised.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with a raw value.
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.lock().insert(key.to_string(), value.to_string());
        self
    }

    /// Current raw value of a slot, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_write(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(format!("write to '{}' rejected", key)));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(format!("read of '{}' rejected", key)));
        }
        Ok(self.lock().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_write(key)?;
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_write(key)?;
        self.lock().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.check_write("*")?;
        self.lock().clear();
        Ok(())
    }
}
