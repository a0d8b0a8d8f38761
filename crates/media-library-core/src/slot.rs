use media_library_models::{Favorites, WatchHistory};
use tracing::{debug, info, warn};

use crate::codec::{
    decode_favorites, decode_history, encode_favorites, encode_history, FAVORITES_SLOT,
    HISTORY_SLOT,
};
use crate::error::{Outcome, StoreError};
use crate::kv_store::KeyValueStore;

/// A collection stored whole in one named slot.
pub(crate) trait SlotValue: Default {
    const SLOT: &'static str;

    fn decode(raw: &str) -> Result<Self, serde_json::Error>;
    fn encode(&self) -> Result<String, serde_json::Error>;
    fn entries(&self) -> usize;
}

impl SlotValue for Favorites {
    const SLOT: &'static str = FAVORITES_SLOT;

    fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        decode_favorites(raw)
    }

    fn encode(&self) -> Result<String, serde_json::Error> {
        encode_favorites(self)
    }

    fn entries(&self) -> usize {
        self.len()
    }
}

impl SlotValue for WatchHistory {
    const SLOT: &'static str = HISTORY_SLOT;

    fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        decode_history(raw)
    }

    fn encode(&self) -> Result<String, serde_json::Error> {
        encode_history(self)
    }

    fn entries(&self) -> usize {
        self.len()
    }
}

/// Read and decode one slot. Absent, unreadable and undecodable slots all
/// yield the default value; the latter two carry the fault.
pub(crate) async fn load_slot<T: SlotValue>(store: &dyn KeyValueStore) -> Outcome<T> {
    let slot = T::SLOT;
    match store.get_item(slot).await {
        Ok(None) => {
            debug!("Slot {} not written yet, using empty collection", slot);
            Outcome::ok(T::default())
        }
        Ok(Some(raw)) => match T::decode(&raw) {
            Ok(value) => Outcome::ok(value),
            Err(source) => {
                warn!("Slot {} holds corrupt data: {}. Using empty collection.", slot, source);
                Outcome::degraded(T::default(), StoreError::Decode { slot, source })
            }
        },
        Err(source) => {
            warn!("Failed to read slot {}: {}. Using empty collection.", slot, source);
            Outcome::degraded(T::default(), StoreError::Read { slot, source })
        }
    }
}

/// Encode and overwrite one slot with the whole value.
pub(crate) async fn write_slot<T: SlotValue>(
    store: &dyn KeyValueStore,
    value: &T,
) -> Result<(), StoreError> {
    let slot = T::SLOT;
    let encoded = value.encode().map_err(|source| {
        warn!("Failed to encode slot {}: {}", slot, source);
        StoreError::Encode { slot, source }
    })?;

    match store.set_item(slot, &encoded).await {
        Ok(()) => {
            info!("Saved slot {} ({} entries)", slot, value.entries());
            Ok(())
        }
        Err(source) => {
            warn!("Failed to write slot {}: {}", slot, source);
            Err(StoreError::Write { slot, source })
        }
    }
}

/// Load, apply `op`, write back.
///
/// An unreadable slot aborts without writing, so data that merely could not
/// be read is never overwritten. A corrupt slot is treated as empty and gets
/// replaced. A failed write still returns the updated value, and its error
/// takes precedence over a decode fault.
pub(crate) async fn mutate_slot<T, F>(store: &dyn KeyValueStore, op: F) -> Outcome<T>
where
    T: SlotValue,
    F: FnOnce(&mut T),
{
    let Outcome { mut value, error } = load_slot::<T>(store).await;
    if error.as_ref().is_some_and(StoreError::is_read) {
        warn!("Skipping update of slot {}, it could not be read", T::SLOT);
        return Outcome { value, error };
    }

    op(&mut value);
    match (write_slot(store, &value).await, error) {
        (Err(write_error), _) => Outcome::degraded(value, write_error),
        (Ok(()), Some(load_error)) => Outcome::degraded(value, load_error),
        (Ok(()), None) => Outcome::ok(value),
    }
}
