use media_library_models::{MediaItem, WatchHistory};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::CatalogLookup;
use crate::error::{Outcome, StoreError};
use crate::kv_store::KeyValueStore;
use crate::slot::{load_slot, mutate_slot, write_slot};

/// Map history ids to catalog records, keeping recency order.
///
/// Ids the catalog no longer knows are skipped here but stay in history.
pub fn resolve_watched(history: &WatchHistory, catalog: &dyn CatalogLookup) -> Vec<MediaItem> {
    history
        .iter()
        .filter_map(|id| {
            let item = catalog.find_by_id(id);
            if item.is_none() {
                debug!("History id {} not in catalog, skipping", id);
            }
            item.cloned()
        })
        .collect()
}

/// Watch history persisted in the `history` slot.
///
/// Like [`FavoritesStore`](crate::FavoritesStore), each mutation is a whole
/// read-modify-write and overlapping mutations resolve last-write-wins.
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Watched ids, most recent first; empty when the slot is absent,
    /// unreadable or corrupt.
    pub async fn load_ids(&self) -> Outcome<WatchHistory> {
        load_slot(self.store.as_ref()).await
    }

    pub async fn persist(&self, history: &WatchHistory) -> Result<(), StoreError> {
        write_slot(self.store.as_ref(), history).await
    }

    /// Move `id` to the front of history, evicting the oldest past capacity.
    ///
    /// Same fault handling as favorites: an unreadable slot skips the write,
    /// a corrupt one is replaced, a failed write still returns the new order.
    pub async fn record_watch(&self, id: &str) -> Outcome<WatchHistory> {
        mutate_slot(self.store.as_ref(), |history: &mut WatchHistory| {
            if let Some(evicted) = history.record(id) {
                debug!("History full, evicted {}", evicted);
            }
        })
        .await
    }

    /// Replace the slot with an empty history, whatever it held before.
    pub async fn clear(&self) -> Outcome<WatchHistory> {
        let history = WatchHistory::new();
        match self.persist(&history).await {
            Ok(()) => Outcome::ok(history),
            Err(error) => Outcome::degraded(history, error),
        }
    }

    /// Load ids and resolve them through `catalog`.
    pub async fn watched_items(&self, catalog: &dyn CatalogLookup) -> Outcome<Vec<MediaItem>> {
        self.load_ids()
            .await
            .map(|history| resolve_watched(&history, catalog))
    }
}
