use media_library_models::{Favorites, MediaItem, WatchHistory};
use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::CatalogLookup;
use crate::error::{LibraryError, Outcome, StoreError};
use crate::favorites_store::FavoritesStore;
use crate::history_store::HistoryStore;
use crate::kv_store::KeyValueStore;

/// Entry point for screens: both stores plus the catalog they resolve against.
pub struct Library {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<dyn CatalogLookup>,
    favorites: FavoritesStore,
    history: HistoryStore,
}

impl Library {
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            favorites: FavoritesStore::new(store.clone()),
            history: HistoryStore::new(store.clone()),
            store,
            catalog,
        }
    }

    pub fn catalog(&self) -> &dyn CatalogLookup {
        self.catalog.as_ref()
    }

    pub fn favorites_store(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    fn lookup(&self, id: &str) -> Result<MediaItem, LibraryError> {
        self.catalog
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| LibraryError::UnknownItem(id.to_string()))
    }

    pub async fn favorites(&self) -> Outcome<Favorites> {
        self.favorites.load().await
    }

    pub async fn is_favorited(&self, id: &str) -> Outcome<bool> {
        self.favorites.is_favorited(id).await
    }

    /// Toggle the catalog item `id`.
    ///
    /// A favorite whose item has since left the catalog can still be toggled
    /// off using its stored copy.
    pub async fn toggle_favorite(&self, id: &str) -> Result<Outcome<Favorites>, LibraryError> {
        match self.lookup(id) {
            Ok(item) => Ok(self.favorites.toggle(item).await),
            Err(unknown) => {
                let current = self.favorites.load().await;
                if current.value.contains(id) {
                    info!("Removing favorite {} that is no longer in the catalog", id);
                    Ok(self.favorites.remove(id).await)
                } else {
                    Err(unknown)
                }
            }
        }
    }

    pub async fn add_favorite(&self, id: &str) -> Result<Outcome<Favorites>, LibraryError> {
        let item = self.lookup(id)?;
        Ok(self.favorites.add(item).await)
    }

    /// Remove by id; works for items no longer in the catalog.
    pub async fn remove_favorite(&self, id: &str) -> Outcome<Favorites> {
        self.favorites.remove(id).await
    }

    /// Record that `id` was opened and hand back its record for the player.
    ///
    /// Favorites that have left the catalog are still playable from their
    /// stored copy; listing history skips them later.
    pub async fn watch(&self, id: &str) -> Result<(MediaItem, Outcome<WatchHistory>), LibraryError> {
        let item = match self.lookup(id) {
            Ok(item) => item,
            Err(unknown) => match self.favorites.load().await.value.get(id) {
                Some(stored) => {
                    info!("Watching favorite {} that is no longer in the catalog", id);
                    stored.clone()
                }
                None => return Err(unknown),
            },
        };
        let history = self.history.record_watch(id).await;
        Ok((item, history))
    }

    pub async fn history_ids(&self) -> Outcome<WatchHistory> {
        self.history.load_ids().await
    }

    pub async fn watched_items(&self) -> Outcome<Vec<MediaItem>> {
        self.history.watched_items(self.catalog.as_ref()).await
    }

    pub async fn clear_history(&self) -> Outcome<WatchHistory> {
        self.history.clear().await
    }

    /// Drop every slot, favorites included.
    pub async fn reset(&self) -> Outcome<()> {
        match self.store.clear().await {
            Ok(()) => {
                info!("Store reset");
                Outcome::ok(())
            }
            Err(source) => {
                warn!("Failed to reset store: {}", source);
                Outcome::degraded((), StoreError::Write { slot: "*", source })
            }
        }
    }
}
