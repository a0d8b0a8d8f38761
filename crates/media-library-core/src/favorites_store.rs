use media_library_models::{Favorites, MediaItem};
use std::sync::Arc;
use tracing::debug;

use crate::error::{Outcome, StoreError};
use crate::kv_store::KeyValueStore;
use crate::slot::{load_slot, mutate_slot, write_slot};

/// Favorites persisted in the `favorites` slot.
///
/// Every mutation reads the slot, applies the change and writes the whole
/// collection back before returning. Mutations are not serialized against
/// each other: two overlapping mutations both read the same starting state
/// and the one that writes last wins.
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current favorites; empty when the slot is absent, unreadable or corrupt.
    pub async fn load(&self) -> Outcome<Favorites> {
        load_slot(self.store.as_ref()).await
    }

    /// Overwrite the slot with `favorites`.
    pub async fn persist(&self, favorites: &Favorites) -> Result<(), StoreError> {
        write_slot(self.store.as_ref(), favorites).await
    }

    pub async fn is_favorited(&self, id: &str) -> Outcome<bool> {
        self.load().await.map(|favorites| favorites.contains(id))
    }

    /// Remove `item` if it is a favorite, otherwise add it.
    pub async fn toggle(&self, item: MediaItem) -> Outcome<Favorites> {
        self.mutate(|favorites| {
            let id = item.id.clone();
            let added = favorites.toggle(item);
            debug!("Toggled favorite {} (now favorited: {})", id, added);
        })
        .await
    }

    /// Add `item` unless already present.
    pub async fn add(&self, item: MediaItem) -> Outcome<Favorites> {
        self.mutate(|favorites| {
            favorites.add(item);
        })
        .await
    }

    pub async fn remove(&self, id: &str) -> Outcome<Favorites> {
        self.mutate(|favorites| {
            favorites.remove(id);
        })
        .await
    }

    async fn mutate<F>(&self, op: F) -> Outcome<Favorites>
    where
        F: FnOnce(&mut Favorites),
    {
        mutate_slot(self.store.as_ref(), op).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv_store::MemoryStore;

    fn item(id: &str) -> MediaItem {
        let mut item = MediaItem::new(id, format!("Video {}", id));
        item.view_count = 1200;
        item.duration = "4:20".to_string();
        item
    }

    fn setup(memory: MemoryStore) -> (Arc<MemoryStore>, FavoritesStore) {
        let memory = Arc::new(memory);
        let store = FavoritesStore::new(memory.clone());
        (memory, store)
    }

    #[tokio::test]
    async fn test_load_absent_slot_is_empty() {
        let (_, store) = setup(MemoryStore::new());
        let loaded = store.load().await;
        assert!(loaded.value.is_empty());
        assert!(!loaded.is_degraded());
    }

    #[tokio::test]
    async fn test_load_corrupt_slot_is_empty_and_reported() {
        let (_, store) = setup(MemoryStore::new().with_item("favorites", "{{not json"));
        let loaded = store.load().await;
        assert!(loaded.value.is_empty());
        assert!(loaded.error.as_ref().is_some_and(StoreError::is_decode));
    }

    #[tokio::test]
    async fn test_load_unreadable_slot_is_empty_and_reported() {
        let (memory, store) = setup(MemoryStore::new().with_item("favorites", "[]"));
        memory.set_fail_reads(true);
        let loaded = store.load().await;
        assert!(loaded.value.is_empty());
        assert!(loaded.error.as_ref().is_some_and(StoreError::is_read));
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let (memory, store) = setup(MemoryStore::new());

        let added = store.toggle(item("x")).await;
        assert!(!added.is_degraded());
        assert_eq!(added.value.ids(), vec!["x"]);
        assert!(store.is_favorited("x").await.value);

        let removed = store.toggle(item("x")).await;
        assert!(removed.value.is_empty());
        assert!(!store.is_favorited("x").await.value);
        assert_eq!(memory.raw("favorites").as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_toggle_persists_full_record() {
        let (_, store) = setup(MemoryStore::new());
        store.toggle(item("x")).await;

        let reloaded = store.load().await.value;
        let entry = reloaded.get("x").unwrap();
        assert_eq!(entry.title, "Video x");
        assert_eq!(entry.view_count, 1200);
        assert_eq!(entry.duration, "4:20");
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        let (_, store) = setup(MemoryStore::new());
        store.add(item("a")).await;
        store.add(item("b")).await;
        let again = store.add(item("a")).await;
        assert_eq!(again.value.ids(), vec!["a", "b"]);

        let after = store.remove("a").await;
        assert_eq!(after.value.ids(), vec!["b"]);
        let missing = store.remove("zzz").await;
        assert_eq!(missing.value.ids(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_toggle_on_corrupt_slot_replaces_it() {
        let (memory, store) = setup(MemoryStore::new().with_item("favorites", "garbage"));

        let outcome = store.toggle(item("x")).await;
        assert_eq!(outcome.value.ids(), vec!["x"]);
        assert!(outcome.error.as_ref().is_some_and(StoreError::is_decode));

        let reloaded = store.load().await;
        assert!(!reloaded.is_degraded());
        assert_eq!(reloaded.value.ids(), vec!["x"]);
        assert!(memory.raw("favorites").unwrap().starts_with('['));
    }

    #[tokio::test]
    async fn test_toggle_on_unreadable_slot_does_not_write() {
        let existing = r#"[{"id":"keep"}]"#;
        let (memory, store) = setup(MemoryStore::new().with_item("favorites", existing));
        memory.set_fail_reads(true);

        let outcome = store.toggle(item("x")).await;
        assert!(outcome.value.is_empty());
        assert!(outcome.error.as_ref().is_some_and(StoreError::is_read));
        assert_eq!(memory.raw("favorites").as_deref(), Some(existing));
    }

    #[tokio::test]
    async fn test_write_failure_returns_optimistic_result() {
        let (memory, store) = setup(MemoryStore::new());
        memory.set_fail_writes(true);

        let outcome = store.toggle(item("x")).await;
        assert_eq!(outcome.value.ids(), vec!["x"]);
        assert!(outcome.error.as_ref().is_some_and(StoreError::is_write));

        memory.set_fail_writes(false);
        assert!(store.load().await.value.is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_mutations_last_write_wins() {
        let (_, store) = setup(MemoryStore::new());

        // Two screens read the same starting state before either writes
        let mut first = store.load().await.value;
        let mut second = store.load().await.value;
        first.toggle(item("a"));
        second.toggle(item("b"));
        store.persist(&first).await.unwrap();
        store.persist(&second).await.unwrap();

        assert_eq!(store.load().await.value.ids(), vec!["b"]);
    }
}
