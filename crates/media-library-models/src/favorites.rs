use serde::Serialize;

use crate::media::MediaItem;

/// A favorite is a full copy of the catalog record taken when it was
/// favorited, so it stays renderable after the catalog drops the item.
pub type FavoriteEntry = MediaItem;

/// The user's favorites, unique by id.
///
/// Entries keep insertion order, though callers should not rely on it.
/// Serializes as a bare JSON array of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw entries, keeping the first occurrence of each id.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = FavoriteEntry>,
    {
        let mut favorites = Self::new();
        for entry in entries {
            favorites.add(entry);
        }
        favorites
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Flip membership of `item`. Returns true when the item is now a favorite.
    pub fn toggle(&mut self, item: MediaItem) -> bool {
        if self.remove(&item.id).is_some() {
            false
        } else {
            self.entries.push(item);
            true
        }
    }

    /// Append `item` unless its id is already present. Returns true if added.
    pub fn add(&mut self, item: MediaItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.entries.push(item);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<FavoriteEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FavoriteEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<FavoriteEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Favorites {
    type Item = &'a FavoriteEntry;
    type IntoIter = std::slice::Iter<'a, FavoriteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn item(id: &str) -> MediaItem {
        MediaItem::new(id, format!("Video {}", id))
    }

    fn id_set(favorites: &Favorites) -> HashSet<String> {
        favorites.iter().map(|entry| entry.id.clone()).collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle(item("x")));
        assert_eq!(favorites.ids(), vec!["x"]);

        assert!(!favorites.toggle(item("x")));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_pair_restores_original_set() {
        let original = Favorites::from_entries(vec![item("a"), item("b"), item("c")]);

        for id in ["a", "b", "z"] {
            let mut favorites = original.clone();
            favorites.toggle(item(id));
            favorites.toggle(item(id));
            assert_eq!(id_set(&favorites), id_set(&original), "toggling {} twice", id);
        }
    }

    #[test]
    fn test_toggle_sequence_never_duplicates() {
        let mut favorites = Favorites::new();
        let sequence = ["a", "b", "a", "c", "b", "b", "a", "c", "d", "a"];
        for id in sequence {
            favorites.toggle(item(id));
            let ids = favorites.ids();
            let unique: HashSet<&str> = ids.iter().copied().collect();
            assert_eq!(ids.len(), unique.len());
        }
    }

    #[test]
    fn test_toggle_keeps_stored_copy() {
        let mut favorites = Favorites::new();
        let mut original = item("x");
        original.view_count = 10;
        favorites.toggle(original);

        assert_eq!(favorites.get("x").map(|e| e.view_count), Some(10));
    }

    #[test]
    fn test_add_is_set_add() {
        let mut favorites = Favorites::new();
        assert!(favorites.add(item("a")));
        assert!(!favorites.add(item("a")));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut favorites = Favorites::from_entries(vec![item("a")]);
        assert!(favorites.remove("b").is_none());
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_from_entries_keeps_first_duplicate() {
        let mut first = item("a");
        first.title = "first".to_string();
        let mut second = item("a");
        second.title = "second".to_string();

        let favorites = Favorites::from_entries(vec![first, item("b"), second]);
        assert_eq!(favorites.ids(), vec!["a", "b"]);
        assert_eq!(favorites.get("a").unwrap().title, "first");
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let favorites = Favorites::from_entries(vec![item("a")]);
        let json = serde_json::to_value(&favorites).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "a");
    }
}
