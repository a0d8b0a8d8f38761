use serde::Serialize;

/// Maximum number of ids retained in watch history.
pub const HISTORY_CAPACITY: usize = 50;

/// Watched catalog ids, most recent first.
///
/// Unique by id and never longer than [`HISTORY_CAPACITY`]. Re-watching an id
/// moves it to the front; overflow drops the oldest id at the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WatchHistory {
    ids: Vec<String>,
}

impl WatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ids already in recency order.
    ///
    /// Later duplicates are dropped (the first occurrence is the most recent
    /// watch) and the result is trimmed to capacity.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut normalized: Vec<String> = Vec::with_capacity(HISTORY_CAPACITY);
        for id in ids {
            if normalized.len() == HISTORY_CAPACITY {
                break;
            }
            let id = id.into();
            if !normalized.contains(&id) {
                normalized.push(id);
            }
        }
        Self { ids: normalized }
    }

    /// Move `id` to the front, evicting from the tail past capacity.
    ///
    /// Returns the evicted id, if any.
    pub fn record(&mut self, id: impl Into<String>) -> Option<String> {
        let id = id.into();
        self.ids.retain(|existing| *existing != id);
        self.ids.insert(0, id);
        self.trim().into_iter().next()
    }

    /// Drop everything past capacity, returning the dropped ids oldest-last.
    pub fn trim(&mut self) -> Vec<String> {
        if self.ids.len() > HISTORY_CAPACITY {
            self.ids.split_off(HISTORY_CAPACITY)
        } else {
            Vec::new()
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ids.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ids
    }
}

impl<'a> IntoIterator for &'a WatchHistory {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
