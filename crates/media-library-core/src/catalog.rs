use anyhow::{Context, Result};
use media_library_models::MediaItem;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::codec::decode_media_items;

/// Read-only resolution of catalog ids to full records.
pub trait CatalogLookup: Send + Sync {
    fn find_by_id(&self, id: &str) -> Option<&MediaItem>;
}

/// Fixed catalog loaded once from a bundled dataset.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<MediaItem>,
    by_id: HashMap<String, usize>,
}

impl StaticCatalog {
    /// Index `items` by id. The first record for an id wins.
    pub fn new(items: Vec<MediaItem>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            if item.id.is_empty() {
                continue;
            }
            if catalog.by_id.contains_key(&item.id) {
                warn!("Catalog contains duplicate id {}, keeping the first", item.id);
                continue;
            }
            catalog.by_id.insert(item.id.clone(), catalog.items.len());
            catalog.items.push(item);
        }
        catalog
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let items = decode_media_items("catalog", json).context("Catalog is not a JSON array")?;
        Ok(Self::new(items))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        info!("Loaded catalog {:?} ({} items)", path, catalog.len());
        Ok(catalog)
    }

    /// All items in dataset order.
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogLookup for StaticCatalog {
    fn find_by_id(&self, id: &str) -> Option<&MediaItem> {
        self.by_id.get(id).map(|&index| &self.items[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const DATASET: &str = r#"[
        {"id":"a","title":"Alpha","viewCount":10,"likes":1,"duration":"1:00","channelName":"One"},
        {"id":"b","title":"Bravo"},
        {"id":"a","title":"Alpha duplicate"},
        {"title":"no id"}
    ]"#;

    #[test]
    fn test_find_by_id() {
        let catalog = StaticCatalog::from_json_str(DATASET).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find_by_id("a").unwrap().title, "Alpha");
        assert_eq!(catalog.find_by_id("b").unwrap().view_count, 0);
        assert!(catalog.find_by_id("zzz").is_none());
    }

    #[test]
    fn test_items_keep_dataset_order() {
        let catalog = StaticCatalog::from_json_str(DATASET).unwrap();
        let ids: Vec<&str> = catalog.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_dataset_is_error() {
        assert!(StaticCatalog::from_json_str("{\"id\":\"a\"}").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), DATASET).unwrap();

        let catalog = StaticCatalog::load_from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);

        assert!(StaticCatalog::load_from_file(Path::new("/nonexistent/catalog.json")).is_err());
    }
}
