//! JSON encoding of the persisted collections.
//!
//! Writers emit a bare JSON array. Readers also accept a versioned envelope
//! `{"version": n, "items": [...]}` and repair what they can: malformed
//! entries are dropped one by one instead of discarding the whole slot.

use media_library_models::{Favorites, MediaItem, WatchHistory};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

pub const FAVORITES_SLOT: &str = "favorites";
pub const HISTORY_SLOT: &str = "history";

/// Newest record schema this reader understands.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotPayload {
    Bare(Vec<Value>),
    Versioned { version: u32, items: Vec<Value> },
}

fn decode_payload(context: &str, raw: &str) -> Result<Vec<Value>, serde_json::Error> {
    match serde_json::from_str::<SlotPayload>(raw)? {
        SlotPayload::Bare(items) => Ok(items),
        SlotPayload::Versioned { version, items } => {
            if version > SCHEMA_VERSION {
                warn!(
                    "{} written with schema version {} (newer than {}), reading best effort",
                    context, version, SCHEMA_VERSION
                );
            }
            Ok(items)
        }
    }
}

/// Decode an array of media records, dropping entries that are not objects
/// or carry no id.
pub fn decode_media_items(context: &str, raw: &str) -> Result<Vec<MediaItem>, serde_json::Error> {
    let values = decode_payload(context, raw)?;
    let mut items = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        if !value.is_object() {
            warn!("Dropping {} entry {}: not an object", context, index);
            continue;
        }
        match serde_json::from_value::<MediaItem>(value) {
            Ok(item) if item.id.is_empty() => {
                warn!("Dropping {} entry {}: missing id", context, index);
            }
            Ok(item) => items.push(item),
            Err(e) => warn!("Dropping {} entry {}: {}", context, index, e),
        }
    }
    Ok(items)
}

pub fn decode_favorites(raw: &str) -> Result<Favorites, serde_json::Error> {
    let items = decode_media_items(FAVORITES_SLOT, raw)?;
    let count = items.len();
    let favorites = Favorites::from_entries(items);
    if favorites.len() < count {
        warn!(
            "Dropped {} duplicate favorite(s) while loading",
            count - favorites.len()
        );
    }
    Ok(favorites)
}

pub fn decode_history(raw: &str) -> Result<WatchHistory, serde_json::Error> {
    let values = decode_payload(HISTORY_SLOT, raw)?;
    let total = values.len();
    let history = WatchHistory::from_ids(values.into_iter().filter_map(|value| match value {
        Value::String(id) if !id.is_empty() => Some(id),
        _ => None,
    }));
    if history.len() < total {
        warn!(
            "Repaired history while loading: kept {} of {} entries",
            history.len(),
            total
        );
    }
    Ok(history)
}

pub fn encode_favorites(favorites: &Favorites) -> Result<String, serde_json::Error> {
    serde_json::to_string(favorites)
}

pub fn encode_history(history: &WatchHistory) -> Result<String, serde_json::Error> {
    serde_json::to_string(history)
}
