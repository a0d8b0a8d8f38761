pub mod catalog;
pub mod codec;
pub mod error;
pub mod favorites_store;
pub mod file_store;
pub mod history_store;
pub mod kv_store;
pub mod library;
mod slot;

pub use catalog::{CatalogLookup, StaticCatalog};
pub use codec::{FAVORITES_SLOT, HISTORY_SLOT, SCHEMA_VERSION};
pub use error::{LibraryError, Outcome, StorageError, StoreError};
pub use favorites_store::FavoritesStore;
pub use file_store::FileStore;
pub use history_store::{resolve_watched, HistoryStore};
pub use kv_store::{KeyValueStore, MemoryStore};
pub use library::Library;
