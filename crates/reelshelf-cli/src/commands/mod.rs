pub mod catalog;
pub mod favorites;
pub mod history;
pub mod reset;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::Confirm;
use media_library_config::{Config, PathManager};
use media_library_core::{FileStore, Library, StaticCatalog};
use std::sync::Arc;
use tracing::debug;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

pub fn load_catalog(config: &Config) -> Result<StaticCatalog> {
    match config.catalog.path {
        Some(ref path) => StaticCatalog::load_from_file(path).map_err(|e| eyre!("{:#}", e)),
        None => StaticCatalog::from_json_str(BUNDLED_CATALOG)
            .map_err(|e| eyre!("Bundled catalog is invalid: {:#}", e)),
    }
}

/// Catalog plus a library over the file-backed store named by `config`.
pub fn open_library(config: &Config, paths: &PathManager) -> Result<(Arc<StaticCatalog>, Library)> {
    let catalog = Arc::new(load_catalog(config)?);
    let store_dir = config.store_dir(paths);
    debug!("Using store directory {:?}", store_dir);

    let library = Library::new(Arc::new(FileStore::new(store_dir)), catalog.clone());
    Ok((catalog, library))
}

/// Ask before destructive commands unless `--yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| eyre!("Confirmation needs a terminal, pass --yes to skip it ({})", e))?;
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_library_config::CatalogConfig;
    use media_library_core::CatalogLookup;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = load_catalog(&Config::default()).unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.items().iter().all(|item| !item.id.is_empty()));
    }

    #[test]
    fn test_configured_catalog_replaces_bundled() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"[{"id":"only","title":"Only one"}]"#).unwrap();
        let config = Config {
            catalog: CatalogConfig {
                path: Some(file.path().to_path_buf()),
            },
            ..Config::default()
        };

        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find_by_id("only").is_some());
    }

    #[test]
    fn test_confirm_skipped_with_yes() {
        assert!(confirm("Really?", true).unwrap());
    }

    #[tokio::test]
    async fn test_open_library_uses_configured_data_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());
        let paths = PathManager::with_base(dir.path().join("unused"));

        let (catalog, library) = open_library(&config, &paths).unwrap();
        let first = catalog.items()[0].id.clone();
        library.watch(&first).await.unwrap();

        assert!(dir.path().join("store").join("history.json").exists());
    }
}
