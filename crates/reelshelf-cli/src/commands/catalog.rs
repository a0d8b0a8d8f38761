use crate::output::Output;
use crate::CatalogCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use media_library_core::{CatalogLookup, StaticCatalog};

pub fn run_catalog(cmd: CatalogCommands, catalog: &StaticCatalog, output: &Output) -> Result<()> {
    match cmd {
        CatalogCommands::List => output.media_list(catalog.items(), "Catalog is empty"),
        CatalogCommands::Show { id } => {
            let item = catalog
                .find_by_id(&id)
                .ok_or_else(|| eyre!("No catalog item with id '{}'", id))?;
            output.media_list(std::slice::from_ref(item), "");
        }
    }
    Ok(())
}
