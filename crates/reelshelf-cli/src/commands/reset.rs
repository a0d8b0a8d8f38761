use super::confirm;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use media_library_core::Library;

pub async fn run_reset(yes: bool, library: &Library, output: &Output) -> Result<()> {
    if !confirm("Delete all favorites and watch history?", yes)? {
        output.info("Nothing was deleted");
        return Ok(());
    }

    let outcome = library.reset().await;
    if let Some(error) = outcome.error {
        return Err(eyre!("Reset did not complete: {}", error));
    }
    output.success("Favorites and watch history deleted");
    Ok(())
}
