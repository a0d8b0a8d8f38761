use crate::output::Output;
use crate::FavoritesCommands;
use color_eyre::Result;
use media_library_core::Library;
use serde_json::json;

pub async fn run_favorites(cmd: FavoritesCommands, library: &Library, output: &Output) -> Result<()> {
    match cmd {
        FavoritesCommands::List => {
            let favorites = library.favorites().await;
            output.degraded(favorites.error.as_ref());
            output.media_list(favorites.value.as_slice(), "No favorites yet");
        }
        FavoritesCommands::Toggle { id } => {
            let outcome = library.toggle_favorite(&id).await?;
            output.degraded(outcome.error.as_ref());
            if outcome.value.contains(&id) {
                output.success(format!("Added {} to favorites", id));
            } else {
                output.success(format!("Removed {} from favorites", id));
            }
        }
        FavoritesCommands::Add { id } => {
            let outcome = library.add_favorite(&id).await?;
            output.degraded(outcome.error.as_ref());
            output.success(format!("{} is in favorites ({} total)", id, outcome.value.len()));
        }
        FavoritesCommands::Remove { id } => {
            let outcome = library.remove_favorite(&id).await;
            output.degraded(outcome.error.as_ref());
            output.success(format!("{} is not in favorites ({} total)", id, outcome.value.len()));
        }
        FavoritesCommands::Check { id } => {
            let outcome = library.is_favorited(&id).await;
            output.degraded(outcome.error.as_ref());
            if output.is_human() {
                let verdict = if outcome.value { "is" } else { "is not" };
                output.info(format!("{} {} a favorite", id, verdict));
            } else {
                output.json(&json!({ "id": id, "favorited": outcome.value }));
            }
        }
    }
    Ok(())
}
