use super::confirm;
use crate::output::Output;
use crate::HistoryCommands;
use color_eyre::Result;
use media_library_core::Library;
use serde_json::json;

pub async fn run_history(cmd: HistoryCommands, library: &Library, output: &Output) -> Result<()> {
    match cmd {
        HistoryCommands::List => {
            let watched = library.watched_items().await;
            output.degraded(watched.error.as_ref());
            output.media_list(&watched.value, "No watch history yet");
        }
        HistoryCommands::Ids => {
            let history = library.history_ids().await;
            output.degraded(history.error.as_ref());
            if output.is_human() {
                for (position, id) in history.value.iter().enumerate() {
                    output.info(format!("{:>2}. {}", position + 1, id));
                }
            } else {
                output.json(&json!(history.value.ids()));
            }
        }
        HistoryCommands::Watch { id } => {
            let (item, history) = library.watch(&id).await?;
            output.degraded(history.error.as_ref());
            output.success(format!("Now playing: {}", item.title));
            output.info(format!("Thumbnail: {}", item.thumbnail_url()));
        }
        HistoryCommands::Clear { yes } => {
            if !confirm("Clear the entire watch history?", yes)? {
                output.info("Watch history left unchanged");
                return Ok(());
            }
            let cleared = library.clear_history().await;
            output.degraded(cleared.error.as_ref());
            output.success("Watch history cleared");
        }
    }
    Ok(())
}
