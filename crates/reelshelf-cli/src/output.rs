use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use media_library_core::StoreError;
use media_library_models::{format_likes, format_relative_date, format_views, MediaItem};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.status("success", msg.as_ref(), |m| println!("{} {}", "✓".green(), m));
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.status("info", msg.as_ref(), |m| println!("{}", m));
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.status("warning", msg.as_ref(), |m| println!("{} {}", "⚠".yellow(), m));
    }

    /// Surface a recovered storage fault without failing the command.
    pub fn degraded(&self, error: Option<&StoreError>) {
        if let Some(error) = error {
            self.warn(format!("{} (showing what could be recovered)", error));
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        self.print_json(data);
    }

    /// Render media records as a table, or as a JSON array in JSON modes.
    pub fn media_list(&self, items: &[MediaItem], empty_message: &str) {
        if !self.is_human() {
            self.print_json(&serde_json::to_value(items).unwrap_or_default());
            return;
        }
        if self.quiet {
            return;
        }
        if items.is_empty() {
            println!("{}", empty_message.dimmed());
            return;
        }
        println!("{}", media_table(items, chrono::Utc::now().date_naive()));
    }

    fn status(&self, kind: &str, msg: &str, human: impl FnOnce(&str)) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => human(msg),
            _ => self.print_json(&json!({ "type": kind, "message": msg })),
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default())
            }
            _ => println!("{}", serde_json::to_string(data).unwrap_or_default()),
        }
    }
}

pub fn media_table(items: &[MediaItem], today: chrono::NaiveDate) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Title", "Channel", "Views", "Likes", "Published", "Length"]);

    for item in items {
        let published = item
            .published_date()
            .map(|date| format_relative_date(date, today))
            .unwrap_or_else(|| "unknown".to_string());
        table.add_row(vec![
            item.id.clone(),
            item.title.clone(),
            item.channel_name.clone(),
            format_views(item.view_count),
            format_likes(item.likes),
            published,
            item.duration.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_table_rows() {
        let mut item = MediaItem::new("abc", "A title");
        item.view_count = 12_300;
        item.date = "2024-06-29".to_string();
        let mut undated = MediaItem::new("def", "Undated");
        undated.date = "someday".to_string();

        let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let mut table = media_table(&[item, undated], today);
        table.set_width(200);
        let rendered = table.to_string();
        assert!(rendered.contains("12.3K views"));
        assert!(rendered.contains("1 day ago"));
        assert!(rendered.contains("unknown"));
    }
}
