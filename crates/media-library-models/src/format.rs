//! Display strings shown on media cards.

use chrono::NaiveDate;

fn scaled(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// "1.5M views", "12.3K views", "999 views"
pub fn format_views(count: u64) -> String {
    format!("{} views", scaled(count))
}

/// Like counts use the same scaling without a suffix.
pub fn format_likes(count: u64) -> String {
    scaled(count)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Coarse age of `date` relative to `today`: days under a week, then weeks,
/// 30-day months and 365-day years. Whole calendar days; each unit rounds down.
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days().abs();
    if days < 7 {
        plural(days, "day")
    } else if days < 30 {
        plural(days / 7, "week")
    } else if days < 365 {
        plural(days / 30, "month")
    } else {
        plural(days / 365, "year")
    }
}
