pub mod favorites;
pub mod format;
pub mod lenient;
pub mod media;
pub mod watch_history;

pub use favorites::{FavoriteEntry, Favorites};
pub use format::{format_likes, format_relative_date, format_views};
pub use media::MediaItem;
pub use watch_history::{WatchHistory, HISTORY_CAPACITY};
