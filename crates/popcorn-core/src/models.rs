pub mod status;
pub mod watched;

pub use status::FetchStatus;
pub use watched::{WatchedItem, WatchlistSummary};
