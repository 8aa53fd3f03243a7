pub mod client;
pub mod types;

pub use client::{ClientSettings, OmdbClient};
pub use types::{parse_detail_body, parse_search_body};
