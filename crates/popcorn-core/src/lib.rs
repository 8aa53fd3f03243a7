pub mod config;
pub mod detail;
pub mod error;
pub mod models;
pub mod request;
pub mod search;
pub mod watchlist;

pub use error::CoreError;
