//! Trait definitions for movie metadata services.
//!
//! The controllers only ever see these types, so a service can be swapped
//! (or faked in tests) without touching the view-state logic.

use std::future::Future;

use chrono::NaiveDate;

use crate::error::FetchError;

/// A movie metadata lookup service.
pub trait MovieService: Send + Sync {
    /// Search for movies by title. The query must not be blank.
    fn search_by_title(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResultItem>, FetchError>> + Send;

    /// Fetch the full record of one movie by its external id.
    fn fetch_by_id(&self, id: &str) -> impl Future<Output = Result<MovieDetail, FetchError>> + Send;
}

/// One row of a title search.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

/// The full record of a single movie.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub poster: Option<String>,
    pub plot: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub runtime_minutes: Option<u32>,
    pub genre: Option<String>,
    pub imdb_rating: Option<f32>,
    pub director: Option<String>,
    pub actors: Option<String>,
}
