//! Search controller: query → fetch command → result set.
//!
//! The controller never performs I/O. [`SearchController::set_query`] is a
//! state transition that may hand back a [`SearchCommand`]; whoever runs the
//! command feeds the outcome to [`SearchController::apply`] together with the
//! token it was issued with. Responses for superseded queries are dropped
//! there, so a slow early request cannot overwrite a newer result.

use serde::Serialize;

use popcorn_api::{FetchError, SearchResultItem};

use crate::models::FetchStatus;
use crate::request::{RequestToken, RequestTracker};

/// Snapshot of the search view.
///
/// While `Loading`, `results` still holds the previous result set so the
/// view can decide whether to keep showing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub status: FetchStatus,
    pub error_message: Option<String>,
}

/// A title search the driver should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCommand {
    pub token: RequestToken,
    pub query: String,
}

pub struct SearchController {
    state: SearchState,
    min_query_len: usize,
    requests: RequestTracker,
}

impl SearchController {
    /// `min_query_len` is the debounce threshold: queries of that many
    /// characters or fewer never produce a fetch.
    pub fn new(min_query_len: usize) -> Self {
        Self {
            state: SearchState::default(),
            min_query_len,
            requests: RequestTracker::default(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Whether a search is outstanding for the current query.
    pub fn is_pending(&self) -> bool {
        self.requests.has_pending()
    }

    /// Update the query. Returns the fetch to run, if any.
    ///
    /// Re-submitting the current query is a no-op; use [`Self::retry`] to
    /// search again.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<SearchCommand> {
        let query = query.into();
        if query == self.state.query {
            return None;
        }
        self.state.query = query;
        self.transition()
    }

    /// Search again for the current query, e.g. after an error.
    pub fn retry(&mut self) -> Option<SearchCommand> {
        self.transition()
    }

    fn transition(&mut self) -> Option<SearchCommand> {
        let trimmed = self.state.query.trim();
        if trimmed.chars().count() <= self.min_query_len {
            self.requests.invalidate();
            self.state.results.clear();
            self.state.error_message = None;
            self.state.status = FetchStatus::Idle;
            return None;
        }

        let command = SearchCommand {
            token: self.requests.issue(),
            query: trimmed.to_string(),
        };
        self.state.status = FetchStatus::Loading;
        self.state.error_message = None;
        tracing::debug!(query = %command.query, token = ?command.token, "Search issued");
        Some(command)
    }

    /// Apply the outcome of a search. Returns `false` when `token` is stale
    /// and the outcome was discarded.
    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<Vec<SearchResultItem>, FetchError>,
    ) -> bool {
        if !self.requests.settle(token) {
            tracing::debug!(token = ?token, "Discarding stale search response");
            return false;
        }

        match result {
            Ok(results) => {
                tracing::debug!(count = results.len(), "Search succeeded");
                self.state.results = results;
                self.state.error_message = None;
                self.state.status = FetchStatus::Success;
            }
            Err(e) => {
                tracing::warn!(error = %e, query = %self.state.query, "Search failed");
                self.state.results.clear();
                self.state.error_message = Some(e.user_message());
                self.state.status = FetchStatus::Error;
            }
        }
        true
    }
}
