//! Detail controller: selected id → full movie record.
//!
//! Mirrors the search controller. Selecting an id issues a token; only the
//! record fetched for the current selection is applied. Fetch failures are
//! shown to the user rather than swallowed.

use serde::Serialize;

use popcorn_api::{FetchError, MovieDetail};

use crate::error::CoreError;
use crate::models::{FetchStatus, WatchedItem};
use crate::request::{RequestToken, RequestTracker};
use crate::watchlist::Watchlist;

/// Snapshot of the detail panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailState {
    pub selected_id: Option<String>,
    pub detail: Option<MovieDetail>,
    pub status: FetchStatus,
    pub error_message: Option<String>,
}

/// A by-id lookup the driver should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCommand {
    pub token: RequestToken,
    pub id: String,
}

#[derive(Default)]
pub struct DetailController {
    state: DetailState,
    requests: RequestTracker,
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.state.selected_id.as_deref()
    }

    /// Whether a fetch for the current selection is outstanding.
    pub fn is_pending(&self) -> bool {
        self.requests.has_pending()
    }

    /// Change the selection. `None` clears the panel without fetching;
    /// selecting the id that is already selected does nothing.
    pub fn select(&mut self, id: Option<String>) -> Option<DetailCommand> {
        let Some(id) = id else {
            if self.state.selected_id.is_some() {
                tracing::debug!("Selection cleared");
            }
            self.requests.invalidate();
            self.state = DetailState::default();
            return None;
        };

        if self.state.selected_id.as_deref() == Some(id.as_str()) {
            return None;
        }

        let command = DetailCommand {
            token: self.requests.issue(),
            id: id.clone(),
        };
        self.state = DetailState {
            selected_id: Some(id),
            detail: None,
            status: FetchStatus::Loading,
            error_message: None,
        };
        tracing::debug!(id = %command.id, token = ?command.token, "Detail fetch issued");
        Some(command)
    }

    /// Select `id`, or clear the selection if `id` is already selected.
    pub fn toggle(&mut self, id: &str) -> Option<DetailCommand> {
        if self.selected_id() == Some(id) {
            self.select(None)
        } else {
            self.select(Some(id.to_string()))
        }
    }

    pub fn close(&mut self) {
        self.select(None);
    }

    /// Apply a fetched record. Returns `false` when `token` is stale.
    pub fn apply(&mut self, token: RequestToken, result: Result<MovieDetail, FetchError>) -> bool {
        if !self.requests.settle(token) {
            tracing::debug!(token = ?token, "Discarding stale detail response");
            return false;
        }

        match result {
            Ok(detail) => {
                self.state.detail = Some(detail);
                self.state.error_message = None;
                self.state.status = FetchStatus::Success;
            }
            Err(e) => {
                tracing::warn!(error = %e, id = ?self.state.selected_id, "Detail fetch failed");
                self.state.detail = None;
                self.state.error_message = Some(e.user_message());
                self.state.status = FetchStatus::Error;
            }
        }
        true
    }

    /// Whether the selected movie is already in `watchlist`.
    pub fn is_watched(&self, watchlist: &Watchlist) -> bool {
        self.selected_id().is_some_and(|id| watchlist.contains(id))
    }

    /// Build a watchlist entry for the loaded selection.
    pub fn watched_item(&self, user_rating: f32) -> Result<WatchedItem, CoreError> {
        if self.state.selected_id.is_none() {
            return Err(CoreError::NothingSelected);
        }
        let detail = self
            .state
            .detail
            .as_ref()
            .ok_or(CoreError::DetailNotLoaded)?;
        WatchedItem::from_detail(detail, user_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: &str) -> MovieDetail {
        MovieDetail {
            id: id.into(),
            title: format!("Movie {id}"),
            year: None,
            poster: None,
            plot: None,
            release_date: None,
            runtime_minutes: Some(120),
            genre: None,
            imdb_rating: Some(7.5),
            director: None,
            actors: None,
        }
    }

    #[test]
    fn test_select_fetches_and_applies() {
        let mut ctl = DetailController::new();
        let cmd = ctl.select(Some("tt0816692".into())).unwrap();
        assert_eq!(cmd.id, "tt0816692");
        assert_eq!(ctl.state().status, FetchStatus::Loading);

        assert!(ctl.apply(cmd.token, Ok(detail("tt0816692"))));
        assert_eq!(ctl.state().status, FetchStatus::Success);
        assert_eq!(ctl.state().detail.as_ref().unwrap().id, "tt0816692");
    }

    #[test]
    fn test_clear_selection_does_not_fetch() {
        let mut ctl = DetailController::new();
        let cmd = ctl.select(Some("tt0816692".into())).unwrap();
        assert!(ctl.select(None).is_none());
        assert_eq!(ctl.state(), &DetailState::default());
        assert!(!ctl.apply(cmd.token, Ok(detail("tt0816692"))));
        assert!(ctl.state().detail.is_none());
    }

    #[test]
    fn test_reselect_same_id_is_noop() {
        let mut ctl = DetailController::new();
        ctl.select(Some("tt0816692".into())).unwrap();
        assert!(ctl.select(Some("tt0816692".into())).is_none());
    }

    #[test]
    fn test_stale_detail_discarded() {
        let mut ctl = DetailController::new();
        let a = ctl.select(Some("tt0000001".into())).unwrap();
        let b = ctl.select(Some("tt0000002".into())).unwrap();

        assert!(ctl.apply(b.token, Ok(detail("tt0000002"))));
        assert!(!ctl.apply(a.token, Ok(detail("tt0000001"))));
        assert_eq!(ctl.state().selected_id.as_deref(), Some("tt0000002"));
        assert_eq!(ctl.state().detail.as_ref().unwrap().id, "tt0000002");
    }

    #[test]
    fn test_toggle() {
        let mut ctl = DetailController::new();
        assert!(ctl.toggle("tt0816692").is_some());
        assert!(ctl.toggle("tt0816692").is_none());
        assert!(ctl.selected_id().is_none());
    }

    #[test]
    fn test_fetch_error_is_surfaced() {
        let mut ctl = DetailController::new();
        let cmd = ctl.select(Some("tt9999999".into())).unwrap();
        ctl.apply(
            cmd.token,
            Err(FetchError::NotFound {
                message: "Incorrect IMDb ID.".into(),
            }),
        );
        assert_eq!(ctl.state().status, FetchStatus::Error);
        assert_eq!(
            ctl.state().error_message.as_deref(),
            Some("Incorrect IMDb ID.")
        );
    }

    #[test]
    fn test_is_watched_uses_watchlist_membership() {
        let mut list = Watchlist::new();
        list.add(WatchedItem::from_detail(&detail("tt0816692"), 9.0).unwrap())
            .unwrap();

        let mut ctl = DetailController::new();
        assert!(!ctl.is_watched(&list));
        ctl.select(Some("tt0816692".into()));
        // Still loading: membership does not depend on the fetched record.
        assert_eq!(ctl.state().status, FetchStatus::Loading);
        assert!(ctl.is_watched(&list));
    }

    #[test]
    fn test_watched_item_requires_loaded_detail() {
        let mut ctl = DetailController::new();
        assert!(matches!(
            ctl.watched_item(8.0),
            Err(CoreError::NothingSelected)
        ));

        let cmd = ctl.select(Some("tt0816692".into())).unwrap();
        assert!(matches!(
            ctl.watched_item(8.0),
            Err(CoreError::DetailNotLoaded)
        ));

        ctl.apply(cmd.token, Ok(detail("tt0816692")));
        let item = ctl.watched_item(8.0).unwrap();
        assert_eq!(item.runtime_minutes, 120);
        assert_eq!(item.user_rating, 8.0);
    }
}
