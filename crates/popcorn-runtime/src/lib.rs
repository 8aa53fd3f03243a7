//! Event-loop driver for the popcorn controllers.
//!
//! A [`Session`] owns the search and detail controllers and the watchlist.
//! Fetch commands returned by the controllers run on spawned tasks; their
//! outcomes come back as [`Completion`]s on a channel and are applied on the
//! task that owns the session, so controller state is never shared.

mod completion;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, watch};

use popcorn_api::omdb::OmdbClient;
use popcorn_api::{FetchError, MovieService};
use popcorn_core::config::AppConfig;
use popcorn_core::detail::{DetailCommand, DetailController, DetailState};
use popcorn_core::models::{WatchedItem, WatchlistSummary};
use popcorn_core::search::{SearchCommand, SearchController, SearchState};
use popcorn_core::watchlist::Watchlist;
use popcorn_core::CoreError;

pub use completion::Completion;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("api error: {0}")]
    Api(#[from] FetchError),
}

/// What the view shows for the detail panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailView {
    pub state: DetailState,
    /// The selected movie is already in the watchlist.
    pub is_watched: bool,
}

/// What the view shows for the watched list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WatchlistView {
    pub items: Vec<WatchedItem>,
    pub summary: WatchlistSummary,
}

/// A session backed by the OMDb HTTP client.
pub type OmdbSession = Session<OmdbClient>;

pub struct Session<S> {
    service: Arc<S>,
    search: SearchController,
    detail: DetailController,
    watchlist: Watchlist,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    search_tx: watch::Sender<SearchState>,
    detail_tx: watch::Sender<DetailView>,
    watchlist_tx: watch::Sender<WatchlistView>,
}

impl OmdbSession {
    /// Build a session backed by the OMDb client described by `config`.
    ///
    /// Fails when the API credentials are missing or invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, RuntimeError> {
        let settings = config.credentials()?;
        let client = OmdbClient::new(&settings)?;
        tracing::info!(base_url = %settings.base_url, "Session ready");
        Ok(Self::new(Arc::new(client), config.search.min_query_len))
    }
}

impl<S: MovieService + 'static> Session<S> {
    /// Create a session. Methods that issue fetches must be called from
    /// within a tokio runtime.
    pub fn new(service: Arc<S>, min_query_len: usize) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (search_tx, _) = watch::channel(SearchState::default());
        let (detail_tx, _) = watch::channel(DetailView::default());
        let (watchlist_tx, _) = watch::channel(WatchlistView::default());

        Self {
            service,
            search: SearchController::new(min_query_len),
            detail: DetailController::new(),
            watchlist: Watchlist::new(),
            completion_tx,
            completion_rx,
            search_tx,
            detail_tx,
            watchlist_tx,
        }
    }

    // ── Snapshots ───────────────────────────────────────────────

    pub fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    pub fn detail_state(&self) -> &DetailState {
        self.detail.state()
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn subscribe_search(&self) -> watch::Receiver<SearchState> {
        self.search_tx.subscribe()
    }

    pub fn subscribe_detail(&self) -> watch::Receiver<DetailView> {
        self.detail_tx.subscribe()
    }

    pub fn subscribe_watchlist(&self) -> watch::Receiver<WatchlistView> {
        self.watchlist_tx.subscribe()
    }

    /// Whether `id` is in the watchlist.
    pub fn is_watched(&self, id: &str) -> bool {
        self.watchlist.contains(id)
    }

    /// Whether any current (non-superseded) fetch is still outstanding.
    pub fn has_pending(&self) -> bool {
        self.search.is_pending() || self.detail.is_pending()
    }

    // ── Search ──────────────────────────────────────────────────

    pub fn set_query(&mut self, query: impl Into<String>) {
        if let Some(command) = self.search.set_query(query) {
            self.spawn_search(command);
        }
        self.publish_search();
    }

    pub fn retry_search(&mut self) {
        if let Some(command) = self.search.retry() {
            self.spawn_search(command);
        }
        self.publish_search();
    }

    // ── Selection ───────────────────────────────────────────────

    pub fn select(&mut self, id: Option<String>) {
        if let Some(command) = self.detail.select(id) {
            self.spawn_detail(command);
        }
        self.publish_detail();
    }

    /// Select `id`, or close the panel if it is already selected.
    pub fn toggle_selection(&mut self, id: &str) {
        if let Some(command) = self.detail.toggle(id) {
            self.spawn_detail(command);
        }
        self.publish_detail();
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
        self.publish_detail();
    }

    // ── Watchlist ───────────────────────────────────────────────

    /// Add the loaded selection to the watchlist with the user's rating.
    pub fn add_selected_to_watchlist(&mut self, user_rating: f32) -> Result<(), CoreError> {
        let item = self.detail.watched_item(user_rating)?;
        self.add_to_watchlist(item)
    }

    pub fn add_to_watchlist(&mut self, item: WatchedItem) -> Result<(), CoreError> {
        self.watchlist.add(item)?;
        self.publish_watchlist();
        Ok(())
    }

    /// Remove `id` from the watchlist. Absent ids are ignored.
    pub fn remove_from_watchlist(&mut self, id: &str) -> bool {
        let removed = self.watchlist.remove(id);
        if removed {
            self.publish_watchlist();
        }
        removed
    }

    // ── Completions ─────────────────────────────────────────────

    /// Wait for the next fetch outcome. Cancel-safe.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completion_rx.recv().await
    }

    /// Apply a fetch outcome. Returns `false` if it was stale.
    pub fn apply_completion(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Search { token, result } => {
                let applied = self.search.apply(token, result);
                if applied {
                    self.publish_search();
                }
                applied
            }
            Completion::Detail { token, result } => {
                let applied = self.detail.apply(token, result);
                if applied {
                    self.publish_detail();
                }
                applied
            }
        }
    }

    /// Apply completions until no current fetch is outstanding.
    pub async fn settle(&mut self) {
        while self.has_pending() {
            match self.next_completion().await {
                Some(completion) => {
                    self.apply_completion(completion);
                }
                None => break,
            }
        }
    }

    // ── Internals ───────────────────────────────────────────────

    fn spawn_search(&self, command: SearchCommand) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = service.search_by_title(&command.query).await;
            let _ = tx.send(Completion::Search {
                token: command.token,
                result,
            });
        });
    }

    fn spawn_detail(&self, command: DetailCommand) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = service.fetch_by_id(&command.id).await;
            let _ = tx.send(Completion::Detail {
                token: command.token,
                result,
            });
        });
    }

    fn publish_search(&self) {
        self.search_tx.send_replace(self.search.state().clone());
    }

    fn publish_detail(&self) {
        self.detail_tx.send_replace(DetailView {
            state: self.detail.state().clone(),
            is_watched: self.detail.is_watched(&self.watchlist),
        });
    }

    fn publish_watchlist(&self) {
        self.watchlist_tx.send_replace(WatchlistView {
            items: self.watchlist.items().to_vec(),
            summary: self.watchlist.summary(),
        });
        // The "already watched" marker depends on the list.
        if self.detail.selected_id().is_some() {
            self.publish_detail();
        }
    }
}
