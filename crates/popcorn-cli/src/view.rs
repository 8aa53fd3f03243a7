//! Plain-text rendering of session snapshots.

use std::fmt::Write;

use tokio::sync::watch;

use popcorn_core::models::FetchStatus;
use popcorn_core::search::SearchState;
use popcorn_runtime::{DetailView, WatchlistView};

const RELEASED_FORMAT: &str = "%d %b %Y";

pub fn render_search(state: &SearchState) -> String {
    match state.status {
        FetchStatus::Idle => "Search for a movie to get started.".into(),
        FetchStatus::Loading => "Loading...".into(),
        FetchStatus::Error => error_line(state.error_message.as_deref()),
        FetchStatus::Success => {
            let mut out = format!("Found {} results", state.results.len());
            for (i, movie) in state.results.iter().enumerate() {
                let _ = write!(
                    out,
                    "\n  {:>2}. {} 🗓 {}  [{}]",
                    i + 1,
                    movie.title,
                    movie.year,
                    movie.id
                );
            }
            out
        }
    }
}

/// `None` when nothing is selected.
pub fn render_detail(view: &DetailView) -> Option<String> {
    let state = &view.state;
    let id = state.selected_id.as_deref()?;

    let body = match state.status {
        FetchStatus::Idle | FetchStatus::Loading => "Loading...".to_string(),
        FetchStatus::Error => error_line(state.error_message.as_deref()),
        FetchStatus::Success => {
            let Some(movie) = &state.detail else {
                return Some(format!("← {id}"));
            };
            let mut out = format!("← {}", movie.title);
            let released = movie
                .release_date
                .map(|d| d.format(RELEASED_FORMAT).to_string())
                .unwrap_or_else(|| "unknown release".into());
            let runtime = movie
                .runtime_minutes
                .map(|m| format!("{m} min"))
                .unwrap_or_else(|| "runtime n/a".into());
            let _ = write!(out, "\n  {released} • {runtime}");
            if let Some(genre) = &movie.genre {
                let _ = write!(out, "\n  {genre}");
            }
            match movie.imdb_rating {
                Some(r) => {
                    let _ = write!(out, "\n  ⭐️ {r} IMDb rating");
                }
                None => out.push_str("\n  ⭐️ not rated on IMDb"),
            }
            if let Some(plot) = &movie.plot {
                let _ = write!(out, "\n\n  {plot}");
            }
            if let Some(actors) = &movie.actors {
                let _ = write!(out, "\n  Starring {actors}");
            }
            if let Some(director) = &movie.director {
                let _ = write!(out, "\n  Directed by {director}");
            }
            if view.is_watched {
                out.push_str("\n  You already watched this movie.");
            } else {
                out.push_str("\n  Type `add <0-10>` to mark it as watched.");
            }
            out
        }
    };
    Some(body)
}

pub fn render_watchlist(view: &WatchlistView) -> String {
    let s = &view.summary;
    let mut out = format!(
        "MOVIES YOU WATCHED\n  #️⃣ {} movies  ⭐️ {:.2}  🌟 {:.2}  ⏳ {:.0} min",
        s.count, s.avg_imdb_rating, s.avg_user_rating, s.avg_runtime
    );
    for movie in &view.items {
        let _ = write!(
            out,
            "\n  {}  ⭐️ {}  🌟 {}  ⏳ {} min  [{}]",
            movie.title, movie.imdb_rating, movie.user_rating, movie.runtime_minutes, movie.id
        );
    }
    out
}

fn error_line(message: Option<&str>) -> String {
    format!("⛔️ {}", message.unwrap_or("Something went wrong"))
}

/// Print each snapshot as it changes until every sender is gone.
pub async fn render_loop(
    mut search: watch::Receiver<SearchState>,
    mut detail: watch::Receiver<DetailView>,
    mut watchlist: watch::Receiver<WatchlistView>,
) {
    loop {
        tokio::select! {
            changed = search.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", render_search(&search.borrow_and_update()));
            }
            changed = detail.changed() => {
                if changed.is_err() {
                    break;
                }
                match render_detail(&detail.borrow_and_update()) {
                    Some(text) => println!("{text}"),
                    None => println!("{}", render_watchlist(&watchlist.borrow())),
                }
            }
            changed = watchlist.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", render_watchlist(&watchlist.borrow_and_update()));
            }
        }
    }
}
