use popcorn_api::{FetchError, MovieDetail, SearchResultItem};
use popcorn_core::request::RequestToken;

/// The outcome of a fetch, tagged with the token it was issued under.
#[derive(Debug)]
pub enum Completion {
    Search {
        token: RequestToken,
        result: Result<Vec<SearchResultItem>, FetchError>,
    },
    Detail {
        token: RequestToken,
        result: Result<MovieDetail, FetchError>,
    },
}

impl Completion {
    pub fn token(&self) -> RequestToken {
        match self {
            Self::Search { token, .. } | Self::Detail { token, .. } => *token,
        }
    }
}
