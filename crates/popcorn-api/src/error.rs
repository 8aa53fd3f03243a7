use thiserror::Error;

/// Errors from a metadata lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network failure, timeout, or a non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered but reported no matching record.
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("query must not be empty")]
    InvalidQuery,
}

impl FetchError {
    /// Message suitable for showing to the user in place of results.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Something went wrong with fetching movies".into(),
            Self::NotFound { message } if !message.trim().is_empty() => message.clone(),
            Self::NotFound { .. } => "Movie not found".into(),
            Self::Parse(_) => "The movie service sent a response we could not read".into(),
            Self::InvalidQuery => "Type a movie title to search".into(),
        }
    }
}

/// The request URL carries the API key, so it is stripped before the
/// error text is kept.
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url().to_string())
    }
}
