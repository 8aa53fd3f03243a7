use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} is already in the watchlist")]
    Duplicate(String),

    #[error("user rating must be between 0 and 10, got {0}")]
    InvalidRating(f32),

    #[error("no movie is selected")]
    NothingSelected,

    #[error("movie details have not finished loading")]
    DetailNotLoaded,

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
