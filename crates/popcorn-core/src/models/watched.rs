use serde::{Deserialize, Serialize};

use popcorn_api::MovieDetail;

use crate::error::CoreError;

/// Highest user rating accepted for a watched movie.
pub const MAX_USER_RATING: f32 = 10.0;

/// A movie the user has marked as watched, with their own rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedItem {
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
    pub imdb_rating: f32,
    pub user_rating: f32,
    pub runtime_minutes: u32,
}

impl WatchedItem {
    /// Build a watched entry from a loaded detail record.
    ///
    /// A missing IMDb rating or runtime counts as `0`.
    pub fn from_detail(detail: &MovieDetail, user_rating: f32) -> Result<Self, CoreError> {
        validate_user_rating(user_rating)?;
        Ok(Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            poster: detail.poster.clone(),
            imdb_rating: detail.imdb_rating.unwrap_or(0.0),
            user_rating,
            runtime_minutes: detail.runtime_minutes.unwrap_or(0),
        })
    }
}

pub fn validate_user_rating(rating: f32) -> Result<(), CoreError> {
    if (0.0..=MAX_USER_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::InvalidRating(rating))
    }
}

/// Aggregate numbers shown above the watched list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WatchlistSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> MovieDetail {
        MovieDetail {
            id: "tt0816692".into(),
            title: "Interstellar".into(),
            year: Some("2014".into()),
            poster: None,
            plot: None,
            release_date: None,
            runtime_minutes: None,
            genre: None,
            imdb_rating: Some(8.7),
            director: None,
            actors: None,
        }
    }

    #[test]
    fn test_from_detail_defaults_missing_numbers() {
        let item = WatchedItem::from_detail(&detail(), 9.0).unwrap();
        assert_eq!(item.id, "tt0816692");
        assert_eq!(item.imdb_rating, 8.7);
        assert_eq!(item.runtime_minutes, 0);
        assert_eq!(item.user_rating, 9.0);
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_user_rating(0.0).is_ok());
        assert!(validate_user_rating(10.0).is_ok());
        assert!(matches!(
            WatchedItem::from_detail(&detail(), 10.5),
            Err(CoreError::InvalidRating(_))
        ));
        assert!(validate_user_rating(-1.0).is_err());
        assert!(validate_user_rating(f32::NAN).is_err());
    }
}
