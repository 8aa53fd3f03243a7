//! In-memory list of watched movies and its derived statistics.

use crate::error::CoreError;
use crate::models::watched::validate_user_rating;
use crate::models::{WatchedItem, WatchlistSummary};

/// Ordered collection of watched movies, unique by id.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    items: Vec<WatchedItem>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item`, keeping insertion order. An id already in the list is
    /// reported as a duplicate before the rating is looked at.
    pub fn add(&mut self, item: WatchedItem) -> Result<(), CoreError> {
        if self.contains(&item.id) {
            return Err(CoreError::Duplicate(item.id));
        }
        validate_user_rating(item.user_rating)?;
        tracing::debug!(id = %item.id, title = %item.title, "Added to watchlist");
        self.items.push(item);
        Ok(())
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::debug!(id, "Removed from watchlist");
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WatchedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatchedItem> {
        self.items.iter()
    }

    pub fn items(&self) -> &[WatchedItem] {
        &self.items
    }

    /// Mean IMDb rating; `0.0` when the list is empty.
    pub fn average_imdb_rating(&self) -> f64 {
        mean(self.items.iter().map(|item| f64::from(item.imdb_rating)))
    }

    /// Mean user rating; `0.0` when the list is empty.
    pub fn average_user_rating(&self) -> f64 {
        mean(self.items.iter().map(|item| f64::from(item.user_rating)))
    }

    /// Mean runtime in minutes; `0.0` when the list is empty.
    pub fn average_runtime(&self) -> f64 {
        mean(self.items.iter().map(|item| f64::from(item.runtime_minutes)))
    }

    pub fn summary(&self) -> WatchlistSummary {
        WatchlistSummary {
            count: self.len(),
            avg_imdb_rating: self.average_imdb_rating(),
            avg_user_rating: self.average_user_rating(),
            avg_runtime: self.average_runtime(),
        }
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, imdb: f32, user: f32, runtime: u32) -> WatchedItem {
        WatchedItem {
            id: id.into(),
            title: format!("Movie {id}"),
            poster: None,
            imdb_rating: imdb,
            user_rating: user,
            runtime_minutes: runtime,
        }
    }

    #[test]
    fn test_empty_averages_are_zero() {
        let list = Watchlist::new();
        assert_eq!(list.average_imdb_rating(), 0.0);
        assert_eq!(list.average_user_rating(), 0.0);
        assert_eq!(list.average_runtime(), 0.0);
        assert!(!list.average_imdb_rating().is_nan());
        assert_eq!(list.summary(), WatchlistSummary::default());
    }

    #[test]
    fn test_averages() {
        let mut list = Watchlist::new();
        list.add(item("tt0816692", 8.5, 9.0, 169)).unwrap();
        list.add(item("tt1375666", 8.5, 7.0, 148)).unwrap();

        assert_eq!(list.average_imdb_rating(), 8.5);
        assert_eq!(list.average_user_rating(), 8.0);
        assert_eq!(list.average_runtime(), 158.5);

        let summary = list.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_runtime, 158.5);
    }

    #[test]
    fn test_duplicate_add_fails() {
        let mut list = Watchlist::new();
        list.add(item("tt0816692", 8.7, 9.0, 169)).unwrap();
        let err = list.add(item("tt0816692", 8.7, 5.0, 169)).unwrap_err();
        assert!(matches!(err, CoreError::Duplicate(id) if id == "tt0816692"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("tt0816692").unwrap().user_rating, 9.0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = Watchlist::new();
        list.add(item("tt0816692", 8.7, 9.0, 169)).unwrap();
        assert!(!list.remove("tt0000000"));
        assert_eq!(list.len(), 1);

        assert!(list.remove("tt0816692"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut list = Watchlist::new();
        for id in ["c", "a", "b"] {
            list.add(item(id, 7.0, 7.0, 100)).unwrap();
        }
        list.remove("a");
        let ids: Vec<&str> = list.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["c", "b"]);
    }

    #[test]
    fn test_add_rejects_bad_rating() {
        let mut list = Watchlist::new();
        assert!(matches!(
            list.add(item("x", 7.0, 11.0, 90)),
            Err(CoreError::InvalidRating(_))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn test_duplicate_reported_before_bad_rating() {
        let mut list = Watchlist::new();
        list.add(item("tt0816692", 8.7, 9.0, 169)).unwrap();
        assert!(matches!(
            list.add(item("tt0816692", 8.7, 11.0, 169)),
            Err(CoreError::Duplicate(id)) if id == "tt0816692"
        ));
        assert_eq!(list.len(), 1);
    }
}
