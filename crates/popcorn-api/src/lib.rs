//! Client side of the movie metadata service.
//!
//! [`traits::MovieService`] is the seam the controllers and the runtime are
//! written against; [`omdb::OmdbClient`] is the HTTP implementation.

pub mod error;
pub mod omdb;
pub mod traits;

pub use error::FetchError;
pub use traits::{MovieDetail, MovieService, SearchResultItem};
