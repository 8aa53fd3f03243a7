use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::FetchError;
use crate::traits::{MovieDetail, SearchResultItem};

/// Date format of the `Released` field, e.g. `07 Nov 2014`.
const RELEASED_FORMAT: &str = "%d %b %Y";

// ── Envelope ────────────────────────────────────────────────────

/// Fields present on every OMDb response.
///
/// `Response` is the string `"True"` or `"False"`; on `"False"` the record
/// fields are absent and `Error` explains why.
#[derive(Debug, Deserialize)]
pub struct OmdbEnvelope {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbEnvelope {
    fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

// ── Search / detail responses ───────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search")]
    pub search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults")]
    #[allow(dead_code)]
    pub total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub poster: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: Option<String>,
    pub poster: Option<String>,
    pub plot: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
}

// ── Conversions to shared trait types ───────────────────────────

impl OmdbSearchItem {
    pub fn into_search_result(self) -> SearchResultItem {
        SearchResultItem {
            id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster_url: self.poster,
        }
    }
}

impl OmdbMovie {
    pub fn into_detail(self) -> MovieDetail {
        MovieDetail {
            id: self.imdb_id,
            title: self.title,
            year: available(self.year),
            poster: available(self.poster),
            plot: available(self.plot),
            release_date: available(self.released).and_then(|s| parse_released(&s)),
            runtime_minutes: available(self.runtime).and_then(|s| parse_runtime(&s)),
            genre: available(self.genre),
            imdb_rating: available(self.imdb_rating).and_then(|s| s.trim().parse().ok()),
            director: available(self.director),
            actors: available(self.actors),
        }
    }
}

/// OMDb fills unknown fields with the literal `N/A`.
fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !v.eq_ignore_ascii_case("n/a")
    })
}

/// Parse a runtime like `169 min` into minutes.
pub fn parse_runtime(raw: &str) -> Option<u32> {
    raw.split_whitespace().next()?.parse().ok()
}

pub fn parse_released(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), RELEASED_FORMAT).ok()
}

// ── Body decoding ───────────────────────────────────────────────

/// Read the envelope first so a `"False"` response is reported as
/// `NotFound` even though it lacks the record fields.
fn check_envelope(body: &str) -> Result<(), FetchError> {
    let envelope: OmdbEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    if envelope.is_success() {
        Ok(())
    } else {
        Err(FetchError::NotFound {
            message: envelope.error.unwrap_or_default(),
        })
    }
}

/// Decode a title search response body.
pub fn parse_search_body(body: &str) -> Result<Vec<SearchResultItem>, FetchError> {
    check_envelope(body)?;
    let resp: OmdbSearchResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    Ok(resp
        .search
        .into_iter()
        .map(OmdbSearchItem::into_search_result)
        .collect())
}

/// Decode a by-id lookup response body.
pub fn parse_detail_body(body: &str) -> Result<MovieDetail, FetchError> {
    check_envelope(body)?;
    let movie: OmdbMovie =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    Ok(movie.into_detail())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "Search": [
                {"Title": "Interstellar", "Year": "2014", "imdbID": "tt0816692", "Type": "movie",
                 "Poster": "https://m.media-amazon.com/images/M/interstellar.jpg"},
                {"Title": "Interstellar Wars", "Year": "2016", "imdbID": "tt5083736", "Type": "movie",
                 "Poster": "N/A"},
                {"Title": "The Science of Interstellar", "Year": "2015", "imdbID": "tt4415360",
                 "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "3",
            "Response": "True"
        }"#;

        let results = parse_search_body(json).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, "tt0816692");
        assert_eq!(results[0].title, "Interstellar");
        assert_eq!(results[0].year, "2014");
        assert_eq!(results[1].poster_url, "N/A");
    }

    #[test]
    fn test_response_false_is_not_found() {
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let err = parse_search_body(json).unwrap_err();
        assert_eq!(
            err,
            FetchError::NotFound {
                message: "Movie not found!".into()
            }
        );

        let err = parse_detail_body(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#)
            .unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        assert!(matches!(
            parse_search_body("<html>Bad gateway</html>"),
            Err(FetchError::Parse(_))
        ));
        // Successful envelope but no Search array.
        assert!(matches!(
            parse_search_body(r#"{"Response":"True"}"#),
            Err(FetchError::Parse(_))
        ));
        // No envelope at all.
        assert!(matches!(
            parse_detail_body(r#"{"Title":"Interstellar"}"#),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_detail_response() {
        let json = r#"{
            "Title": "Interstellar",
            "Year": "2014",
            "Rated": "PG-13",
            "Released": "07 Nov 2014",
            "Runtime": "169 min",
            "Genre": "Adventure, Drama, Sci-Fi",
            "Director": "Christopher Nolan",
            "Actors": "Matthew McConaughey, Anne Hathaway, Jessica Chastain",
            "Plot": "When Earth becomes uninhabitable in the future...",
            "Poster": "https://m.media-amazon.com/images/M/interstellar.jpg",
            "imdbRating": "8.7",
            "imdbID": "tt0816692",
            "Type": "movie",
            "Response": "True"
        }"#;

        let detail = parse_detail_body(json).unwrap();
        assert_eq!(detail.id, "tt0816692");
        assert_eq!(detail.runtime_minutes, Some(169));
        assert_eq!(detail.imdb_rating, Some(8.7));
        assert_eq!(
            detail.release_date,
            NaiveDate::from_ymd_opt(2014, 11, 7)
        );
        assert_eq!(detail.director.as_deref(), Some("Christopher Nolan"));
    }

    #[test]
    fn test_detail_unavailable_fields() {
        let json = r#"{
            "Title": "Obscure Short",
            "imdbID": "tt0000001",
            "Released": "N/A",
            "Runtime": "N/A",
            "imdbRating": "N/A",
            "Poster": "N/A",
            "Response": "True"
        }"#;

        let detail = parse_detail_body(json).unwrap();
        assert!(detail.release_date.is_none());
        assert!(detail.runtime_minutes.is_none());
        assert!(detail.imdb_rating.is_none());
        assert!(detail.poster.is_none());
        assert!(detail.plot.is_none());
    }

    #[test]
    fn test_parse_runtime_variants() {
        assert_eq!(parse_runtime("90 min"), Some(90));
        assert_eq!(parse_runtime(" 7 min"), Some(7));
        assert_eq!(parse_runtime("min"), None);
        assert_eq!(parse_runtime(""), None);
    }
}
