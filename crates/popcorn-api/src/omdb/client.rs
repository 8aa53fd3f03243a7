use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::types::{parse_detail_body, parse_search_body};
use crate::error::FetchError;
use crate::traits::{MovieDetail, MovieService, SearchResultItem};

/// Connection settings for an OMDb-compatible endpoint.
///
/// Built once at startup from configuration and handed to
/// [`OmdbClient::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: Url,
    pub api_key: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// OMDb HTTP client.
pub struct OmdbClient {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl OmdbClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, FetchError> {
        let mut builder =
            Client::builder().user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            http,
        })
    }

    /// Check the HTTP response for errors.
    async fn check_response(
        operation: &str,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, FetchError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(operation, status, "OMDb API error");
            Err(FetchError::Transport(format!("HTTP {status}: {body}")))
        }
    }

    /// Issue one GET against the endpoint and return the raw body.
    async fn get(&self, operation: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        tracing::debug!(operation, "OMDb request");

        let resp = self
            .http
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let resp = Self::check_response(operation, resp).await?;
        let body = resp.text().await?;
        tracing::debug!(operation, bytes = body.len(), "OMDb response received");
        Ok(body)
    }
}

impl MovieService for OmdbClient {
    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchResultItem>, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::InvalidQuery);
        }

        let body = self.get("search", &[("s", query)]).await?;
        parse_search_body(&body)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<MovieDetail, FetchError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(FetchError::InvalidQuery);
        }

        let body = self.get("detail", &[("i", id), ("plot", "full")]).await?;
        parse_detail_body(&body)
    }
}
