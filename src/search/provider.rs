//! Remote search provider.
//!
//! The engine treats the catalog as an opaque remote dependency behind
//! [`SearchProvider`]; the shipped implementation talks to the Jikan v4
//! REST API. Transport, rate limiting, and auth are the provider's concern.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::model::{AnimeRecord, SearchPage};

/// Public Jikan v4 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";

/// Timeout for catalog requests. Short enough that a stalled request
/// cannot hold a search session in the loading state for long.
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Failure modes of a catalog lookup.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API returned {0}")]
    Status(StatusCode),

    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A source of title-search results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Look up records matching `query`, at most `limit` of them.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<AnimeRecord>, ProviderError>;
}

/// [`SearchProvider`] backed by the Jikan REST API.
pub struct JikanProvider {
    client: Client,
    base_url: String,
}

impl JikanProvider {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at a different base URL (tests use a local stub).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(concat!("anirate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/anime?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        )
    }
}

#[async_trait]
impl SearchProvider for JikanProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<AnimeRecord>, ProviderError> {
        let url = self.search_url(query, limit);
        debug!(%url, "anime search request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;
        let page: SearchPage = serde_json::from_str(&body)?;
        debug!(results = page.data.len(), "anime search response");
        Ok(page.data)
    }
}
