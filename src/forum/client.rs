//! Forum API client

use super::types::{Category, CategoryQuery, PostQuery};
use crate::auth::AuthConfig;
use crate::config::ApiConfig;
use crate::decode::decoder_for;
use crate::engine::{FetchOutcome, ListingFetcher};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{LIMIT_PARAM, OUTPUT_PARAM};
use serde_json::Value;
use tracing::{info, warn};

/// Client for one forum's REST API
#[derive(Debug)]
pub struct ForumClient {
    fetcher: ListingFetcher,
    base_url: String,
}

impl ForumClient {
    /// Connect to `https://<host>/api/<version>` with the configured token
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        Self::with_base_url(AuthConfig::from(config), base_url.as_str())
    }

    /// Connect to an explicit base URL (a proxy, a mock server)
    pub fn with_base_url(auth: AuthConfig, base_url: &str) -> Result<Self> {
        let http_config = HttpClientConfig::builder().base_url(base_url).build();
        let client = HttpClient::with_auth(http_config, auth)?;

        Ok(Self {
            fetcher: ListingFetcher::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL every endpoint is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List categories, all pages
    pub async fn list_categories(&self, query: &CategoryQuery) -> Result<FetchOutcome> {
        info!("Making request to: {}/categories", self.base_url);
        let decoder = decoder_for(query.format, Some("categories"));
        let outcome = self
            .fetcher
            .fetch_all(&query.to_listing(), query.page_size, decoder.as_ref())
            .await?;

        if outcome.is_complete() && outcome.records().is_empty() {
            warn!("No categories found in response");
        }
        Ok(outcome)
    }

    /// List categories and read them into [`Category`] values
    pub async fn categories(&self, query: &CategoryQuery) -> Result<(Vec<Category>, Option<Error>)> {
        let (records, cause) = self.list_categories(query).await?.into_parts();
        Ok((records.iter().map(Category::from_record).collect(), cause))
    }

    /// List posts, all pages
    pub async fn list_posts(&self, query: &PostQuery) -> Result<FetchOutcome> {
        let decoder = decoder_for(query.format, Some("posts"));
        self.fetcher
            .fetch_all(&query.to_listing(), query.page_size, decoder.as_ref())
            .await
    }

    /// Fetch a single post as JSON to prove the token and host work
    pub async fn check_connection(&self) -> Result<Value> {
        let config = RequestConfig::new()
            .query(LIMIT_PARAM, "1")
            .query(OUTPUT_PARAM, "json");
        let body = self.fetcher.client().get_text("posts", config).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
