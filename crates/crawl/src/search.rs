use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::SearchError;

/// One ranked hit from the search backend. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl SearchResult {
    pub fn with_link(link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Run a query. Zero matches is an empty list, not an error.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Custom Search JSON API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key sent as `key`
    #[serde(default)]
    pub api_key: String,
    /// Search engine (scope) identifier sent as `cx`
    #[serde(default)]
    pub engine_id: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            engine_id: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("engine_id", &self.engine_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SearchConfig {
    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    ///
    /// Recognized keys: `SEARCH_ENDPOINT`, `SEARCH_API_KEY`, `SEARCH_ENGINE_ID`,
    /// `SEARCH_TIMEOUT_SECS`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("SEARCH_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(key) = lookup("SEARCH_API_KEY") {
            self.api_key = key;
        }
        if let Some(cx) = lookup("SEARCH_ENGINE_ID") {
            self.engine_id = cx;
        }
        if let Some(raw) = lookup("SEARCH_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring invalid SEARCH_TIMEOUT_SECS"),
            }
        }
        self
    }
}

#[derive(Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(Deserialize)]
struct CustomSearchItem {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

/// Google Custom Search JSON API client.
pub struct GoogleSearchClient {
    config: SearchConfig,
    client: reqwest::Client,
}

impl GoogleSearchClient {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl WebSearch for GoogleSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        if self.config.api_key.is_empty() {
            return Err(SearchError::NotConfigured("api key"));
        }
        if self.config.engine_id.is_empty() {
            return Err(SearchError::NotConfigured("search engine id"));
        }

        debug!(query, "Custom search request");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: CustomSearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))?;

        let results: Vec<SearchResult> = parsed
            .items
            .into_iter()
            .map(|item| SearchResult {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
            })
            .collect();

        info!(query, count = results.len(), "Custom search complete");
        Ok(results)
    }
}
