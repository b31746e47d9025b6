use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::scrub::scrub_html;

#[async_trait]
pub trait PageSource: Send + Sync {
    /// GET `url` and return its text, scrubbed of non-content markup when `scrub` is set.
    async fn fetch_page(&self, url: &str, scrub: bool) -> Result<String, FetchError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("scout/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Recognized keys: `FETCH_TIMEOUT_SECS`, `FETCH_USER_AGENT`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("FETCH_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring invalid FETCH_TIMEOUT_SECS"),
            }
        }
        if let Some(agent) = lookup("FETCH_USER_AGENT") {
            self.user_agent = agent;
        }
        self
    }
}

/// Plain reqwest fetcher. Each request is bounded by the configured timeout.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

/// Missing content types are accepted; so is anything text-like.
fn is_textual(content_type: &str) -> bool {
    let mime = content_type.to_ascii_lowercase();
    mime.starts_with("text/")
        || mime.contains("html")
        || mime.contains("xml")
        || mime.contains("json")
}

#[async_trait]
impl PageSource for HttpPageFetcher {
    async fn fetch_page(&self, url: &str, scrub: bool) -> Result<String, FetchError> {
        debug!(url, scrub, "Fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Page returned non-success status");
        }

        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_textual(content_type) {
                return Err(FetchError::NotText {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        debug!(url, bytes = body.len(), "Fetched page");

        Ok(if scrub { scrub_html(&body) } else { body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = "<html><head><script>track()</script></head><body>Bodhi</body></html>";

    async fn serve(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    fn fetcher(timeout_secs: u64) -> HttpPageFetcher {
        HttpPageFetcher::new(&FetchConfig {
            timeout_secs,
            ..FetchConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_scrubs_when_asked() {
        let server = serve(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(PAGE),
        )
        .await;

        let url = format!("{}/", server.uri());
        let raw = fetcher(5).fetch_page(&url, false).await.unwrap();
        let clean = fetcher(5).fetch_page(&url, true).await.unwrap();

        assert_eq!(raw, PAGE);
        assert_eq!(clean, "<html><head> </head><body>Bodhi</body></html>");
    }

    #[tokio::test]
    async fn test_non_success_status_still_returns_body() {
        let server = serve(
            ResponseTemplate::new(404)
                .insert_header("content-type", "text/html")
                .set_body_string("<p>Not here</p>"),
        )
        .await;

        let body = fetcher(5)
            .fetch_page(&format!("{}/", server.uri()), true)
            .await
            .unwrap();
        assert_eq!(body, "<p>Not here</p>");
    }

    #[tokio::test]
    async fn test_binary_content_is_rejected() {
        let server = serve(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]),
        )
        .await;

        let err = fetcher(5)
            .fetch_page(&format!("{}/", server.uri()), false)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotText { .. }));
    }

    #[tokio::test]
    async fn test_slow_page_times_out() {
        let server = serve(
            ResponseTemplate::new(200)
                .set_body_string(PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let err = fetcher(1)
            .fetch_page(&format!("{}/", server.uri()), false)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }), "got {err}");
    }

    #[test]
    fn test_textual_content_types() {
        assert!(is_textual("text/html; charset=UTF-8"));
        assert!(is_textual("application/xhtml+xml"));
        assert!(is_textual("application/json"));
        assert!(!is_textual("application/pdf"));
        assert!(!is_textual("image/jpeg"));
    }
}
