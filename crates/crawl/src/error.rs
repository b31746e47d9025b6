use thiserror::Error;

/// Failures talking to the web search backend.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Credential or scope identifier was never configured
    #[error("search is not configured: missing {0}")]
    NotConfigured(&'static str),

    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("search API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode search response: {0}")]
    Decode(String),
}

/// Failures fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned non-text content ({content_type})")]
    NotText { url: String, content_type: String },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source,
            }
        }
    }
}
