use thiserror::Error;

/// Failures calling the model-serving endpoint.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode model response: {0}")]
    Decode(String),
}

/// Model content that was expected to be a JSON object but isn't.
#[derive(Debug, Error)]
#[error("model output is not valid {target}: {source}")]
pub struct ParseError {
    pub target: &'static str,
    #[source]
    pub source: serde_json::Error,
}
