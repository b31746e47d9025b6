use crawl::{FetchError, SearchError};
use extract::{ModelError, ParseError};
use thiserror::Error;

/// Anything that can abort the processing of a single entity.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
