//! Web-facing building blocks: search, page fetching, markup scrubbing, and the JSON
//! files that carry results between stages.

pub mod error;
pub mod excerpt;
pub mod fetch;
pub mod json_file;
pub mod scrub;
pub mod search;

pub use error::{FetchError, SearchError};
pub use excerpt::{SOCIAL_EXCERPT_CHARS, social_excerpt, truncate_chars};
pub use fetch::{FetchConfig, HttpPageFetcher, PageSource};
pub use json_file::JsonFile;
pub use scrub::scrub_html;
pub use search::{GoogleSearchClient, SearchConfig, SearchResult, WebSearch};
