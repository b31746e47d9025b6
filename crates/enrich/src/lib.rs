pub mod batch;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod records;
pub mod strategy;

#[cfg(test)]
mod testing;

pub use batch::{BatchConfig, BatchDriver};
pub use error::EnrichError;
pub use metrics::{BatchMetrics, BatchSummary};
pub use pipeline::{DEFAULT_QUERY_SUFFIX, EnrichOutcome, EnrichmentPipeline, NO_RESULTS};
pub use records::{EntityRecord, EntityWithSearchResults, FlatRecord, SocialLinks};
pub use strategy::{
    EntityKind, EntityStrategy, ProfileStrategy, SearchOnlyStrategy, SocialLinksStrategy,
    category_query_suffix,
};
