use crawl::{PageSource, SearchResult, WebSearch, social_excerpt};
use extract::Extractor;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::EnrichError;

/// Content returned when the search turns up nothing to fetch.
pub const NO_RESULTS: &str = "No results found";

pub const DEFAULT_QUERY_SUFFIX: &str = " Official Website";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichOutcome {
    /// Raw model output, or [`NO_RESULTS`]
    pub content: String,
    /// Seconds from pipeline start, covering search, fetch and model
    pub duration: f64,
}

impl EnrichOutcome {
    pub fn found(&self) -> bool {
        self.content != NO_RESULTS
    }
}

/// Search → fetch → extract for one entity at a time.
pub struct EnrichmentPipeline {
    search: Box<dyn WebSearch>,
    fetcher: Box<dyn PageSource>,
    extractor: Extractor,
}

impl EnrichmentPipeline {
    pub fn new(
        search: Box<dyn WebSearch>,
        fetcher: Box<dyn PageSource>,
        extractor: Extractor,
    ) -> Self {
        Self {
            search,
            fetcher,
            extractor,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, EnrichError> {
        Ok(self.search.search(query).await?)
    }

    /// Enrich `entity_name` using the default "<name> Official Website" query.
    pub async fn enrich(
        &self,
        model_id: &str,
        entity_name: &str,
    ) -> Result<EnrichOutcome, EnrichError> {
        let query = format!("{}{}", entity_name, DEFAULT_QUERY_SUFFIX);
        self.enrich_with_query(model_id, entity_name, &query).await
    }

    pub async fn enrich_with_query(
        &self,
        model_id: &str,
        entity_name: &str,
        query: &str,
    ) -> Result<EnrichOutcome, EnrichError> {
        let start = Instant::now();

        // Step 1: Find the official site
        let results = self.search.search(query).await?;
        let Some(link) = results.first().and_then(|r| r.link.as_deref()) else {
            info!(entity = entity_name, query, "No usable search result");
            return Ok(EnrichOutcome {
                content: NO_RESULTS.to_string(),
                duration: start.elapsed().as_secs_f64(),
            });
        };
        info!(entity = entity_name, top_result = link, "Completed search");

        // Step 2: Fetch the top result
        let html = self.fetcher.fetch_page(link, true).await?;
        debug!(entity = entity_name, bytes = html.len(), "Completed page fetch");

        // Step 3: Ask the model
        let response = self
            .extractor
            .extract_company(model_id, entity_name, &html)
            .await?;
        info!(
            entity = entity_name,
            model_secs = response.duration,
            "Model response generated"
        );

        Ok(EnrichOutcome {
            content: response.content,
            duration: start.elapsed().as_secs_f64(),
        })
    }

    /// Fetch `url` and ask the model which social profiles it links to. Returns a
    /// comma-joined list of social URLs, empty when none were found.
    pub async fn extract_social_links(
        &self,
        model_id: &str,
        url: &str,
    ) -> Result<String, EnrichError> {
        let html = self.fetcher.fetch_page(url, true).await?;
        let excerpt = social_excerpt(&html);
        info!(
            url,
            excerpt_chars = excerpt.chars().count(),
            page_bytes = html.len(),
            "Sending social excerpt to model"
        );

        Ok(self.extractor.find_social_links(model_id, &excerpt).await?)
    }
}
