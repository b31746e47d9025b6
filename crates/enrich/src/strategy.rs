use async_trait::async_trait;
use extract::ExtractedData;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::EnrichError;
use crate::pipeline::{DEFAULT_QUERY_SUFFIX, EnrichmentPipeline};
use crate::records::{EntityRecord, EntityWithSearchResults, FlatRecord, SocialLinks};

/// Per-entity behaviour plugged into the batch driver.
#[async_trait]
pub trait EntityStrategy: Send + Sync {
    type Input: DeserializeOwned + Send + Sync;
    type Output: Serialize + Send + Sync;

    /// Short name used in logs and the batch summary.
    fn label(&self) -> &'static str;

    fn entity_name<'a>(&self, input: &'a Self::Input) -> &'a str;

    fn build_query(&self, entity_name: &str) -> String {
        format!("{}{}", entity_name, DEFAULT_QUERY_SUFFIX)
    }

    async fn process(
        &self,
        pipeline: &EnrichmentPipeline,
        input: &Self::Input,
    ) -> Result<Self::Output, EnrichError>;

    /// Recorded in place of the output when `process` fails.
    fn placeholder(&self, input: &Self::Input) -> Self::Output;

    /// Whether the output counts towards the "found" total.
    fn has_result(&self, output: &Self::Output) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Breeders,
    Brands,
}

impl EntityKind {
    /// Anything other than "breeders" is treated as brands.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("breeders") {
            EntityKind::Breeders
        } else {
            EntityKind::Brands
        }
    }

    pub fn query_suffix(&self) -> &'static str {
        match self {
            EntityKind::Breeders => " cannabis seeds official website",
            EntityKind::Brands => " cannabis grow official website",
        }
    }
}

/// Full search → fetch → extract, producing an [`EntityRecord`].
pub struct ProfileStrategy {
    pub kind: EntityKind,
    pub model_id: String,
}

#[async_trait]
impl EntityStrategy for ProfileStrategy {
    type Input = String;
    type Output = EntityRecord;

    fn label(&self) -> &'static str {
        "profile"
    }

    fn entity_name<'a>(&self, input: &'a String) -> &'a str {
        input
    }

    fn build_query(&self, entity_name: &str) -> String {
        format!("{}{}", entity_name, self.kind.query_suffix())
    }

    async fn process(
        &self,
        pipeline: &EnrichmentPipeline,
        name: &String,
    ) -> Result<EntityRecord, EnrichError> {
        let query = self.build_query(name);
        let outcome = pipeline
            .enrich_with_query(&self.model_id, name, &query)
            .await?;

        if !outcome.found() {
            return Ok(EntityRecord::named(name.as_str()));
        }

        let data = ExtractedData::parse(&outcome.content)?;
        debug!(
            entity = name.as_str(),
            social_links = data.social_media.len(),
            elapsed_ms = (outcome.duration * 1000.0) as u64,
            "Parsed company data"
        );

        Ok(EntityRecord {
            name: name.clone(),
            extracted_data: Some(data),
        })
    }

    fn placeholder(&self, name: &String) -> EntityRecord {
        EntityRecord::named(name.as_str())
    }

    fn has_result(&self, record: &EntityRecord) -> bool {
        record.extracted_data.is_some()
    }
}

/// Search suffix for a product category; unknown categories get a generic suffix.
pub fn category_query_suffix(category: &str) -> &'static str {
    match category {
        "accessories" => " cannabis cultivation accessories official website",
        "environment" => " cannabis cultivation environment control official website",
        "lighting" => " cannabis grow lighting official website",
        "media_and_containers" => " cannabis growing media containers official website",
        "plant_nutrition_and_health" => " cannabis plant nutrients official website",
        "propagation" => " cannabis propagation cloning official website",
        "water_and_hydroponics" => " cannabis hydroponics watering systems official website",
        "breeders" => " cannabis breeder",
        _ => " cannabis cultivation official website",
    }
}

/// Search only; keeps the whole result list for later flattening.
pub struct SearchOnlyStrategy {
    pub category: String,
}

#[async_trait]
impl EntityStrategy for SearchOnlyStrategy {
    type Input = String;
    type Output = EntityWithSearchResults;

    fn label(&self) -> &'static str {
        "search"
    }

    fn entity_name<'a>(&self, input: &'a String) -> &'a str {
        input
    }

    fn build_query(&self, entity_name: &str) -> String {
        format!("{}{}", entity_name, category_query_suffix(&self.category))
    }

    async fn process(
        &self,
        pipeline: &EnrichmentPipeline,
        name: &String,
    ) -> Result<EntityWithSearchResults, EnrichError> {
        let search_results = pipeline.search(&self.build_query(name)).await?;

        Ok(EntityWithSearchResults {
            name: name.clone(),
            search_results,
        })
    }

    fn placeholder(&self, name: &String) -> EntityWithSearchResults {
        EntityWithSearchResults {
            name: name.clone(),
            search_results: Vec::new(),
        }
    }

    fn has_result(&self, output: &EntityWithSearchResults) -> bool {
        !output.search_results.is_empty()
    }
}

/// Visit each record's link and fill `socialMediaLinks` with what the model finds there.
pub struct SocialLinksStrategy {
    pub model_id: String,
}

#[async_trait]
impl EntityStrategy for SocialLinksStrategy {
    type Input = FlatRecord;
    type Output = FlatRecord;

    fn label(&self) -> &'static str {
        "social"
    }

    fn entity_name<'a>(&self, input: &'a FlatRecord) -> &'a str {
        &input.name
    }

    async fn process(
        &self,
        pipeline: &EnrichmentPipeline,
        record: &FlatRecord,
    ) -> Result<FlatRecord, EnrichError> {
        if !record.has_link() {
            debug!(entity = record.name.as_str(), "No link, passing record through");
            return Ok(record.clone());
        }

        let links = pipeline
            .extract_social_links(&self.model_id, &record.link)
            .await?;

        Ok(FlatRecord {
            social_media_links: SocialLinks::Raw(links),
            ..record.clone()
        })
    }

    fn placeholder(&self, record: &FlatRecord) -> FlatRecord {
        record.clone()
    }

    fn has_result(&self, record: &FlatRecord) -> bool {
        !record.social_media_links.is_empty()
    }
}
