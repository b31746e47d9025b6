use crawl::SearchResult;
use extract::{ExtractedData, Platform, SocialLabel};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One enriched entity as written by the profile batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<ExtractedData>,
}

impl EntityRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extracted_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityWithSearchResults {
    pub name: String,
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
}

/// Single-result summary of an entity; the social link stages read and write this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRecord {
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub social_media_links: SocialLinks,
    /// Fields added by hand or by other tools, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlatRecord {
    pub fn has_link(&self) -> bool {
        !self.link.trim().is_empty()
    }
}

/// The social link field moves through three shapes: the comma-joined string the model
/// produces, then one of the two normalized forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SocialLinks {
    Raw(String),
    Labeled(Vec<SocialLabel>),
    ByPlatform(IndexMap<Platform, Vec<String>>),
    Other(Value),
}

impl Default for SocialLinks {
    fn default() -> Self {
        SocialLinks::Raw(String::new())
    }
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        match self {
            SocialLinks::Raw(raw) => raw.trim().is_empty(),
            SocialLinks::Labeled(labels) => labels.is_empty(),
            SocialLinks::ByPlatform(map) => map.is_empty(),
            SocialLinks::Other(value) => value.is_null(),
        }
    }
}
