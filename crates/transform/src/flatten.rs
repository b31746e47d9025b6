use anyhow::Result;
use crawl::JsonFile;
use enrich::{EntityWithSearchResults, FlatRecord, SocialLinks};
use serde_json::Map;
use std::path::Path;
use tracing::info;

/// Keep only the first search result of each entity.
pub fn flatten_results(entities: &[EntityWithSearchResults]) -> Vec<FlatRecord> {
    entities
        .iter()
        .map(|entity| {
            let top = entity.search_results.first();
            FlatRecord {
                name: entity.name.clone(),
                link: top.and_then(|r| r.link.clone()).unwrap_or_default(),
                snippet: top.and_then(|r| r.snippet.clone()).unwrap_or_default(),
                location: String::new(),
                social_media_links: SocialLinks::default(),
                extra: Map::new(),
            }
        })
        .collect()
}

pub async fn flatten_file(input: &Path, output: &Path) -> Result<usize> {
    let entities: Vec<EntityWithSearchResults> = JsonFile::read(input).await?;
    let flat = flatten_results(&entities);
    JsonFile::write(output, &flat).await?;

    info!(count = flat.len(), output = ?output, "Flattened search results");
    Ok(flat.len())
}
