use anyhow::Result;
use crawl::JsonFile;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const SORTED_FILE_NAME: &str = "brands_sorted_by_category.json";

/// `category → brands`, categories in the order first seen.
pub type CategoryIndex = IndexMap<String, Vec<String>>;

/// Turn `brand → [category]` into `category → sorted, de-duplicated brands`.
pub fn invert_categories(brand_categories: &IndexMap<String, Vec<String>>) -> CategoryIndex {
    let mut by_category = CategoryIndex::new();
    for (brand, categories) in brand_categories {
        for category in categories {
            by_category
                .entry(category.clone())
                .or_default()
                .push(brand.clone());
        }
    }

    for brands in by_category.values_mut() {
        brands.sort();
        brands.dedup();
    }
    by_category
}

/// File-name stem for a category: non-alphanumerics become `_`, all lowercase.
pub fn safe_name(category: &str) -> String {
    category
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFile {
    pub filename: String,
    pub count: usize,
    /// 1-based inclusive range, e.g. "51-100"
    pub range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub total_brands: usize,
    pub batches: Vec<BatchFile>,
}

/// One chunk of a category ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedBatch<'a> {
    pub file: BatchFile,
    pub brands: &'a [String],
}

pub fn plan_batches<'a>(category: &str, brands: &'a [String], batch_size: usize) -> Vec<PlannedBatch<'a>> {
    let safe = safe_name(category);
    brands
        .chunks(batch_size.max(1))
        .enumerate()
        .map(|(i, chunk)| {
            let start = i * batch_size.max(1) + 1;
            let end = start + chunk.len() - 1;
            PlannedBatch {
                file: BatchFile {
                    filename: format!("{}_batch{}_{}-{}.json", safe, i + 1, start, end),
                    count: chunk.len(),
                    range: format!("{}-{}", start, end),
                },
                brands: chunk,
            }
        })
        .collect()
}

/// Write the sorted index, every batch file and one summary per category into `out_dir`.
pub async fn write_category_batches(
    brand_categories: &IndexMap<String, Vec<String>>,
    out_dir: &Path,
    batch_size: usize,
) -> Result<Vec<CategorySummary>> {
    let by_category = invert_categories(brand_categories);
    for (category, brands) in &by_category {
        info!(category = category.as_str(), brands = brands.len(), "Category found");
    }
    JsonFile::write(&out_dir.join(SORTED_FILE_NAME), &by_category).await?;

    let mut summaries = Vec::with_capacity(by_category.len());
    for (category, brands) in &by_category {
        let planned = plan_batches(category, brands, batch_size);

        for batch in &planned {
            JsonFile::write(&out_dir.join(&batch.file.filename), batch.brands).await?;
            info!(file = batch.file.filename.as_str(), count = batch.file.count, "Batch written");
        }

        let summary = CategorySummary {
            category: category.clone(),
            total_brands: brands.len(),
            batches: planned.into_iter().map(|b| b.file).collect(),
        };
        JsonFile::write(&summary_path(out_dir, category), &summary).await?;
        summaries.push(summary);
    }

    Ok(summaries)
}

pub async fn batch_categories_file(
    input: &Path,
    out_dir: &Path,
    batch_size: usize,
) -> Result<Vec<CategorySummary>> {
    let brand_categories: IndexMap<String, Vec<String>> = JsonFile::read(input).await?;
    write_category_batches(&brand_categories, out_dir, batch_size).await
}

fn summary_path(out_dir: &Path, category: &str) -> PathBuf {
    out_dir.join(format!("{}_batch_summary.json", safe_name(category)))
}
