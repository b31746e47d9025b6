use anyhow::{Context, Result};
use crawl::{GoogleSearchClient, HttpPageFetcher};
use enrich::{
    BatchDriver, BatchSummary, EntityKind, EnrichmentPipeline, ProfileStrategy,
    SearchOnlyStrategy, SocialLinksStrategy,
};
use extract::{ExtractedData, Extractor, OllamaClient};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use transform::SocialFormat;

use crate::config::AppConfig;

fn build_pipeline(config: &AppConfig) -> Result<EnrichmentPipeline> {
    let search = GoogleSearchClient::new(config.search.clone())
        .context("Failed to create search client")?;
    let fetcher = HttpPageFetcher::new(&config.fetch).context("Failed to create page fetcher")?;
    let model = OllamaClient::new(&config.model).context("Failed to create model client")?;
    let extractor = Extractor::from_config(Box::new(model), &config.model);

    Ok(EnrichmentPipeline::new(
        Box::new(search),
        Box::new(fetcher),
        extractor,
    ))
}

/// Pause between websites when looking for social links.
const SOCIAL_DELAY: Duration = Duration::from_millis(2000);

/// The `--delay-ms` flag, then the configured delay, then the command's default.
fn delay(config: &AppConfig, override_ms: Option<u64>, default: Duration) -> Duration {
    override_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.batch.delay_or(default))
}

/// What `single` prints: the name with the extracted fields beside it.
#[derive(Debug, Serialize)]
struct SingleProfile<'a> {
    name: &'a str,
    #[serde(flatten)]
    data: ExtractedData,
}

fn print_summary(summary: &BatchSummary, what: &str, output: &Path) {
    println!(
        "Found {} for {}/{} entities ({} failed) in {:.1}s.",
        what, summary.with_results, summary.entities, summary.failed, summary.total_secs
    );
    println!("Results saved to {:?}", output);
}

pub async fn single(config: &AppConfig, name: &str, model: Option<String>) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let model = model.unwrap_or_else(|| config.model.model.clone());

    let outcome = pipeline.enrich(&model, name).await?;
    println!("Processed {} in {:.2} seconds.", name, outcome.duration);

    if !outcome.found() {
        println!("{}", outcome.content);
        return Ok(());
    }

    let profile = SingleProfile {
        name,
        data: ExtractedData::parse(&outcome.content)?,
    };
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub async fn enrich(
    config: &AppConfig,
    input: &Path,
    kind: &str,
    output: &Path,
    model: Option<String>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let strategy = ProfileStrategy {
        kind: EntityKind::from_name(kind),
        model_id: model.unwrap_or_else(|| config.model.model.clone()),
    };
    info!(kind = ?strategy.kind, model = strategy.model_id.as_str(), "Collecting company data");

    let summary = BatchDriver::new(&pipeline, delay(config, delay_ms, Duration::ZERO))
        .run_file(&strategy, input, output)
        .await?;
    print_summary(&summary, "company data", output);
    Ok(())
}

pub async fn search(
    config: &AppConfig,
    input: &Path,
    category: &str,
    output: &Path,
    delay_ms: Option<u64>,
) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let strategy = SearchOnlyStrategy {
        category: category.to_string(),
    };

    let summary = BatchDriver::new(&pipeline, delay(config, delay_ms, Duration::ZERO))
        .run_file(&strategy, input, output)
        .await?;
    print_summary(&summary, "search results", output);
    Ok(())
}

pub async fn flatten(input: &Path, output: &Path) -> Result<()> {
    let count = transform::flatten_file(input, output).await?;
    println!("Transformed {} entities. Results saved to {:?}", count, output);
    Ok(())
}

pub async fn social(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    model: Option<String>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let strategy = SocialLinksStrategy {
        model_id: model.unwrap_or_else(|| config.model.social_model.clone()),
    };

    let summary = BatchDriver::new(&pipeline, delay(config, delay_ms, SOCIAL_DELAY))
        .run_file(&strategy, input, output)
        .await?;
    print_summary(&summary, "social media links", output);
    Ok(())
}

pub async fn normalize_social(input: &Path, output: &Path, format: SocialFormat) -> Result<()> {
    let changed = transform::normalize_file(input, output, format).await?;
    println!("Normalized {} records. Results saved to {:?}", changed, output);
    Ok(())
}

pub async fn batch_categories(input: &Path, out_dir: &Path, batch_size: usize) -> Result<()> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .context(format!("Failed to create {:?}", out_dir))?;

    let summaries = transform::batch_categories_file(input, out_dir, batch_size).await?;
    for summary in &summaries {
        println!(
            "- {}: {} brands in {} batches",
            summary.category,
            summary.total_brands,
            summary.batches.len()
        );
    }
    println!("Batch files written to {:?}", out_dir);
    Ok(())
}
