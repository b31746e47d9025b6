use anyhow::{Context, Result};
use clap::Parser;
use crawl::{GoogleSearchClient, SearchConfig};
use eval::{BenchmarkResults, EvalMode, QueryBenchmarker};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Compare search query templates by how relevant their top result is.
#[derive(Parser, Debug)]
#[command(name = "run_query_test")]
struct Args {
    /// breeders or brands
    mode: EvalMode,

    /// Entity names to test
    #[arg(required = true)]
    names: Vec<String>,

    /// Also save the full results as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    println!("=== Query Variation Test ({:?}) ===\n", args.mode);

    let search = GoogleSearchClient::new(SearchConfig::default().with_env_overrides())
        .context("Failed to create search client")?;
    let benchmarker = QueryBenchmarker::new(Box::new(search), args.mode);

    let results = benchmarker.run_benchmark(&args.names).await;
    print_results(&results);

    if let Some(path) = args.output {
        let json = serde_json::to_string_pretty(&results)?;
        std::fs::write(&path, json).context(format!("Failed to write {:?}", path))?;
        println!("\nResults saved to {:?}", path);
    }

    Ok(())
}

fn print_results(results: &BenchmarkResults) {
    let rule = "=".repeat(80);

    for report in &results.entities {
        println!("\n{}\nENTITY: \"{}\"\n{}", rule, report.entity.to_uppercase(), rule);

        for (i, tested) in report.ranked.iter().enumerate() {
            println!("\n{}. QUERY: \"{}\"", i + 1, tested.query);
            println!("   RELEVANCE SCORE: {}/{}", tested.relevance_score, results.max_score);
            println!("   RESULTS ({}):", tested.results.len());

            if tested.results.is_empty() {
                println!("   No results found");
                continue;
            }
            for (j, item) in tested.results.iter().enumerate() {
                println!("\n   {}. {}", j + 1, item.title.as_deref().unwrap_or("No title"));
                println!("      URL: {}", item.link.as_deref().unwrap_or("No URL"));
                println!("      Snippet: {}", item.snippet.as_deref().unwrap_or("No snippet"));
            }
        }

        if let Some(best) = report.best() {
            println!("\n   -> BEST FOR \"{}\": \"{}\" (score: {})", report.entity, best.query, best.relevance_score);
        }
    }

    println!("\n{}\nQUERY PATTERN PERFORMANCE\n{}", rule, rule);
    for pattern in &results.patterns {
        println!("- \"{}\": {:.1}/{}", pattern.pattern, pattern.avg_score, results.max_score);
    }

    if let Some(best) = &results.recommended {
        println!("\nRECOMMENDED QUERY PATTERN: \"{}\"", best.pattern);
        println!("Average relevance score: {:.1}/{}", best.avg_score, results.max_score);
    }
}
