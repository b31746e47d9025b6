//! scout - web enrichment for cultivation brands and breeders.
//!
//! Searches for each entity's official website, asks a local model to pull out a
//! description, location and social links, and reshapes the JSON files between stages.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "scout", version, about = "Web enrichment for cultivation brands and breeders")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enrich a single entity and print the result
    Single {
        name: String,
        #[arg(long)]
        model: Option<String>,
    },
    /// Search, fetch and extract company data for every name in a file
    Enrich {
        input: PathBuf,
        /// breeders or brands
        kind: String,
        output: PathBuf,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Collect search results for every name in a file
    Search {
        input: PathBuf,
        /// Product category, selects the query suffix
        category: String,
        output: PathBuf,
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Keep only the first search result of each entity
    Flatten { input: PathBuf, output: PathBuf },
    /// Find social media links on each record's website
    Social {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        model: Option<String>,
        /// Defaults to BATCH_DELAY_MS, then 2000
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Turn comma-joined social links into normalized entries
    NormalizeSocial {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Labels)]
        format: Format,
    },
    /// Group brands by category and split each category into batch files
    BatchCategories {
        input: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[arg(long, default_value_t = transform::DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Format {
    Labels,
    Platforms,
}

impl From<Format> for transform::SocialFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Labels => transform::SocialFormat::Labels,
            Format::Platforms => transform::SocialFormat::Platforms,
        }
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    let config = AppConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Command::Single { name, model } => commands::single(&config, &name, model).await,
        Command::Enrich {
            input,
            kind,
            output,
            model,
            delay_ms,
        } => commands::enrich(&config, &input, &kind, &output, model, delay_ms).await,
        Command::Search {
            input,
            category,
            output,
            delay_ms,
        } => commands::search(&config, &input, &category, &output, delay_ms).await,
        Command::Flatten { input, output } => commands::flatten(&input, &output).await,
        Command::Social {
            input,
            output,
            model,
            delay_ms,
        } => commands::social(&config, &input, &output, model, delay_ms).await,
        Command::NormalizeSocial {
            input,
            output,
            format,
        } => commands::normalize_social(&input, &output, format.into()).await,
        Command::BatchCategories {
            input,
            out_dir,
            batch_size,
        } => commands::batch_categories(&input, &out_dir, batch_size).await,
    }
}
