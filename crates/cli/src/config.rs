use anyhow::{Context, Result};
use crawl::{FetchConfig, SearchConfig};
use enrich::BatchConfig;
use extract::ModelConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the clients and the batch driver need, loaded once at start.
///
/// Sources, later ones winning: built-in defaults, the optional TOML file, then
/// environment variables (including those loaded from `.env`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .context(format!("Failed to read config file: {:?}", path))?;
                Self::from_toml(&text).context(format!("Invalid config file: {:?}", path))?
            }
            None => Self::default(),
        };

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_overrides<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            search: self.search.with_overrides(&lookup),
            fetch: self.fetch.with_overrides(&lookup),
            model: self.model.with_overrides(&lookup),
            batch: self.batch.with_overrides(&lookup),
        }
    }
}
