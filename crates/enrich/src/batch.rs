use anyhow::{Context, Result};
use crawl::JsonFile;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::metrics::{BatchMetrics, BatchSummary};
use crate::pipeline::EnrichmentPipeline;
use crate::strategy::EntityStrategy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Pause between entities, in milliseconds; unset leaves each command's default
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

impl BatchConfig {
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("BATCH_DELAY_MS") {
            match raw.parse() {
                Ok(ms) => self.delay_ms = Some(ms),
                Err(_) => warn!(value = %raw, "Ignoring invalid BATCH_DELAY_MS"),
            }
        }
        self
    }

    pub fn delay_or(&self, default: Duration) -> Duration {
        self.delay_ms.map(Duration::from_millis).unwrap_or(default)
    }
}

/// Runs a strategy over a list of inputs, one at a time, rewriting the output file after
/// every entity.
pub struct BatchDriver<'a> {
    pipeline: &'a EnrichmentPipeline,
    delay: Duration,
}

impl<'a> BatchDriver<'a> {
    pub fn new(pipeline: &'a EnrichmentPipeline, delay: Duration) -> Self {
        Self { pipeline, delay }
    }

    pub async fn run_file<S: EntityStrategy>(
        &self,
        strategy: &S,
        input: &Path,
        output: &Path,
    ) -> Result<BatchSummary> {
        let inputs: Vec<S::Input> = JsonFile::read(input).await?;
        self.run(strategy, &inputs, output).await
    }

    pub async fn run<S: EntityStrategy>(
        &self,
        strategy: &S,
        inputs: &[S::Input],
        output: &Path,
    ) -> Result<BatchSummary> {
        let span = info_span!("batch", run_id = %Uuid::new_v4(), strategy = strategy.label());
        self.run_inner(strategy, inputs, output).instrument(span).await
    }

    async fn run_inner<S: EntityStrategy>(
        &self,
        strategy: &S,
        inputs: &[S::Input],
        output: &Path,
    ) -> Result<BatchSummary> {
        let total = inputs.len();
        let mut metrics = BatchMetrics::new();
        let mut results: Vec<S::Output> = Vec::with_capacity(total);

        info!(total, output = ?output, "Starting batch");
        JsonFile::write_atomic(output, &results)
            .await
            .context("Failed to initialise batch output")?;

        for (i, input) in inputs.iter().enumerate() {
            let entity = strategy.entity_name(input);
            info!(entity, position = i + 1, total, "Processing entity");
            let timer = Instant::now();

            let (result, success) = match strategy.process(self.pipeline, input).await {
                Ok(result) => (result, true),
                Err(e) => {
                    warn!(entity, error = %e, "Entity failed, recording placeholder");
                    (strategy.placeholder(input), false)
                }
            };

            let elapsed = timer.elapsed();
            metrics.record_entity(success, strategy.has_result(&result), elapsed);
            results.push(result);

            JsonFile::write_atomic(output, &results)
                .await
                .with_context(|| format!("Failed to checkpoint after {}", entity))?;
            info!(
                entity,
                elapsed_ms = elapsed.as_millis() as u64,
                saved = results.len(),
                "Checkpoint written"
            );

            if i + 1 < total && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let summary = metrics.snapshot();
        info!(
            found = summary.with_results,
            total = summary.entities,
            failed = summary.failed,
            "Batch complete"
        );
        Ok(summary)
    }
}
