use crawl::{SearchResult, WebSearch};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

use crate::variants::EvalMode;

/// Results kept per query for display.
pub const TOP_RESULTS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTestResult {
    pub entity: String,
    pub query: String,
    pub pattern: String,
    pub results: Vec<SearchResult>,
    pub relevance_score: u32,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityReport {
    pub entity: String,
    /// Highest score first; ties keep template order
    pub ranked: Vec<QueryTestResult>,
}

impl EntityReport {
    pub fn best(&self) -> Option<&QueryTestResult> {
        self.ranked.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternScore {
    pub pattern: String,
    pub avg_score: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResults {
    pub mode: EvalMode,
    pub max_score: u32,
    pub entities: Vec<EntityReport>,
    pub patterns: Vec<PatternScore>,
    pub recommended: Option<PatternScore>,
}

/// Runs every query template against the search API and compares them by relevance.
pub struct QueryBenchmarker {
    search: Box<dyn WebSearch>,
    mode: EvalMode,
}

impl QueryBenchmarker {
    pub fn new(search: Box<dyn WebSearch>, mode: EvalMode) -> Self {
        Self { search, mode }
    }

    pub async fn run_benchmark(&self, entities: &[String]) -> BenchmarkResults {
        info!(mode = ?self.mode, entities = entities.len(), "Running query benchmark");

        let mut reports = Vec::with_capacity(entities.len());
        for entity in entities {
            reports.push(self.test_entity(entity).await);
        }

        let patterns = pattern_averages(&reports);
        let recommended = best_pattern(&patterns).cloned();

        BenchmarkResults {
            mode: self.mode,
            max_score: self.mode.profile().max_score,
            entities: reports,
            patterns,
            recommended,
        }
    }

    async fn test_entity(&self, entity: &str) -> EntityReport {
        let profile = self.mode.profile();
        let mut tested = Vec::new();

        for variant in self.mode.variants(entity) {
            let start = Instant::now();
            let (results, relevance_score) = match self.search.search(&variant.query).await {
                Ok(results) => {
                    let score = profile.score(&results);
                    info!(query = variant.query.as_str(), found = results.len(), score, "Query tested");
                    (results, score)
                }
                Err(e) => {
                    warn!(query = variant.query.as_str(), error = %e, "Query failed");
                    (Vec::new(), 0)
                }
            };

            tested.push(QueryTestResult {
                entity: entity.to_string(),
                query: variant.query,
                pattern: variant.pattern,
                results: results.into_iter().take(TOP_RESULTS).collect(),
                relevance_score,
                latency_ms: start.elapsed().as_secs_f64() * 1000.0,
            });
        }

        // sort_by is stable, so equal scores keep template order
        tested.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

        EntityReport {
            entity: entity.to_string(),
            ranked: tested,
        }
    }
}

fn pattern_averages(reports: &[EntityReport]) -> Vec<PatternScore> {
    let mut by_pattern: IndexMap<&str, Vec<u32>> = IndexMap::new();
    for report in reports {
        for result in &report.ranked {
            by_pattern
                .entry(result.pattern.as_str())
                .or_default()
                .push(result.relevance_score);
        }
    }

    by_pattern
        .into_iter()
        .map(|(pattern, scores)| PatternScore {
            pattern: pattern.to_string(),
            avg_score: scores.iter().sum::<u32>() as f64 / scores.len() as f64,
            count: scores.len(),
        })
        .collect()
}

/// Highest average wins; the earlier pattern wins a tie.
fn best_pattern(patterns: &[PatternScore]) -> Option<&PatternScore> {
    patterns.iter().fold(None, |best, candidate| match best {
        Some(current) if current.avg_score >= candidate.avg_score => Some(current),
        _ => Some(candidate),
    })
}
