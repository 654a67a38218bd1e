use crate::models::{Analysis, Item};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while analyzing an item
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Source of compatibility analyses for a listing
///
/// Implementations may be slow or fail; callers treat the result as a
/// best-effort enhancement over the item's base score.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, item: &Item, locality: &str) -> Result<Analysis, AnalyzerError>;
}

/// Stand-in analyzer that answers with the base score after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedAnalyzer {
    latency: Duration,
}

impl SimulatedAnalyzer {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedAnalyzer {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

#[async_trait]
impl Analyzer for SimulatedAnalyzer {
    async fn analyze(&self, item: &Item, locality: &str) -> Result<Analysis, AnalyzerError> {
        tokio::time::sleep(self.latency).await;

        Ok(Analysis {
            score: item.base_score,
            reasoning: format!(
                "Technical analysis completed: compatible with {} regulations",
                locality
            ),
        })
    }
}
