use crate::models::{Analysis, Item};
use crate::services::analyzer::{Analyzer, AnalyzerError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// Analyzer backed by a remote compatibility API
///
/// Issues `POST {base_url}/v1/items/{id}/analysis` with the item and locality
/// and expects `{ "score": number, "reasoning": string }` back.
pub struct HttpAnalyzer {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

#[derive(Serialize)]
struct AnalysisRequest<'a> {
    item: &'a Item,
    locality: &'a str,
}

impl HttpAnalyzer {
    /// Create a new client; `timeout` bounds each request
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AnalyzerError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    fn analysis_url(&self, item_id: &str) -> String {
        format!(
            "{}/v1/items/{}/analysis",
            self.base_url,
            urlencoding::encode(item_id)
        )
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    async fn analyze(&self, item: &Item, locality: &str) -> Result<Analysis, AnalyzerError> {
        let url = self.analysis_url(&item.id);
        tracing::debug!("Requesting analysis: {}", url);

        let mut request = self
            .client
            .post(&url)
            .json(&AnalysisRequest { item, locality });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AnalyzerError::Unauthorized)
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(AnalyzerError::ApiError(format!("{}: {}", status, body)));
            }
            _ => {}
        }

        let body = response.text().await?;
        serde_json::from_str::<Analysis>(&body)
            .map_err(|e| AnalyzerError::InvalidResponse(e.to_string()))
    }
}
