use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Load, MatchProposal, Vehicle};

/// Errors that can occur when calling the chat-completions endpoint
#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("missing API key")]
    MissingApiKey,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Chat-completions client for the final matching call.
///
/// The candidate filter shrinks the fleet first; this client forwards the
/// reduced set plus the loads and parses the model's JSON proposals. The
/// base URL is injectable so tests can point it at a local mock server.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            model,
            client,
        }
    }

    /// Ask the model to propose one match per load from the reduced
    /// candidate set.
    pub async fn propose_matches(
        &self,
        loads: &[Load],
        candidates: &[Vehicle],
    ) -> Result<Vec<MatchProposal>, OpenAiError> {
        if self.api_key.is_empty() {
            return Err(OpenAiError::MissingApiKey);
        }

        let url = format!(
            "{}/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let loads_json = serde_json::to_string(loads)
            .map_err(|e| OpenAiError::InvalidResponse(format!("Failed to encode loads: {}", e)))?;
        let vehicles_json = serde_json::to_string(candidates).map_err(|e| {
            OpenAiError::InvalidResponse(format!("Failed to encode vehicles: {}", e))
        })?;

        let prompt = format!(
            "You are a logistics dispatcher. Match each load to the best vehicle.\n\
             Loads: {}\n\
             Vehicles: {}\n\
             Reply with ONLY a JSON array of objects with keys \
             loadId, vehicleId, matchScore (0-100), reason. \
             Omit loads with no suitable vehicle.",
            loads_json, vehicles_json
        );

        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.2,
        });

        tracing::debug!(
            "Requesting matches for {} loads over {} candidates",
            loads.len(),
            candidates.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Chat completion failed: {} - {}", status, body);
            return Err(OpenAiError::ApiError(format!(
                "Chat completion failed: {}",
                status
            )));
        }

        let body: Value = response.json().await?;

        let content = body
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| OpenAiError::InvalidResponse("Missing message content".into()))?;

        parse_proposals(content)
    }
}

/// Parse the model reply into proposals, tolerating markdown code fences
pub fn parse_proposals(content: &str) -> Result<Vec<MatchProposal>, OpenAiError> {
    let trimmed = strip_code_fences(content);

    serde_json::from_str(trimmed)
        .map_err(|e| OpenAiError::InvalidResponse(format!("Failed to parse proposals: {}", e)))
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}
