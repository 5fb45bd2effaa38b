//! LLM invocation.
//!
//! A single blocking round-trip to the Gemini `generateContent` endpoint
//! with a bounded output-length ceiling. No retry, no streaming, no
//! partial-result handling: transport and quota failures propagate to the
//! caller as-is, and the pipeline makes at most one call per request.
//!
//! Requires the `GOOGLE_API_KEY` environment variable.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::LlmConfig;
use crate::traits::TextGenerator;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiGenerator {
    model: String,
    max_output_tokens: u32,
    timeout_secs: u64,
}

impl GeminiGenerator {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
            timeout_secs: config.timeout_secs,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| anyhow::anyhow!("GOOGLE_API_KEY environment variable not set"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;

        let body = serde_json::json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ],
            "generationConfig": { "maxOutputTokens": self.max_output_tokens },
        });

        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model);

        let response = client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!(
                "Gemini API error {}: {}",
                status,
                body_text.chars().take(500).collect::<String>()
            );
        }

        let json: serde_json::Value = response.json().await?;
        parse_gemini_response(&json)
    }
}

/// Extract the generated text: all `parts[].text` of the first candidate,
/// concatenated in order.
fn parse_gemini_response(json: &serde_json::Value) -> Result<String> {
    let parts = json
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid Gemini response: missing candidates"))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        bail!("Gemini returned no text content");
    }

    Ok(text)
}
