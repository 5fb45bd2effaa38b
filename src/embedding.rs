//! Embedding provider abstraction.
//!
//! Two providers, selected by `embedding.provider` in the config:
//! - **`"openai"`** — calls `POST /v1/embeddings` with the configured model.
//!   Requires the `OPENAI_API_KEY` environment variable.
//! - **`"disabled"`** — always returns an error; the indexer never calls it
//!   when indexing itself is disabled.
//!
//! Embedding sits on the generation request's critical path, so the call is
//! single-shot: no retry, no backoff. A failure surfaces to the caller and
//! aborts the request.

use anyhow::{bail, Result};
use std::time::Duration;

use crate::config::EmbeddingConfig;

/// Embed a batch of texts, returning one vector per input in input order.
pub async fn embed_texts(config: &EmbeddingConfig, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    match config.provider.as_str() {
        "openai" => embed_openai(config, texts).await,
        "disabled" => bail!("embedding provider is disabled"),
        other => bail!("unknown embedding provider: {}", other),
    }
}

async fn embed_openai(config: &EmbeddingConfig, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    let api_key =
        std::env::var("OPENAI_API_KEY").map_err(|_| anyhow::anyhow!("OPENAI_API_KEY not set"))?;

    let model = config
        .model
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("embedding.model required"))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let body = request_body(model, config.dims, texts);

    let response = client
        .post("https://api.openai.com/v1/embeddings")
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body_text = response.text().await.unwrap_or_default();
        bail!(
            "OpenAI API error {}: {}",
            status,
            body_text.chars().take(500).collect::<String>()
        );
    }

    let json: serde_json::Value = response.json().await?;
    let vectors = parse_openai_response(&json)?;
    verify_dims(&vectors, config.dims)?;
    Ok(vectors)
}

/// Embeddings request body; `dims` becomes the `dimensions` field that
/// makes the provider return vectors of the index's configured width.
fn request_body(model: &str, dims: Option<usize>, texts: &[String]) -> serde_json::Value {
    let mut body = serde_json::json!({
        "model": model,
        "input": texts,
    });
    if let Some(dims) = dims {
        body["dimensions"] = serde_json::json!(dims);
    }
    body
}

/// Reject vectors whose width does not match the configured index
/// dimension.
fn verify_dims(vectors: &[Vec<f32>], dims: Option<usize>) -> Result<()> {
    if let Some(dims) = dims {
        for vector in vectors {
            if vector.len() != dims {
                bail!(
                    "embedding dimension mismatch: expected {}, got {}",
                    dims,
                    vector.len()
                );
            }
        }
    }
    Ok(())
}

/// Parse the embeddings API response JSON: `data[].embedding` in order.
fn parse_openai_response(json: &serde_json::Value) -> Result<Vec<Vec<f32>>> {
    let data = json
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing data array"))?;

    let mut embeddings = Vec::with_capacity(data.len());

    for item in data {
        let embedding = item
            .get("embedding")
            .and_then(|e| e.as_array())
            .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing embedding"))?;

        let vec: Vec<f32> = embedding
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();

        embeddings.push(vec);
    }

    Ok(embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_provider_refuses() {
        let config = EmbeddingConfig::default();
        let err = embed_texts(&config, &["hello".to_string()]).await.unwrap_err();
        assert!(err.to_string().contains("disabled"));
    }

    #[test]
    fn parse_response_extracts_vectors_in_order() {
        let json = serde_json::json!({
            "data": [
                { "index": 0, "embedding": [0.1, 0.2] },
                { "index": 1, "embedding": [0.3, 0.4] },
            ]
        });
        let vecs = parse_openai_response(&json).unwrap();
        assert_eq!(vecs.len(), 2);
        assert_eq!(vecs[0], vec![0.1f32, 0.2f32]);
        assert_eq!(vecs[1], vec![0.3f32, 0.4f32]);
    }

    #[test]
    fn parse_response_rejects_missing_data() {
        let json = serde_json::json!({ "error": "nope" });
        assert!(parse_openai_response(&json).is_err());
    }

    #[test]
    fn request_body_carries_dimensions() {
        let body = request_body("text-embedding-3-small", Some(256), &["hi".to_string()]);
        assert_eq!(body["dimensions"], 256);
        assert_eq!(body["model"], "text-embedding-3-small");

        let body = request_body("text-embedding-3-small", None, &["hi".to_string()]);
        assert!(body.get("dimensions").is_none());
    }

    #[test]
    fn mismatched_vector_width_rejected() {
        let vectors = vec![vec![0.1, 0.2], vec![0.3, 0.4, 0.5]];
        let err = verify_dims(&vectors, Some(2)).unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));

        assert!(verify_dims(&vectors, None).is_ok());
        assert!(verify_dims(&[vec![0.1, 0.2]], Some(2)).is_ok());
    }
}
