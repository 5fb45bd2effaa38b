//! Chunk submission to the external vector store.
//!
//! The [`VectorIndexer`] embeds every chunk collected for a request and
//! upserts the vectors into a Pinecone-style index
//! (`POST {url}/vectors/upsert`, `Api-Key` header from `PINECONE_API_KEY`).
//!
//! Vector ids are the SHA-256 of the chunk text, so re-submitting the same
//! chunk overwrites the same record — the index tolerates at-least-once
//! writes. An indexing failure aborts the whole generation request; setting
//! `index.provider = "disabled"` skips indexing entirely.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::config::{EmbeddingConfig, IndexConfig};
use crate::embedding::embed_texts;
use crate::traits::ChunkIndex;

pub struct VectorIndexer {
    embedding: EmbeddingConfig,
    index: IndexConfig,
}

impl VectorIndexer {
    pub fn new(embedding: EmbeddingConfig, index: IndexConfig) -> Self {
        Self { embedding, index }
    }
}

#[async_trait]
impl ChunkIndex for VectorIndexer {
    async fn index_chunks(&self, chunks: &[String]) -> Result<()> {
        if !self.index.is_enabled() {
            return Ok(());
        }
        if chunks.is_empty() {
            return Ok(());
        }

        let url = self
            .index
            .url
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("index.url not configured"))?;
        let api_key = std::env::var("PINECONE_API_KEY")
            .context("PINECONE_API_KEY environment variable not set")?;

        let vectors = embed_texts(&self.embedding, chunks).await?;

        let payload: Vec<serde_json::Value> = chunks
            .iter()
            .zip(vectors)
            .map(|(text, values)| {
                serde_json::json!({
                    "id": chunk_id(text),
                    "values": values,
                    "metadata": { "text": text },
                })
            })
            .collect();

        let mut body = serde_json::json!({ "vectors": payload });
        if let Some(ref ns) = self.index.namespace {
            body["namespace"] = serde_json::json!(ns);
        }

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/vectors/upsert", url.trim_end_matches('/')))
            .header("Api-Key", api_key)
            .json(&body)
            .send()
            .await
            .context("vector index upsert request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!(
                "vector index upsert failed (HTTP {}): {}",
                status,
                body_text.chars().take(500).collect::<String>()
            );
        }

        println!("indexed {} chunks", chunks.len());
        Ok(())
    }
}

/// Stable vector id for a chunk: hex SHA-256 of its text.
fn chunk_id(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_id_is_stable() {
        assert_eq!(chunk_id("check the oil"), chunk_id("check the oil"));
        assert_ne!(chunk_id("check the oil"), chunk_id("check the coolant"));
    }

    #[tokio::test]
    async fn disabled_index_is_a_noop() {
        let indexer = VectorIndexer::new(EmbeddingConfig::default(), IndexConfig::default());
        indexer
            .index_chunks(&["anything".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_chunk_set_is_a_noop() {
        let indexer = VectorIndexer::new(
            EmbeddingConfig::default(),
            IndexConfig {
                provider: "pinecone".to_string(),
                url: Some("https://example.invalid".to_string()),
                namespace: None,
            },
        );
        indexer.index_chunks(&[]).await.unwrap();
    }
}
