//! End-to-end generation pipeline.
//!
//! One [`Pipeline`] instance is built at startup with the three service
//! clients and shared across the server and the CLI. A generation request
//! runs the full sequence:
//!
//! 1. fetch every requested object from storage
//! 2. extract paragraph chunks from each document
//! 3. submit the combined chunk set to the semantic index
//! 4. compose the use-case prompt over the joined chunk text
//! 5. call the LLM once
//! 6. render the model output into the use-case artifact
//! 7. upload the artifact and presign a download URL
//!
//! Any stage failure aborts the request; nothing is uploaded on failure and
//! there are no partial artifacts to clean up.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::extract::extract_chunks;
use crate::models::{UploadGrant, UseCase};
use crate::prompt;
use crate::render::render;
use crate::traits::{ChunkIndex, ObjectStore, TextGenerator};

/// Lifetime of presigned upload URLs handed to clients.
pub const UPLOAD_URL_TTL_SECS: u64 = 300;
/// Lifetime of presigned download URLs for generated artifacts.
pub const DOWNLOAD_URL_TTL_SECS: u64 = 600;

/// Storage prefix for client uploads.
const UPLOAD_KEY_PREFIX: &str = "uploads/";

pub struct Pipeline {
    store: Arc<dyn ObjectStore>,
    index: Arc<dyn ChunkIndex>,
    llm: Arc<dyn TextGenerator>,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        index: Arc<dyn ChunkIndex>,
        llm: Arc<dyn TextGenerator>,
    ) -> Self {
        Self { store, index, llm }
    }

    /// Issue a presigned upload URL for a client-chosen filename.
    ///
    /// The key is `uploads/<filename>` with no sanitization or collision
    /// handling: re-uploading the same filename overwrites the object.
    pub async fn prepare_upload(&self, filename: &str) -> Result<UploadGrant> {
        let key = format!("{}{}", UPLOAD_KEY_PREFIX, filename);
        let url = self
            .store
            .presign_put(&key, UPLOAD_URL_TTL_SECS)
            .await
            .context("Failed to presign upload URL")?;
        Ok(UploadGrant { url, key })
    }

    /// Run the full generation sequence over the given object keys and
    /// return a presigned download URL for the rendered artifact.
    pub async fn generate(&self, keys: &[String], use_case: UseCase) -> Result<String> {
        let mut chunks: Vec<String> = Vec::new();
        for key in keys {
            println!("fetching document: {}", key);
            let bytes = self
                .store
                .get_object(key)
                .await
                .with_context(|| format!("Failed to fetch document '{}'", key))?;
            let extracted = extract_chunks(&bytes)
                .with_context(|| format!("Failed to extract text from '{}'", key))?;
            println!("extracted {} chunks from {}", extracted.len(), key);
            chunks.extend(extracted);
        }

        self.index
            .index_chunks(&chunks)
            .await
            .context("Failed to index document chunks")?;

        let context_text = chunks.join(" ");
        let prompt_text = prompt::compose(use_case, &context_text);

        println!("generating output ({:?}, {} chars of context)", use_case, context_text.len());
        let ai_text = self
            .llm
            .generate(&prompt_text)
            .await
            .context("Text generation failed")?;

        let artifact = render(use_case, &ai_text, Utc::now().timestamp_millis())?;

        println!("uploading artifact: {}", artifact.key);
        self.store
            .put_object(&artifact.key, artifact.bytes, artifact.content_type)
            .await
            .with_context(|| format!("Failed to upload artifact '{}'", artifact.key))?;

        let url = self
            .store
            .presign_get(&artifact.key, DOWNLOAD_URL_TTL_SECS)
            .await
            .context("Failed to presign result URL")?;

        println!("generation complete: {}", artifact.key);
        Ok(url)
    }
}
