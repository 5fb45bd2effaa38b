//! Service seams for the generation pipeline.
//!
//! The pipeline talks to three external collaborators — object storage, the
//! semantic chunk index, and the LLM — through the traits in this module.
//! Concrete clients ([`crate::storage::S3ObjectStore`],
//! [`crate::index::VectorIndexer`], [`crate::llm::GeminiGenerator`]) are
//! built once at process start and injected into the pipeline as
//! `Arc<dyn Trait>`, so tests can substitute in-memory fakes.
//!
//! ```text
//! ┌───────────────────────── Pipeline ─────────────────────────┐
//! │  ObjectStore          ChunkIndex          TextGenerator    │
//! │  get/put/presign      index_chunks        generate         │
//! └──────┬────────────────────┬────────────────────┬───────────┘
//!        ▼                    ▼                    ▼
//!      S3 API          vector store API        Gemini API
//! ```

use anyhow::Result;
use async_trait::async_trait;

/// Object storage holding uploaded manuals and generated artifacts.
///
/// Implementations must be safe for concurrent use; the pipeline holds one
/// instance for the life of the process and carries no request-scoped state
/// in it.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download an object's bytes by key.
    async fn get_object(&self, key: &str) -> Result<Vec<u8>>;

    /// Upload an object under `key` with the given content type.
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;

    /// Issue a time-limited signed download URL for `key`.
    async fn presign_get(&self, key: &str, expires_secs: u64) -> Result<String>;

    /// Issue a time-limited signed upload URL for `key`.
    async fn presign_put(&self, key: &str, expires_secs: u64) -> Result<String>;
}

/// External semantic index accepting the full chunk set of one request.
///
/// Writes are at-least-once: submitting the same chunk twice must be
/// tolerated by the index.
#[async_trait]
pub trait ChunkIndex: Send + Sync {
    async fn index_chunks(&self, chunks: &[String]) -> Result<()>;
}

/// Opaque text-completion service.
///
/// One call per generation request. Implementations do not retry; transport
/// and quota failures propagate to the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
