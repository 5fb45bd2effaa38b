//! # Manualforge
//!
//! Turns uploaded technical manuals (PDF/DOCX) into structured technician
//! artifacts: a fillable inspection checksheet (XLSX) or a formatted work
//! instruction (DOCX).
//!
//! The core is a retrieval-then-generate pipeline: fetch source files from
//! object storage, extract and chunk their text, submit the chunks to an
//! external vector index, compose a use-case-specific prompt, invoke an LLM
//! once, render the model's structured text into the target binary format,
//! upload the result, and hand back a time-limited signed download URL.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────┐   ┌───────────────────────────────────────┐   ┌─────────┐
//! │ Client │──▶│              Pipeline                 │──▶│   S3    │
//! └────────┘   │ fetch → extract → index → prompt →    │   └────┬────┘
//!              │ invoke → render → upload → presign    │        │
//!              └──────┬──────────────┬─────────────────┘        ▼
//!                     ▼              ▼                     signed URL
//!               ┌──────────┐   ┌──────────┐
//!               │  vector  │   │  Gemini  │
//!               │  index   │   │   LLM    │
//!               └──────────┘   └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types (`UseCase`, `Artifact`, `UploadGrant`) |
//! | [`traits`] | Service seams: object store, chunk index, text generator |
//! | [`extract`] | PDF/DOCX text extraction and paragraph chunking |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | Chunk submission to the external vector store |
//! | [`prompt`] | Use-case prompt composition |
//! | [`llm`] | LLM invocation (Gemini) |
//! | [`render`] | Structured text → XLSX/DOCX artifact rendering |
//! | [`storage`] | S3 object store with SigV4 signing and presigned URLs |
//! | [`pipeline`] | Request orchestration |
//! | [`server`] | CORS-open HTTP API |

pub mod config;
pub mod embedding;
pub mod extract;
pub mod index;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod server;
pub mod storage;
pub mod traits;
