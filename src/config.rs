use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub index: IndexConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Bucket holding uploaded manuals and generated artifacts.
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, LocalStack).
    /// When set, requests use path-style addressing.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Output-length ceiling for a single generation call.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_max_output_tokens() -> u32 {
    3000
}
fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    /// `"openai"` or `"disabled"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dims: Option<usize>,
    #[serde(default = "default_embed_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            dims: None,
            timeout_secs: default_embed_timeout_secs(),
        }
    }
}

impl EmbeddingConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_embed_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    /// `"pinecone"` or `"disabled"`. When disabled, chunk indexing is
    /// skipped and generation proceeds without it.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the index (e.g. `https://manuals-abc123.svc.pinecone.io`).
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            url: None,
            namespace: None,
        }
    }
}

impl IndexConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.storage.bucket.is_empty() {
        anyhow::bail!("storage.bucket must not be empty");
    }

    if config.llm.max_output_tokens == 0 {
        anyhow::bail!("llm.max_output_tokens must be > 0");
    }

    match config.embedding.provider.as_str() {
        "disabled" | "openai" => {}
        other => anyhow::bail!(
            "Unknown embedding provider: '{}'. Must be disabled or openai.",
            other
        ),
    }

    if config.embedding.is_enabled() {
        if config.embedding.model.is_none() {
            anyhow::bail!(
                "embedding.model must be specified when provider is '{}'",
                config.embedding.provider
            );
        }
        if config.embedding.dims.is_none() || config.embedding.dims == Some(0) {
            anyhow::bail!(
                "embedding.dims must be > 0 when provider is '{}'",
                config.embedding.provider
            );
        }
    }

    match config.index.provider.as_str() {
        "disabled" | "pinecone" => {}
        other => anyhow::bail!(
            "Unknown index provider: '{}'. Must be disabled or pinecone.",
            other
        ),
    }

    if config.index.is_enabled() {
        if config.index.url.is_none() {
            anyhow::bail!(
                "index.url must be specified when provider is '{}'",
                config.index.provider
            );
        }
        if !config.embedding.is_enabled() {
            anyhow::bail!("index requires an embedding provider; embedding.provider is disabled");
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> Result<Config> {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("manualforge.toml");
        std::fs::write(&path, toml_str).unwrap();
        load_config(&path)
    }

    #[test]
    fn minimal_config_parses_with_defaults() {
        let cfg = parse(
            r#"
[storage]
bucket = "manuals"

[server]
bind = "127.0.0.1:8080"
"#,
        )
        .unwrap();
        assert_eq!(cfg.storage.bucket, "manuals");
        assert_eq!(cfg.storage.region, "us-east-1");
        assert_eq!(cfg.llm.model, "gemini-2.5-flash");
        assert_eq!(cfg.llm.max_output_tokens, 3000);
        assert_eq!(cfg.embedding.provider, "disabled");
        assert_eq!(cfg.index.provider, "disabled");
    }

    #[test]
    fn empty_bucket_rejected() {
        let err = parse(
            r#"
[storage]
bucket = ""

[server]
bind = "127.0.0.1:8080"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("storage.bucket"));
    }

    #[test]
    fn enabled_embedding_requires_model_and_dims() {
        let err = parse(
            r#"
[storage]
bucket = "manuals"

[embedding]
provider = "openai"

[server]
bind = "127.0.0.1:8080"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("embedding.model"));
    }

    #[test]
    fn enabled_index_requires_url_and_embedding() {
        let err = parse(
            r#"
[storage]
bucket = "manuals"

[index]
provider = "pinecone"

[server]
bind = "127.0.0.1:8080"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("index.url"));
    }

    #[test]
    fn unknown_providers_rejected() {
        let err = parse(
            r#"
[storage]
bucket = "manuals"

[embedding]
provider = "cohere"
model = "x"
dims = 4

[server]
bind = "127.0.0.1:8080"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown embedding provider"));
    }
}
