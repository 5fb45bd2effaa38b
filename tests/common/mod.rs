//! Shared in-memory fakes for pipeline and server tests.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use zip::write::SimpleFileOptions;

use manualforge::traits::{ChunkIndex, ObjectStore, TextGenerator};

/// Object store backed by a map, recording every upload.
#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    /// (key, content_type) of every put_object call, in order.
    pub puts: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn with_object(key: &str, bytes: Vec<u8>) -> Self {
        let store = Self::default();
        store
            .objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes);
        store
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        match self.objects.lock().unwrap().get(key) {
            Some(bytes) => Ok(bytes.clone()),
            None => bail!("no such object: {}", key),
        }
    }

    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), body);
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string()));
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_secs: u64) -> Result<String> {
        Ok(format!(
            "https://store.test/{}?X-Amz-Expires={}",
            key, expires_secs
        ))
    }

    async fn presign_put(&self, key: &str, expires_secs: u64) -> Result<String> {
        Ok(format!(
            "https://store.test/{}?X-Amz-Expires={}&method=PUT",
            key, expires_secs
        ))
    }
}

/// Chunk index recording every submitted batch.
#[derive(Default)]
pub struct RecordingIndex {
    pub batches: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl ChunkIndex for RecordingIndex {
    async fn index_chunks(&self, chunks: &[String]) -> Result<()> {
        self.batches.lock().unwrap().push(chunks.to_vec());
        Ok(())
    }
}

/// Chunk index that always fails.
pub struct FailingIndex;

#[async_trait]
impl ChunkIndex for FailingIndex {
    async fn index_chunks(&self, _chunks: &[String]) -> Result<()> {
        bail!("index unavailable")
    }
}

/// Text generator returning a canned reply and recording the prompt.
pub struct FakeLlm {
    pub reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for FakeLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Build a minimal DOCX (zip with word/document.xml) with one `<w:p>` per
/// paragraph.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut body = String::new();
    for p in paragraphs {
        body.push_str(&format!(
            "<w:p><w:r><w:t>{}</w:t></w:r></w:p>",
            quick_xml::escape::escape(*p)
        ));
    }
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut cursor);
        zip.start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    cursor.into_inner()
}
