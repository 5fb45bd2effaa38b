//! Text extraction and paragraph chunking for uploaded manuals.
//!
//! Turns raw document bytes into an ordered sequence of non-empty text
//! chunks. Extraction is attempted as PDF first; on any failure the same
//! bytes are retried as DOCX. When neither parser accepts the bytes the
//! document is rejected with [`ExtractError::UnsupportedFormat`].
//!
//! A chunk is a paragraph-level unit: the extracted full text is split on
//! blank-line boundaries (`\n\n`), empty segments are dropped, and source
//! order is preserved. No chunk-size limit is enforced.

use std::io::Read;

/// Maximum decompressed bytes read from a single ZIP entry (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Extraction failure. A single variant: the document is not in a supported
/// format. Both parser errors are kept for the failure response body.
#[derive(Debug)]
pub enum ExtractError {
    UnsupportedFormat { pdf: String, docx: String },
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::UnsupportedFormat { pdf, docx } => {
                write!(
                    f,
                    "unsupported document format (PDF: {}; DOCX: {})",
                    pdf, docx
                )
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Extract paragraph chunks from document bytes, trying PDF then DOCX.
///
/// Chunks are trimmed, non-empty, and in source order. An empty vec is
/// possible when the document parses but contains no text.
pub fn extract_chunks(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let text = match extract_pdf(bytes) {
        Ok(t) => t,
        Err(pdf_err) => match extract_docx(bytes) {
            Ok(t) => t,
            Err(docx_err) => {
                return Err(ExtractError::UnsupportedFormat {
                    pdf: pdf_err,
                    docx: docx_err,
                })
            }
        },
    };
    Ok(split_paragraphs(&text))
}

/// Split full text on blank-line boundaries, dropping empty segments.
fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn extract_pdf(bytes: &[u8]) -> Result<String, String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
}

/// Extract text from a DOCX package: reads `word/document.xml` and collects
/// `w:t` runs, emitting a blank line at every paragraph (`w:p`) end so the
/// paragraph chunker sees the original document structure.
fn extract_docx(bytes: &[u8]) -> Result<String, String> {
    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut doc_xml = Vec::new();
    {
        let entry = archive
            .by_name("word/document.xml")
            .map_err(|e| e.to_string())?;
        entry
            .take(MAX_XML_ENTRY_BYTES)
            .read_to_end(&mut doc_xml)
            .map_err(|e| e.to_string())?;
        if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
            return Err("word/document.xml exceeds size limit".to_string());
        }
    }
    collect_paragraph_text(&doc_xml)
}

fn collect_paragraph_text(xml: &[u8]) -> Result<String, String> {
    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut in_t = false;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_t = true;
                }
            }
            Ok(quick_xml::events::Event::Text(te)) if in_t => {
                out.push_str(te.unescape().unwrap_or_default().as_ref());
            }
            Ok(quick_xml::events::Event::End(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_t = false;
                } else if e.local_name().as_ref() == b"p" {
                    out.push_str("\n\n");
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}
