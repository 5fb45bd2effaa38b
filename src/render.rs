//! Artifact rendering: structured model output → binary OOXML files.
//!
//! Checksheets become single-sheet XLSX workbooks: one row per non-blank
//! output line, cells split on the pipe (`|`) delimiter and trimmed. The
//! first surviving line is the header row; row widths are not validated
//! against the header, ragged rows pass through as-is.
//!
//! Work instructions (and passthrough output) become DOCX documents: one
//! paragraph per line, in original order, with no styling applied.
//!
//! Both writers emit minimal OOXML packages directly with `zip` — the same
//! package format the extractor reads. Output keys are timestamp-suffixed
//! to avoid collisions.

use quick_xml::escape::escape;
use std::io::{Cursor, Write};

use crate::models::{Artifact, UseCase};

/// Rendering failure.
#[derive(Debug)]
pub enum RenderError {
    /// The model output contained no usable lines for the checksheet table.
    EmptyOutput,
    /// ZIP packaging failed while writing to the in-memory buffer.
    Package(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::EmptyOutput => write!(f, "model returned empty checksheet text"),
            RenderError::Package(e) => write!(f, "failed to package artifact: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

/// Render the model's output text into the artifact for `use_case`.
///
/// `timestamp_ms` becomes the collision-avoidance suffix of the storage key.
pub fn render(
    use_case: UseCase,
    ai_text: &str,
    timestamp_ms: i64,
) -> Result<Artifact, RenderError> {
    let target = use_case.target();
    let key = format!("{}{}{}", target.key_prefix, timestamp_ms, target.extension);

    let bytes = match use_case {
        UseCase::Checksheet => {
            let rows = parse_table(ai_text)?;
            write_checksheet_xlsx(&rows)?
        }
        UseCase::WorkInstruction | UseCase::Passthrough => {
            let lines: Vec<&str> = ai_text.split('\n').collect();
            write_instruction_docx(&lines)?
        }
    };

    Ok(Artifact {
        key,
        content_type: target.content_type,
        bytes,
    })
}

/// Split output text into table rows: trim lines, drop blank ones, split
/// each survivor on `|` and trim every cell. Header is rows[0].
fn parse_table(ai_text: &str) -> Result<Vec<Vec<String>>, RenderError> {
    let rows: Vec<Vec<String>> = ai_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split('|').map(|cell| cell.trim().to_string()).collect())
        .collect();

    if rows.is_empty() {
        return Err(RenderError::EmptyOutput);
    }
    Ok(rows)
}

// ============ XLSX writer ============

const XLSX_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const XLSX_ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const XLSX_WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Checksheet" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const XLSX_WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Build a single-sheet workbook named "Checksheet", one spreadsheet row per
/// table row, cells as inline strings (no shared-string table needed).
fn write_checksheet_xlsx(rows: &[Vec<String>]) -> Result<Vec<u8>, RenderError> {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        sheet.push_str(&format!("<row r=\"{}\">", r + 1));
        for (c, cell) in row.iter().enumerate() {
            sheet.push_str(&format!(
                "<c r=\"{}{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                column_name(c),
                r + 1,
                escape(cell.as_str())
            ));
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    pack(&[
        ("[Content_Types].xml", XLSX_CONTENT_TYPES),
        ("_rels/.rels", XLSX_ROOT_RELS),
        ("xl/workbook.xml", XLSX_WORKBOOK),
        ("xl/_rels/workbook.xml.rels", XLSX_WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", &sheet),
    ])
}

/// Spreadsheet column name for a zero-based index: 0 → "A", 25 → "Z",
/// 26 → "AA".
fn column_name(mut index: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name
}

// ============ DOCX writer ============

const DOCX_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const DOCX_ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Build a single-section document with one paragraph per input line, in
/// original order, no heading styling.
fn write_instruction_docx(lines: &[&str]) -> Result<Vec<u8>, RenderError> {
    let mut doc = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for line in lines {
        doc.push_str(&format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(*line)
        ));
    }
    doc.push_str("</w:body></w:document>");

    pack(&[
        ("[Content_Types].xml", DOCX_CONTENT_TYPES),
        ("_rels/.rels", DOCX_ROOT_RELS),
        ("word/document.xml", &doc),
    ])
}

/// Write named entries into an in-memory ZIP package.
fn pack(entries: &[(&str, &str)]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        for (name, content) in entries {
            zip.start_file(*name, zip::write::SimpleFileOptions::default())
                .map_err(|e| RenderError::Package(e.to_string()))?;
            zip.write_all(content.as_bytes())
                .map_err(|e| RenderError::Package(e.to_string()))?;
        }
        zip.finish().map_err(|e| RenderError::Package(e.to_string()))?;
    }
    Ok(buf)
}
