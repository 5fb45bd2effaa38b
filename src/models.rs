//! Core data types flowing through the generation pipeline.

use serde::Serialize;

/// Standard OOXML spreadsheet MIME type (checksheet output).
pub const SPREADSHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Standard OOXML word-processing MIME type (work-instruction output).
pub const DOCUMENT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Discriminator selecting which prompt template and output renderer apply.
///
/// Parsed from the caller-supplied use-case string. Any unrecognized value
/// maps to [`UseCase::Passthrough`], an intentional escape hatch: the context
/// text is sent to the model unwrapped, and the output follows the document
/// render path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    Checksheet,
    WorkInstruction,
    Passthrough,
}

impl UseCase {
    /// Map a caller-supplied tag to a variant. Never fails.
    pub fn parse(tag: &str) -> UseCase {
        match tag {
            "checksheet" => UseCase::Checksheet,
            "workinstruction" => UseCase::WorkInstruction,
            _ => UseCase::Passthrough,
        }
    }

    /// The render target for this use case.
    ///
    /// Checksheets become spreadsheets; work instructions and passthrough
    /// output both follow the document path.
    pub fn target(&self) -> &'static RenderTarget {
        match self {
            UseCase::Checksheet => &CHECKSHEET_TARGET,
            UseCase::WorkInstruction | UseCase::Passthrough => &INSTRUCTION_TARGET,
        }
    }
}

/// Output-file shape for one use case: MIME type plus the storage key
/// pattern `<key_prefix><unix-ms-timestamp><extension>`.
#[derive(Debug)]
pub struct RenderTarget {
    pub content_type: &'static str,
    pub key_prefix: &'static str,
    pub extension: &'static str,
}

static CHECKSHEET_TARGET: RenderTarget = RenderTarget {
    content_type: SPREADSHEET_CONTENT_TYPE,
    key_prefix: "outputs/checksheet-",
    extension: ".xlsx",
};

static INSTRUCTION_TARGET: RenderTarget = RenderTarget {
    content_type: DOCUMENT_CONTENT_TYPE,
    key_prefix: "outputs/workinstruction-",
    extension: ".docx",
};

/// Final rendered binary output, ready for upload.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub key: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Presigned upload URL plus the storage key the caller must reference
/// in a later generate request.
#[derive(Debug, Clone, Serialize)]
pub struct UploadGrant {
    pub url: String,
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognized_tags() {
        assert_eq!(UseCase::parse("checksheet"), UseCase::Checksheet);
        assert_eq!(UseCase::parse("workinstruction"), UseCase::WorkInstruction);
    }

    #[test]
    fn parse_anything_else_is_passthrough() {
        assert_eq!(UseCase::parse(""), UseCase::Passthrough);
        assert_eq!(UseCase::parse("Checksheet"), UseCase::Passthrough);
        assert_eq!(UseCase::parse("summary"), UseCase::Passthrough);
    }

    #[test]
    fn checksheet_targets_spreadsheet() {
        let target = UseCase::Checksheet.target();
        assert_eq!(target.content_type, SPREADSHEET_CONTENT_TYPE);
        assert_eq!(target.extension, ".xlsx");
        assert!(target.key_prefix.starts_with("outputs/"));
    }

    #[test]
    fn passthrough_targets_document() {
        let target = UseCase::Passthrough.target();
        assert_eq!(target.content_type, DOCUMENT_CONTENT_TYPE);
        assert_eq!(target.extension, ".docx");
    }
}
