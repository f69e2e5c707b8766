use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// One rendered paragraph from a legacy document, in document order.
///
/// The emphasis flag is the rendering hint the classifier uses to tell
/// headings apart from body text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paragraph {
    /// Rendered paragraph text (pre-trimmed by the reader)
    pub text: String,

    /// Whether the paragraph carries bold emphasis
    #[serde(default)]
    pub emphasized: bool,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, emphasized: bool) -> Self {
        Self {
            text: text.into(),
            emphasized,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }
}

/// Reader-facing input: the paragraph stream plus the document's trailing
/// table, if one exists. How these were obtained (file format, network) is
/// the reader's concern, not ours.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyDocument {
    pub paragraphs: Vec<Paragraph>,

    /// Rows of the trailing table, header row included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_table: Option<Vec<Vec<String>>>,
}

/// Errors loading a reader-exported document from disk
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LegacyDocument {
    /// Load a document the external reader exported as JSON.
    pub fn from_json_file(path: &Path) -> Result<Self, DocumentError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
