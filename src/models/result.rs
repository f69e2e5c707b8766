use serde::{Deserialize, Serialize};

use super::SectionNode;

/// Revision history harvested after the paragraph pass.
///
/// Either the trailing table's rows verbatim (header row included), or the
/// free-text lines that had accumulated under the "Revisions" heading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RevisionHistory {
    Table { rows: Vec<Vec<String>> },
    Written { lines: Vec<String> },
}

impl RevisionHistory {
    pub fn empty() -> Self {
        Self::Written { lines: Vec::new() }
    }
}

/// The complete parse of one legacy document. Read-only once the pass and
/// the revision-history reconciliation finish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedProcedure {
    /// First emphasized paragraph, or the first paragraph as a fallback
    pub document_title: String,

    /// Free text between the "Purpose and Scope" and "Definitions" anchors,
    /// empty when either anchor is missing
    pub purpose_scope: String,

    /// Top-level sections in encounter order
    pub sections: Vec<SectionNode>,

    pub revision_history: RevisionHistory,
}
