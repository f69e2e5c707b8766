use serde::{Deserialize, Serialize};

/// A node in the section tree: one heading, its body lines, and nested
/// children (subclauses / sub-subclauses / definition entries / names).
///
/// `content` and `children` preserve paragraph encounter order and are never
/// reordered after the parse completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionNode {
    pub heading: String,
    pub content: Vec<String>,
    pub children: Vec<SectionNode>,
}

impl SectionNode {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, line: impl Into<String>) -> Self {
        self.content.push(line.into());
        self
    }

    pub fn with_child(mut self, child: SectionNode) -> Self {
        self.children.push(child);
        self
    }
}
