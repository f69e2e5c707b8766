// Docmodern - legacy procedure document modernizer
// Classifies a flat paragraph stream into a canonical section tree plus an
// extracted revision-history block.

pub mod cli;
pub mod models;
pub mod parser;
pub mod render;

pub use anyhow::{Context, Result};

// Re-export commonly used types
pub use models::{LegacyDocument, Paragraph, ParsedProcedure, RevisionHistory, SectionNode};
pub use parser::parse_document;
