use colored::Colorize;
use std::path::Path;

use crate::models::{LegacyDocument, RevisionHistory};
use crate::parser::parse_document;
use crate::render::render_tree;
use crate::{Context, Result};

/// Parse one reader-exported document and print its section tree.
pub fn run(path: &Path) -> Result<()> {
    let doc = LegacyDocument::from_json_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let parsed = parse_document(&doc)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    println!("\n=== {} ===", name.cyan().bold());
    println!("Document Title: '{}'", parsed.document_title);
    if !parsed.purpose_scope.is_empty() {
        println!("Purpose/Scope: {} line(s)", parsed.purpose_scope.lines().count());
    }
    println!("Top-level sections found: {}\n", parsed.sections.len());

    for (idx, section) in parsed.sections.iter().enumerate() {
        print!("{}", render_tree(section, 0));
        if idx < parsed.sections.len() - 1 {
            println!();
        }
    }

    match &parsed.revision_history {
        RevisionHistory::Table { rows } => {
            println!("\nRevision History: TABLE with {} rows", rows.len());
        }
        RevisionHistory::Written { lines } => {
            println!("\nRevision History: WRITTEN with {} lines", lines.len());
        }
    }

    Ok(())
}
