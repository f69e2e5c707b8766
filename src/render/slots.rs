//! Consumer-side helpers for mapping canonical headings onto fixed
//! destination slots.
//!
//! The parser's contract toward the rendering collaborator is that every
//! heading is matchable case-insensitively, numeric-prefix-stripped, by
//! startswith against the canonical keyword vocabulary. The template
//! mechanics themselves live with that collaborator.

use crate::models::{ParsedProcedure, SectionNode};
use crate::parser::{normalize, strip_numeric_prefix};

/// Find the top-level section for a canonical keyword ("records",
/// "policy reference", ...).
pub fn find_section<'a>(parsed: &'a ParsedProcedure, keyword: &str) -> Option<&'a SectionNode> {
    parsed
        .sections
        .iter()
        .find(|s| normalize(strip_numeric_prefix(&s.heading)).starts_with(keyword))
}

/// Names captured under a role section ("process owner" /
/// "process designee"): one child heading per name.
pub fn role_names(parsed: &ParsedProcedure, keyword: &str) -> Vec<String> {
    find_section(parsed, keyword)
        .map(|section| {
            section
                .children
                .iter()
                .map(|c| c.heading.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Split a definition entry at its first colon into term and remainder,
/// collapsing internal whitespace. Entries without a colon come back whole.
pub fn split_definition(entry: &str) -> (String, String) {
    let collapsed = entry.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.split_once(':') {
        Some((term, rest)) => (format!("{}:", term.trim()), rest.trim().to_string()),
        None => (collapsed, String::new()),
    }
}

/// Flatten the Policy Reference subtree into one ordered list of plain
/// lines: child headings with numeric prefixes stripped, interleaved with
/// their content, one level of grandchildren included. The subtree's depth
/// is transient and is not handed to the rendering collaborator.
pub fn policy_reference_lines(parsed: &ParsedProcedure) -> Vec<String> {
    let Some(node) = find_section(parsed, "policy reference") else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut push = |text: &str| {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    };

    for child in &node.children {
        push(strip_numeric_prefix(&child.heading));
        for line in &child.content {
            push(line);
        }
        for grandchild in &child.children {
            push(strip_numeric_prefix(&grandchild.heading));
            for line in &grandchild.content {
                push(line);
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RevisionHistory;

    fn parsed_with(sections: Vec<SectionNode>) -> ParsedProcedure {
        ParsedProcedure {
            document_title: "Doc".to_string(),
            purpose_scope: String::new(),
            sections,
            revision_history: RevisionHistory::empty(),
        }
    }

    #[test]
    fn test_find_section_strips_prefix_and_case() {
        let parsed = parsed_with(vec![
            SectionNode::new("6. RECORDS Retention"),
            SectionNode::new("7. Policy Reference"),
        ]);
        assert!(find_section(&parsed, "records").is_some());
        assert!(find_section(&parsed, "policy reference").is_some());
        assert!(find_section(&parsed, "procedures").is_none());
    }

    #[test]
    fn test_role_names() {
        let parsed = parsed_with(vec![SectionNode::new("3. Process Owner")
            .with_child(SectionNode::new("Alice"))
            .with_child(SectionNode::new("Bob"))]);
        assert_eq!(role_names(&parsed, "process owner"), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_split_definition() {
        let (term, rest) = split_definition("Widget:  a thing\tthat spins");
        assert_eq!(term, "Widget:");
        assert_eq!(rest, "a thing that spins");

        let (term, rest) = split_definition("No colon here");
        assert_eq!(term, "No colon here");
        assert_eq!(rest, "");
    }

    #[test]
    fn test_policy_reference_flattening() {
        let parsed = parsed_with(vec![SectionNode::new("7. Policy Reference").with_child(
            SectionNode::new("7.1 Corporate Policy")
                .with_content("applies company-wide")
                .with_child(SectionNode::new("7.1.1 Annex").with_content("see appendix")),
        )]);

        assert_eq!(
            policy_reference_lines(&parsed),
            vec![
                "Corporate Policy",
                "applies company-wide",
                "Annex",
                "see appendix"
            ]
        );
    }

    #[test]
    fn test_policy_reference_missing_section() {
        let parsed = parsed_with(vec![]);
        assert!(policy_reference_lines(&parsed).is_empty());
    }
}
