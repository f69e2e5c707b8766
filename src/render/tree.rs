//! Plain-text rendering of a section tree for terminal inspection.

use std::fmt::Write;

use crate::models::SectionNode;

/// Render a node and its children with two-space indentation per level and
/// a blank line before each child block.
pub fn render_tree(node: &SectionNode, level: usize) -> String {
    let mut out = String::new();
    render_into(&mut out, node, level);
    out
}

fn render_into(out: &mut String, node: &SectionNode, level: usize) {
    let indent = "  ".repeat(level);
    let _ = writeln!(
        out,
        "{indent}- '{}' (content lines: {})",
        node.heading,
        node.content.len()
    );

    if !node.children.is_empty() {
        out.push('\n');
        for child in &node.children {
            render_into(out, child, level + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tree_indentation() {
        let node = SectionNode::new("4. Procedures")
            .with_content("intro")
            .with_child(SectionNode::new("4.1 Setup").with_content("line"));

        let rendered = render_tree(&node, 0);
        assert_eq!(
            rendered,
            "- '4. Procedures' (content lines: 1)\n\n  - '4.1 Setup' (content lines: 1)\n"
        );
    }
}
