//! The mutable cursor carried across the single forward pass.

use crate::models::SectionNode;

use super::capture::NameCapture;
use super::patterns::{normalize, strip_numeric_prefix};
use super::sequence::SequenceTracker;

/// Which special attachment rules the current top section activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopMode {
    Definitions,
    Records,
    PolicyReference,
}

/// Cursor state for the classification pass: the tree being built, index
/// paths to the active top/sub/sub-sub nodes, the keyword tracker, and at
/// most one in-flight name capture.
///
/// `sub`/`subsub` are only ever set to children reachable under the active
/// top, so index paths stay valid until the next cursor move.
#[derive(Debug, Default)]
pub struct ParseState {
    pub sections: Vec<SectionNode>,
    top: Option<usize>,
    sub: Option<usize>,
    subsub: Option<usize>,
    pub tracker: SequenceTracker,
    pub capture: Option<NameCapture>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_top(&self) -> bool {
        self.top.is_some()
    }

    /// True when a subclause (and possibly a sub-subclause) is open.
    pub fn has_sub(&self) -> bool {
        self.sub.is_some()
    }

    pub fn current_top(&self) -> Option<&SectionNode> {
        self.sections.get(self.top?)
    }

    pub fn current_sub(&self) -> Option<&SectionNode> {
        self.current_top()?.children.get(self.sub?)
    }

    pub fn current_subsub(&self) -> Option<&SectionNode> {
        self.current_sub()?.children.get(self.subsub?)
    }

    fn current_top_mut(&mut self) -> Option<&mut SectionNode> {
        let idx = self.top?;
        self.sections.get_mut(idx)
    }

    fn current_sub_mut(&mut self) -> Option<&mut SectionNode> {
        let idx = self.sub?;
        self.current_top_mut()?.children.get_mut(idx)
    }

    fn current_subsub_mut(&mut self) -> Option<&mut SectionNode> {
        let idx = self.subsub?;
        self.current_sub_mut()?.children.get_mut(idx)
    }

    /// Deepest currently active node: sub-sub > sub > top.
    fn deepest_mut(&mut self) -> Option<&mut SectionNode> {
        if self.subsub.is_some() {
            return self.current_subsub_mut();
        }
        if self.sub.is_some() {
            return self.current_sub_mut();
        }
        self.current_top_mut()
    }

    /// Append a new top-level section and make it the active cursor.
    ///
    /// Clears the sub/sub-sub cursors and cancels any in-flight capture.
    /// With `forced` the tracker jumps past that keyword; otherwise it
    /// advances only if the heading matches the expected keyword.
    pub fn create_top(&mut self, heading: &str, forced: Option<&str>) {
        self.sections.push(SectionNode::new(heading));
        self.top = Some(self.sections.len() - 1);
        self.sub = None;
        self.subsub = None;
        self.capture = None;

        match forced {
            Some(keyword) => self.tracker.force_after(keyword),
            None => {
                self.tracker
                    .advance_if_matched(&normalize(strip_numeric_prefix(heading)));
            }
        }
    }

    /// Open a new subclause under the active top (resets the sub-sub cursor).
    /// A no-op when no top-level section exists yet.
    pub fn attach_sub(&mut self, heading: &str) {
        let Some(top) = self.current_top_mut() else {
            return;
        };
        top.children.push(SectionNode::new(heading));
        let idx = top.children.len() - 1;
        self.sub = Some(idx);
        self.subsub = None;
    }

    /// Open a new sub-subclause under the active subclause.
    pub fn attach_subsub(&mut self, heading: &str) {
        let Some(sub) = self.current_sub_mut() else {
            return;
        };
        sub.children.push(SectionNode::new(heading));
        let idx = sub.children.len() - 1;
        self.subsub = Some(idx);
    }

    /// Add a child under the active top without moving the cursors. Used by
    /// the capture flush, whose name children are leaves, not new scopes.
    pub fn push_top_child(&mut self, heading: &str) {
        if let Some(top) = self.current_top_mut() {
            top.children.push(SectionNode::new(heading));
        }
    }

    /// Append a content line to the deepest active node. Lines arriving
    /// before any heading have no home and are dropped.
    pub fn append_content(&mut self, text: &str) {
        if let Some(node) = self.deepest_mut() {
            node.content.push(text.to_string());
        }
    }

    /// Append a content line directly to the active top, bypassing any open
    /// subclause (Records stay flat).
    pub fn append_top_content(&mut self, text: &str) {
        if let Some(top) = self.current_top_mut() {
            top.content.push(text.to_string());
        }
    }

    /// Continuation of a wrapped definition: extend the previous child's
    /// heading with a single intervening space.
    pub fn extend_sub_heading(&mut self, text: &str) {
        if let Some(sub) = self.current_sub_mut() {
            sub.heading.push(' ');
            sub.heading.push_str(text);
        }
    }

    /// Special attachment rules keyed off the active top's heading.
    pub fn top_mode(&self) -> Option<TopMode> {
        let low = normalize(strip_numeric_prefix(&self.current_top()?.heading));
        if low.starts_with("definitions") {
            Some(TopMode::Definitions)
        } else if low.starts_with("records") {
            Some(TopMode::Records)
        } else if low.starts_with("policy reference") {
            Some(TopMode::PolicyReference)
        } else {
            None
        }
    }

    /// Locate the node that absorbed revision-history text: the first node
    /// whose normalized heading contains "revision", checking the active
    /// cursor chain deepest first, then top-level sections latest first.
    pub fn revision_node_mut(&mut self) -> Option<&mut SectionNode> {
        fn is_revision(node: &SectionNode) -> bool {
            normalize(strip_numeric_prefix(&node.heading)).contains("revision")
        }

        if self.current_subsub().is_some_and(is_revision) {
            return self.current_subsub_mut();
        }
        if self.current_sub().is_some_and(is_revision) {
            return self.current_sub_mut();
        }
        if self.current_top().is_some_and(is_revision) {
            return self.current_top_mut();
        }
        let idx = self.sections.iter().rposition(is_revision)?;
        self.sections.get_mut(idx)
    }

    /// Consume the state once the pass is complete.
    pub fn into_sections(self) -> Vec<SectionNode> {
        self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_priority() {
        let mut state = ParseState::new();
        state.append_content("orphan line"); // no home, dropped
        assert!(state.sections.is_empty());

        state.create_top("4. Procedures", None);
        state.append_content("top line");
        state.attach_sub("4.1 Setup");
        state.append_content("sub line");
        state.attach_subsub("4.1.1 Detail");
        state.append_content("subsub line");

        let top = &state.sections[0];
        assert_eq!(top.content, vec!["top line"]);
        assert_eq!(top.children[0].content, vec!["sub line"]);
        assert_eq!(top.children[0].children[0].content, vec!["subsub line"]);
    }

    #[test]
    fn test_create_top_resets_subclauses() {
        let mut state = ParseState::new();
        state.create_top("4. Procedures", None);
        state.attach_sub("4.1 Setup");
        assert!(state.has_sub());

        state.create_top("5. References", None);
        assert!(!state.has_sub());
        assert_eq!(state.sections.len(), 2);
    }

    #[test]
    fn test_attach_sub_resets_subsub() {
        let mut state = ParseState::new();
        state.create_top("4. Procedures", None);
        state.attach_sub("4.1 Setup");
        state.attach_subsub("4.1.1 Detail");
        state.attach_sub("4.2 Teardown");

        state.append_content("line");
        assert_eq!(state.sections[0].children[1].content, vec!["line"]);
        assert!(state.sections[0].children[0].children[0].content.is_empty());
    }

    #[test]
    fn test_top_mode_detection() {
        let mut state = ParseState::new();
        assert_eq!(state.top_mode(), None);

        state.create_top("2. Definitions", None);
        assert_eq!(state.top_mode(), Some(TopMode::Definitions));

        state.create_top("6. Records", None);
        assert_eq!(state.top_mode(), Some(TopMode::Records));

        state.create_top("7. Policy Reference", None);
        assert_eq!(state.top_mode(), Some(TopMode::PolicyReference));
    }

    #[test]
    fn test_revision_node_falls_back_to_section_scan() {
        let mut state = ParseState::new();
        state.create_top("8. Revisions", None);
        state.append_content("Rev A");
        state.create_top("9. Appendix", None);

        let node = state.revision_node_mut().unwrap();
        assert_eq!(node.heading, "8. Revisions");
    }
}
