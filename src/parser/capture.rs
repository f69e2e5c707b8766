//! Multi-line buffering for owner/designee name blocks.
//!
//! While a capture is armed, paragraphs are buffered verbatim instead of
//! classified. A terminator paragraph flushes the buffer into name children
//! and is then handed back for one re-classification.

use super::patterns::Patterns;
use super::state::ParseState;

/// Which role section armed the capture. At most one capture is active at a
/// time; arming one role replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRole {
    Owner,
    Designee,
}

/// Buffered name block under a "Process Owner" / "Process Designee" top.
#[derive(Debug)]
pub struct NameCapture {
    pub role: CaptureRole,
    lines: Vec<String>,
}

impl NameCapture {
    pub fn new(role: CaptureRole) -> Self {
        Self {
            role,
            lines: Vec::new(),
        }
    }

    pub fn push_line(&mut self, text: &str) {
        self.lines.push(text.trim().to_string());
    }

    /// A paragraph ends the block when it is a fresh single-level heading
    /// outside any subclause, when it matches the next expected keyword, or
    /// when it opens a designee block (an owner block is always closed by
    /// the designee heading, in or out of sequence).
    pub fn is_terminator(
        &self,
        raw: &str,
        stripped_lower: &str,
        state: &ParseState,
        patterns: &Patterns,
    ) -> bool {
        (!state.has_sub() && patterns.is_single_level(raw))
            || state.tracker.matches_next(stripped_lower)
            || patterns.is_designee(stripped_lower)
    }

    /// Split every buffered line on commas and attach one child per
    /// non-empty name token under the role's top-level section.
    pub fn flush(self, state: &mut ParseState) {
        for line in &self.lines {
            for token in line.split(',') {
                let name = token.trim();
                if !name.is_empty() {
                    state.push_top_child(name);
                }
            }
        }
    }
}
