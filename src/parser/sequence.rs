//! Positional tracking of the canonical top-level keyword sequence.

/// Ordered top-level keywords legacy documents are expected to follow
/// (lowercase, compared with startswith after numeric-prefix stripping).
pub const TOP_LEVEL_SEQUENCE: &[&str] = &[
    "purpose",
    "scope",
    "definitions",
    "process owner",
    "procedures",
    "references",
    "related documents",
    "records",
    "policy reference",
    "revisions",
];

/// Monotonic pointer into [`TOP_LEVEL_SEQUENCE`].
///
/// The pointer only ever moves forward, and only when a heading matches the
/// currently expected keyword, so an absent section simply never advances
/// past its slot.
#[derive(Debug, Clone, Default)]
pub struct SequenceTracker {
    next: usize,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The keyword the next top-level heading is expected to start with.
    pub fn next_expected(&self) -> Option<&'static str> {
        TOP_LEVEL_SEQUENCE.get(self.next).copied()
    }

    /// True when `stripped_lower` starts with the expected keyword.
    pub fn matches_next(&self, stripped_lower: &str) -> bool {
        self.next_expected()
            .is_some_and(|kw| stripped_lower.starts_with(kw))
    }

    /// Advance by exactly one position if the heading matches the expected
    /// keyword. Returns whether the pointer moved.
    pub fn advance_if_matched(&mut self, stripped_lower: &str) -> bool {
        if self.matches_next(stripped_lower) {
            self.next += 1;
            true
        } else {
            false
        }
    }

    /// Jump the pointer directly past `keyword`, regardless of the current
    /// position. Used when a heading is promoted out of sequence, e.g. a
    /// designee block. Unknown keywords leave the pointer untouched.
    pub fn force_after(&mut self, keyword: &str) {
        if let Some(idx) = TOP_LEVEL_SEQUENCE.iter().position(|kw| *kw == keyword) {
            self.next = idx + 1;
        }
    }
}
