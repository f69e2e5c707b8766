//! Final revision-history reconciliation.
//!
//! Runs once, after every paragraph has been consumed, and may retroactively
//! clear trailing content from the node that absorbed revision text.

use crate::models::RevisionHistory;

use super::state::ParseState;

/// Classify the revision history as table-backed or written.
///
/// With a trailing table the rows are taken verbatim (header included) and
/// any lines speculatively accumulated on the revisions node are discarded
/// as table-adjacent stray text. Without one, the revisions node's content
/// is moved (not copied) into the written variant. Text only counts as
/// revision history when it is anchored under a heading that literally
/// mentions "revision".
pub fn reconcile_revision_history(
    state: &mut ParseState,
    trailing_table: Option<&[Vec<String>]>,
) -> RevisionHistory {
    match trailing_table {
        Some(rows) => {
            if let Some(node) = state.revision_node_mut() {
                node.content.clear();
            }
            RevisionHistory::Table {
                rows: rows.to_vec(),
            }
        }
        None => match state.revision_node_mut() {
            Some(node) => RevisionHistory::Written {
                lines: std::mem::take(&mut node.content),
            },
            None => RevisionHistory::empty(),
        },
    }
}
