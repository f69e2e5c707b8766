//! Single-pass paragraph classifier and section-tree builder.
//!
//! Paragraphs are consumed strictly in document order. Each one is matched
//! against a fixed priority ladder; an active name capture intercepts the
//! paragraph first and may hand it back for exactly one re-classification
//! after flushing.

use crate::models::{LegacyDocument, Paragraph, ParsedProcedure, RevisionHistory};
use crate::Result;

use super::capture::{CaptureRole, NameCapture};
use super::patterns::{normalize, strip_numeric_prefix, Patterns};
use super::revision::reconcile_revision_history;
use super::state::{ParseState, TopMode};

/// Headings discarded outright wherever they appear, e.g. a stray table
/// caption floating mid-document.
const SKIP_HEADINGS: &[&str] = &["revision history"];

/// Parse one legacy document into the canonical section tree.
///
/// The only fatal failure is pattern compilation; structural surprises in
/// the input degrade to diagnostics and a best-effort tree, so a batch
/// caller can keep going per document.
pub fn parse_document(doc: &LegacyDocument) -> Result<ParsedProcedure> {
    let patterns = Patterns::new()?;

    let paras: Vec<&Paragraph> = doc
        .paragraphs
        .iter()
        .filter(|p| !p.text.trim().is_empty())
        .collect();

    if paras.is_empty() {
        eprintln!("Warning: document contains no paragraphs");
        return Ok(ParsedProcedure {
            document_title: String::new(),
            purpose_scope: String::new(),
            sections: Vec::new(),
            revision_history: RevisionHistory::empty(),
        });
    }

    let document_title = match paras.iter().find(|p| p.emphasized) {
        Some(p) => p.text.trim().to_string(),
        None => {
            eprintln!("Warning: no emphasized title paragraph; using first line");
            paras[0].text.trim().to_string()
        }
    };

    let (purpose_scope, start) = extract_purpose_scope(&paras);

    let mut state = ParseState::new();
    if start > 0 {
        // the pass begins at the Definitions anchor, so purpose/scope have
        // already been consumed
        state.tracker.force_after("scope");
    }

    for para in &paras[start..] {
        classify(para, &mut state, &patterns);
    }

    // End of input closes any still-open name block.
    if let Some(capture) = state.capture.take() {
        capture.flush(&mut state);
    }

    let revision_history =
        reconcile_revision_history(&mut state, doc.trailing_table.as_deref());

    Ok(ParsedProcedure {
        document_title,
        purpose_scope,
        sections: state.into_sections(),
        revision_history,
    })
}

/// Locate the "Purpose and Scope" and "Definitions" anchor headings and
/// lift the text between them out of the classification pass.
///
/// Returns the extracted block and the paragraph index the pass should
/// start from. When either anchor is missing the block is empty and the
/// pass covers the whole document.
fn extract_purpose_scope(paras: &[&Paragraph]) -> (String, usize) {
    let starts_with = |p: &Paragraph, kw: &str| {
        normalize(strip_numeric_prefix(&p.text)).starts_with(kw)
    };

    let purpose_idx = paras.iter().position(|p| starts_with(p, "purpose"));
    let definitions_idx = purpose_idx.and_then(|from| {
        paras[from + 1..]
            .iter()
            .position(|p| starts_with(p, "definitions"))
            .map(|i| from + 1 + i)
    });

    match (purpose_idx, definitions_idx) {
        (Some(p), Some(d)) => {
            let block = paras[p + 1..d]
                .iter()
                .map(|p| p.text.trim())
                .collect::<Vec<_>>()
                .join("\n");
            (block, d)
        }
        _ => {
            eprintln!("Warning: purpose/scope anchors not found; parsing from document start");
            (String::new(), 0)
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Consumed,
    /// A capture flush closed one node; the same paragraph must be
    /// classified once more to open the next.
    Reprocess,
}

/// Classify one paragraph, allowing the single bounded re-entry after a
/// capture flush.
pub(crate) fn classify(para: &Paragraph, state: &mut ParseState, patterns: &Patterns) {
    if classify_once(para, state, patterns) == Outcome::Reprocess {
        // capture is gone after the flush, so this cannot recurse further
        classify_once(para, state, patterns);
    }
}

fn classify_once(para: &Paragraph, state: &mut ParseState, patterns: &Patterns) -> Outcome {
    let raw = para.text.trim();
    let stripped = strip_numeric_prefix(raw);
    let low = normalize(stripped);

    // 1. An armed name block intercepts everything until a terminator.
    if let Some(capture) = state.capture.take() {
        if capture.is_terminator(raw, &low, state, patterns) {
            capture.flush(state);
            return Outcome::Reprocess;
        }
        let mut capture = capture;
        capture.push_line(raw);
        state.capture = Some(capture);
        return Outcome::Consumed;
    }

    // 2. Stray captions are discarded entirely.
    if SKIP_HEADINGS.contains(&low.as_str()) {
        return Outcome::Consumed;
    }

    // 3. Fresh single-level numeric heading, outside any subclause.
    if !state.has_sub() && patterns.is_single_level(raw) {
        promote_to_top(raw, &low, state, patterns);
        return Outcome::Consumed;
    }

    // 4. Keyword heading at the expected sequence slot (covers keyword
    //    headings lacking a numeric prefix, e.g. a bold "Records").
    if state.tracker.matches_next(&low) {
        promote_to_top(raw, &low, state, patterns);
        return Outcome::Consumed;
    }

    // Designee headings are promoted out of sequence; the tracker jumps
    // past "process owner" so the block still terminates on "Procedures".
    if patterns.is_designee(&low) {
        promote_to_top(raw, &low, state, patterns);
        return Outcome::Consumed;
    }

    // 5. Special attachment rules under Definitions / Records / Policy
    //    Reference tops.
    match state.top_mode() {
        Some(TopMode::Definitions) => {
            handle_definition(raw, state);
            return Outcome::Consumed;
        }
        Some(TopMode::Records) if para.emphasized => {
            // records lists stay flat, even for subclause-shaped lines
            state.append_top_content(raw);
            return Outcome::Consumed;
        }
        Some(TopMode::PolicyReference) => {
            if para.emphasized {
                state.attach_sub(raw);
            } else {
                state.append_content(raw);
            }
            return Outcome::Consumed;
        }
        _ => {}
    }

    // 6. "x.y.z" opens a sub-subclause only under an open, emphasized
    //    context; orphans degrade to plain content, never a new node.
    if patterns.is_three_level(raw) {
        if para.emphasized && state.has_sub() {
            state.attach_subsub(raw);
        } else {
            state.append_content(raw);
        }
        return Outcome::Consumed;
    }

    // 7. "x.y" opens a new subclause under the current top.
    if patterns.is_two_level(raw) && para.emphasized {
        state.attach_sub(raw);
        return Outcome::Consumed;
    }

    // 8. Any other emphasized line: a heading only when nothing deeper is
    //    open; bold emphasis inside a structured block is body text.
    if para.emphasized {
        if state.has_sub() {
            state.append_content(raw);
        } else {
            state.attach_sub(raw);
        }
        return Outcome::Consumed;
    }

    // 9. Plain text lands on the deepest active node.
    state.append_content(raw);
    Outcome::Consumed
}

/// Create a top-level section and arm the owner/designee capture when the
/// heading names one of the role sections.
fn promote_to_top(raw: &str, low: &str, state: &mut ParseState, patterns: &Patterns) {
    if patterns.is_designee(low) {
        state.create_top(raw, Some("process owner"));
        state.capture = Some(NameCapture::new(CaptureRole::Designee));
    } else {
        state.create_top(raw, None);
        if low.starts_with("process owner") {
            state.capture = Some(NameCapture::new(CaptureRole::Owner));
        }
    }
}

/// Definitions wrap across paragraph breaks: a colon starts a new entry, a
/// colon-less paragraph continues the previous entry's heading.
fn handle_definition(raw: &str, state: &mut ParseState) {
    if raw.contains(':') || !state.has_sub() {
        state.attach_sub(raw);
    } else {
        state.extend_sub_heading(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionNode;

    fn parse(paragraphs: Vec<Paragraph>) -> ParsedProcedure {
        parse_document(&LegacyDocument {
            paragraphs,
            trailing_table: None,
        })
        .unwrap()
    }

    fn section<'a>(parsed: &'a ParsedProcedure, heading: &str) -> &'a SectionNode {
        parsed
            .sections
            .iter()
            .find(|s| s.heading == heading)
            .unwrap_or_else(|| panic!("no section '{heading}'"))
    }

    #[test]
    fn test_owner_round_trip() {
        let parsed = parse(vec![
            Paragraph::bold("3. Process Owner"),
            Paragraph::plain("Alice, Bob"),
            Paragraph::bold("4. Procedures"),
        ]);

        let owner = section(&parsed, "3. Process Owner");
        let names: Vec<&str> = owner.children.iter().map(|c| c.heading.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(parsed.sections.last().unwrap().heading, "4. Procedures");
    }

    #[test]
    fn test_owner_block_flushed_at_end_of_input() {
        let parsed = parse(vec![
            Paragraph::bold("3. Process Owner"),
            Paragraph::plain("Alice"),
        ]);

        let owner = section(&parsed, "3. Process Owner");
        assert_eq!(owner.children.len(), 1);
        assert_eq!(owner.children[0].heading, "Alice");
    }

    #[test]
    fn test_owner_block_terminated_by_designee_block() {
        let parsed = parse(vec![
            Paragraph::bold("3. Process Owner"),
            Paragraph::plain("Alice"),
            Paragraph::bold("Process Designees"),
            Paragraph::plain("Bob, Carol"),
            Paragraph::bold("4. Procedures"),
        ]);

        assert_eq!(section(&parsed, "3. Process Owner").children.len(), 1);
        let designees = section(&parsed, "Process Designees");
        let names: Vec<&str> = designees
            .children
            .iter()
            .map(|c| c.heading.as_str())
            .collect();
        assert_eq!(names, vec!["Bob", "Carol"]);
        assert_eq!(parsed.sections.last().unwrap().heading, "4. Procedures");
    }

    #[test]
    fn test_definitions_continuation() {
        let parsed = parse(vec![
            Paragraph::bold("2. Definitions"),
            Paragraph::plain("Widget: a thing"),
            Paragraph::plain("that spins"),
            Paragraph::plain("Gadget: another thing"),
        ]);

        let defs = section(&parsed, "2. Definitions");
        assert_eq!(defs.children.len(), 2);
        assert_eq!(defs.children[0].heading, "Widget: a thing that spins");
        assert_eq!(defs.children[1].heading, "Gadget: another thing");
    }

    #[test]
    fn test_records_stay_flat() {
        let parsed = parse(vec![
            Paragraph::bold("6. Records"),
            Paragraph::bold("6.1 Retention"),
            Paragraph::plain("kept for five years"),
        ]);

        let records = section(&parsed, "6. Records");
        assert!(records.children.is_empty());
        assert_eq!(records.content, vec!["6.1 Retention", "kept for five years"]);
    }

    #[test]
    fn test_subclause_and_subsubclause_nesting() {
        let parsed = parse(vec![
            Paragraph::bold("4. Procedures"),
            Paragraph::bold("4.1 Setup"),
            Paragraph::plain("prepare the bench"),
            Paragraph::bold("4.1.1 Calibration"),
            Paragraph::plain("zero the scale"),
            Paragraph::bold("4.2 Teardown"),
        ]);

        let proc = section(&parsed, "4. Procedures");
        assert_eq!(proc.children.len(), 2);
        let setup = &proc.children[0];
        assert_eq!(setup.content, vec!["prepare the bench"]);
        assert_eq!(setup.children[0].heading, "4.1.1 Calibration");
        assert_eq!(setup.children[0].content, vec!["zero the scale"]);
    }

    #[test]
    fn test_orphan_sub_subclause_becomes_content() {
        let parsed = parse(vec![
            Paragraph::bold("4. Procedures"),
            Paragraph::bold("4.1.1 Calibration"),
        ]);

        let proc = section(&parsed, "4. Procedures");
        assert!(proc.children.is_empty());
        assert_eq!(proc.content, vec!["4.1.1 Calibration"]);
    }

    #[test]
    fn test_emphasis_inside_subclause_is_body_text() {
        let parsed = parse(vec![
            Paragraph::bold("4. Procedures"),
            Paragraph::bold("4.1 Setup"),
            Paragraph::bold("Important"),
        ]);

        let setup = &section(&parsed, "4. Procedures").children[0];
        assert_eq!(setup.content, vec!["Important"]);
    }

    #[test]
    fn test_keyword_heading_without_numeric_prefix() {
        let parsed = parse(vec![
            Paragraph::bold("Purpose and Scope"),
            Paragraph::plain("Why we do this."),
            Paragraph::bold("Scope"),
            Paragraph::plain("Where it applies."),
        ]);

        // no Definitions anchor, so the pass covers the whole stream
        assert_eq!(parsed.purpose_scope, "");
        assert_eq!(parsed.sections[0].heading, "Purpose and Scope");
        assert_eq!(parsed.sections[1].heading, "Scope");
        assert_eq!(parsed.sections[1].content, vec!["Where it applies."]);
    }

    #[test]
    fn test_stray_revision_history_caption_discarded() {
        let parsed = parse(vec![
            Paragraph::bold("4. Procedures"),
            Paragraph::bold("Revision History"),
            Paragraph::plain("body line"),
        ]);

        assert_eq!(parsed.sections.len(), 1);
        let proc = &parsed.sections[0];
        assert!(proc.children.is_empty());
        assert_eq!(proc.content, vec!["body line"]);
    }

    #[test]
    fn test_content_before_any_heading_is_dropped() {
        let parsed = parse(vec![
            Paragraph::plain("floating preamble"),
            Paragraph::bold("4. Procedures"),
        ]);

        assert_eq!(parsed.sections.len(), 1);
        assert!(parsed.sections[0].content.is_empty());
    }

    #[test]
    fn test_title_falls_back_to_first_paragraph() {
        let parsed = parse(vec![
            Paragraph::plain("Legacy Procedure 42"),
            Paragraph::plain("body"),
        ]);
        assert_eq!(parsed.document_title, "Legacy Procedure 42");
    }

    #[test]
    fn test_purpose_scope_block_extraction() {
        let parsed = parse(vec![
            Paragraph::bold("Quality Procedure"),
            Paragraph::bold("1. Purpose and Scope"),
            Paragraph::plain("Defines widget handling."),
            Paragraph::plain("Applies to all sites."),
            Paragraph::bold("2. Definitions"),
            Paragraph::plain("Widget: a thing"),
        ]);

        assert_eq!(
            parsed.purpose_scope,
            "Defines widget handling.\nApplies to all sites."
        );
        // the pass starts at the Definitions anchor
        assert_eq!(parsed.sections[0].heading, "2. Definitions");
        assert_eq!(parsed.sections[0].children[0].heading, "Widget: a thing");
    }

    #[test]
    fn test_empty_document() {
        let parsed = parse(vec![Paragraph::plain("   ")]);
        assert_eq!(parsed.document_title, "");
        assert!(parsed.sections.is_empty());
        assert_eq!(parsed.revision_history, RevisionHistory::empty());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let paragraphs = vec![
            Paragraph::bold("1. Purpose"),
            Paragraph::plain("intro"),
            Paragraph::bold("2. Definitions"),
            Paragraph::plain("Widget: a thing"),
            Paragraph::bold("3. Process Owner"),
            Paragraph::plain("Alice, Bob"),
            Paragraph::bold("4. Procedures"),
            Paragraph::bold("4.1 Setup"),
        ];
        let first = parse(paragraphs.clone());
        let second = parse(paragraphs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sections_follow_encounter_order() {
        let parsed = parse(vec![
            Paragraph::bold("1. Purpose"),
            Paragraph::bold("4. Procedures"),
            Paragraph::bold("6. Records"),
            Paragraph::bold("8. Revisions"),
        ]);
        let headings: Vec<&str> = parsed.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec!["1. Purpose", "4. Procedures", "6. Records", "8. Revisions"]
        );
    }
}
