//! Conversion between `tdoc` documents and run lists.
//!
//! Bold and italic become fragment flags; other inline styles are dropped.
//! Footnote markers are stored in the document as links to `#footnote-<id>`
//! whose text is the reference glyph, and read back as zero-width markers.

use tdoc::{Document, InlineStyle, Paragraph, Span};

use crate::runs::{FootnoteId, RunList, StyledFragment};

const FOOTNOTE_LINK_PREFIX: &str = "#footnote-";

pub fn paragraphs_from_document(document: &Document) -> Vec<RunList> {
    document
        .paragraphs
        .iter()
        .map(|paragraph| runs_from_spans(paragraph.content()))
        .collect()
}

pub fn runs_from_spans(spans: &[Span]) -> RunList {
    let mut runs = Vec::new();
    for span in spans {
        collect_span(span, false, false, &mut runs);
    }
    runs
}

fn collect_span(span: &Span, bold: bool, italic: bool, runs: &mut RunList) {
    if let Some(id) = footnote_id(span) {
        runs.push(StyledFragment::footnote_marker(id));
        return;
    }

    let bold = bold || span.style == InlineStyle::Bold;
    let italic = italic || span.style == InlineStyle::Italic;
    if !span.text.is_empty() {
        runs.push(StyledFragment::styled(span.text.clone(), bold, italic));
    }
    for child in &span.children {
        collect_span(child, bold, italic, runs);
    }
}

fn footnote_id(span: &Span) -> Option<FootnoteId> {
    if span.style != InlineStyle::Link {
        return None;
    }
    span.link_target
        .as_deref()?
        .strip_prefix(FOOTNOTE_LINK_PREFIX)?
        .parse()
        .ok()
}

pub fn footnote_glyph(id: FootnoteId) -> String {
    format!("[{id}]")
}

pub fn spans_from_runs(runs: &[StyledFragment]) -> Vec<Span> {
    runs.iter()
        .filter(|fragment| fragment.is_marker() || !fragment.text.is_empty())
        .map(span_from_fragment)
        .collect()
}

fn span_from_fragment(fragment: &StyledFragment) -> Span {
    if let Some(id) = fragment.footnote {
        let mut span = Span::new_styled(InlineStyle::Link).with_text(&footnote_glyph(id));
        span.link_target = Some(format!("{FOOTNOTE_LINK_PREFIX}{id}"));
        return span;
    }

    match (fragment.bold, fragment.italic) {
        (false, false) => Span::new_text(&fragment.text),
        (true, false) => Span::new_styled(InlineStyle::Bold).with_text(&fragment.text),
        (false, true) => Span::new_styled(InlineStyle::Italic).with_text(&fragment.text),
        (true, true) => Span::new_styled(InlineStyle::Bold)
            .with_children(vec![Span::new_styled(InlineStyle::Italic).with_text(&fragment.text)]),
    }
}

/// Replaces the content of the first `paragraphs.len()` top-level
/// paragraphs.
///
/// Inline styles other than bold, italic and footnote links do not survive,
/// so prefer [`write_paragraph`] when only one paragraph changed.
pub fn write_paragraphs(document: &mut Document, paragraphs: &[RunList]) {
    for (index, runs) in paragraphs.iter().enumerate() {
        write_paragraph(document, index, runs);
    }
}

/// Replaces the content of top-level paragraph `index`, leaving every other
/// paragraph untouched. Returns `false` if there is no such paragraph.
pub fn write_paragraph(document: &mut Document, index: usize, runs: &[StyledFragment]) -> bool {
    match document.paragraphs.get_mut(index) {
        Some(paragraph) => {
            *paragraph.content_mut() = spans_from_runs(runs);
            true
        }
        None => false,
    }
}

pub fn append_paragraphs(document: &mut Document, paragraphs: &[RunList]) {
    for runs in paragraphs {
        document.add_paragraph(Paragraph::new_text().with_content(spans_from_runs(runs)));
    }
}
