use std::cmp::Ordering;

use crate::library::CitationSource;
use crate::runs::{RunList, StyledFragment};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceHand {
    Primary,
    Secondary,
}

/// A filled-in source that goes into the bibliography and footnotes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Citation {
    pub name: String,
    pub hand: SourceHand,
    pub source: CitationSource,
}

impl Citation {
    pub fn new(name: impl Into<String>, source: CitationSource, hand: SourceHand) -> Self {
        Self {
            name: name.into(),
            hand,
            source,
        }
    }
}

/// Lays out the bibliography as paragraphs: a heading, then primary and
/// secondary sources each under their own heading, alphabetized.
pub fn build_bibliography(citations: &[Citation]) -> Vec<RunList> {
    let mut paragraphs = vec![heading("Bibliography"), Vec::new()];

    for (hand, title) in [
        (SourceHand::Primary, "Primary Sources"),
        (SourceHand::Secondary, "Secondary Sources"),
    ] {
        let mut entries: Vec<(String, RunList)> = citations
            .iter()
            .filter(|citation| citation.hand == hand)
            .map(|citation| {
                (
                    citation.source.bibliography_preview(),
                    citation.source.bibliography_runs(),
                )
            })
            .collect();
        if entries.is_empty() {
            continue;
        }
        entries.sort_by(|(a, _), (b, _)| compare_entries(a, b));

        paragraphs.push(heading(title));
        paragraphs.push(Vec::new());
        let count = entries.len();
        for (idx, (_, runs)) in entries.into_iter().enumerate() {
            paragraphs.push(runs);
            if idx + 1 < count {
                paragraphs.push(Vec::new());
            }
        }
    }

    paragraphs
}

fn heading(text: &str) -> RunList {
    vec![StyledFragment::styled(text, true, false)]
}

/// Orders entries by their letters only, ignoring case and a leading
/// article.
///
/// Only an article at the very start is dropped; one in the middle of an
/// entry still counts. Every letter takes part in the comparison, so entries
/// sharing a first letter are still ordered among themselves.
pub fn compare_entries(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(entry: &str) -> Vec<char> {
    let trimmed = entry.trim_start();
    let without_article = ["The ", "A ", "An "]
        .iter()
        .find_map(|article| trimmed.strip_prefix(article))
        .unwrap_or(trimmed);
    without_article
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}
