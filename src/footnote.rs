//! Placing footnote markers at plain-text offsets.
//!
//! Offsets count chars of the document text as produced by
//! [`document_text`]: fragment texts in order, with one newline between
//! paragraphs. Markers themselves are zero width.

use tracing::debug;

use crate::error::FootnoteError;
use crate::runs::{FootnoteId, RunList, StyledFragment, plain_text, split_insert};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FootnoteLocation {
    pub paragraph: usize,
    pub fragment: usize,
    pub offset: usize,
}

/// A footnote body, keyed by the id of the marker that refers to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Footnote {
    pub id: FootnoteId,
    pub content: RunList,
    /// Where the marker went. Only `paragraphs[location.paragraph]` changed.
    pub location: FootnoteLocation,
}

pub fn document_text(paragraphs: &[RunList]) -> String {
    paragraphs
        .iter()
        .map(|runs| plain_text(runs))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn document_len(paragraphs: &[RunList]) -> usize {
    let text: usize = paragraphs
        .iter()
        .flat_map(|runs| runs.iter())
        .map(StyledFragment::char_len)
        .sum();
    text + paragraphs.len().saturating_sub(1)
}

/// Finds the fragment that contains `position`.
///
/// A position on the boundary between two fragments belongs to the earlier
/// one. An empty paragraph is a valid target at its own start and reports
/// fragment 0.
pub fn locate(paragraphs: &[RunList], position: usize) -> Result<FootnoteLocation, FootnoteError> {
    let mut length = 0;
    for (paragraph, runs) in paragraphs.iter().enumerate() {
        for (fragment, run) in runs.iter().enumerate() {
            let n = run.char_len();
            if position <= length + n {
                return Ok(FootnoteLocation {
                    paragraph,
                    fragment,
                    offset: position - length,
                });
            }
            length += n;
        }
        if runs.is_empty() && position <= length {
            return Ok(FootnoteLocation {
                paragraph,
                fragment: 0,
                offset: 0,
            });
        }
        length += 1;
    }

    Err(FootnoteError::PositionOutOfRange {
        position,
        length: document_len(paragraphs),
    })
}

/// Splits the text at `position` and puts a marker for `id` there.
pub fn insert_marker(
    paragraphs: &mut [RunList],
    position: usize,
    id: FootnoteId,
) -> Result<FootnoteLocation, FootnoteError> {
    let location = locate(paragraphs, position)?;
    let runs = &mut paragraphs[location.paragraph];
    split_insert(
        runs,
        location.fragment,
        location.offset,
        StyledFragment::footnote_marker(id),
    );
    debug!(
        id,
        paragraph = location.paragraph,
        fragment = location.fragment,
        offset = location.offset,
        "inserted footnote marker"
    );
    Ok(location)
}

pub fn marker_ids(paragraphs: &[RunList]) -> Vec<FootnoteId> {
    paragraphs
        .iter()
        .flat_map(|runs| runs.iter())
        .filter_map(|fragment| fragment.footnote)
        .collect()
}

pub fn next_footnote_id(existing: impl IntoIterator<Item = FootnoteId>) -> FootnoteId {
    existing.into_iter().max().unwrap_or(0) + 1
}

/// Inserts a marker with the next free id and returns the footnote for it.
///
/// The id is worked out from the markers present in `paragraphs` right now.
pub fn add_footnote(
    paragraphs: &mut [RunList],
    position: usize,
    content: RunList,
) -> Result<Footnote, FootnoteError> {
    let id = next_footnote_id(marker_ids(paragraphs));
    let location = insert_marker(paragraphs, position, id)?;
    Ok(Footnote {
        id,
        content,
        location,
    })
}

#[cfg(test)]
#[path = "footnote_tests.rs"]
mod footnote_tests;
