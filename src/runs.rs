mod splice;

pub use splice::{
    insert_ordered, insert_reversed, insert_reversed_triple, replace_first_occurrence,
    split_insert,
};

/// Footnote ids are positive and unique within a document.
pub type FootnoteId = u32;

/// A contiguous piece of paragraph text with uniform styling.
///
/// A fragment carrying a footnote id is a marker: its text is empty and it
/// occupies no width in document offsets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledFragment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub footnote: Option<FootnoteId>,
}

/// One paragraph's fragments in reading order.
pub type RunList = Vec<StyledFragment>;

impl StyledFragment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn styled(text: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            footnote: None,
        }
    }

    pub fn footnote_marker(id: FootnoteId) -> Self {
        Self {
            footnote: Some(id),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_marker(&self) -> bool {
        self.footnote.is_some()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Same style, different text. Used for the halves of a split.
    pub(crate) fn with_text(&self, text: String) -> Self {
        Self {
            text,
            bold: self.bold,
            italic: self.italic,
            footnote: self.footnote,
        }
    }
}

pub fn plain_text(runs: &[StyledFragment]) -> String {
    runs.iter().map(|fragment| fragment.text.as_str()).collect()
}

pub fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    for (count, (byte_idx, _)) in text.char_indices().enumerate() {
        if count == char_idx {
            return byte_idx;
        }
    }
    text.len()
}

pub(crate) fn split_text(text: &str, offset: usize) -> (String, String) {
    let byte_idx = char_to_byte_idx(text, offset);
    let left = text[..byte_idx].to_string();
    let right = text[byte_idx..].to_string();
    (left, right)
}

/// Drops empty text fragments and joins neighbours with identical style.
/// Footnote markers are never dropped or merged.
pub fn prune_and_merge(runs: &mut RunList) {
    runs.retain(|fragment| fragment.is_marker() || !fragment.text.is_empty());

    let mut i = 0;
    while i + 1 < runs.len() {
        if can_merge(&runs[i], &runs[i + 1]) {
            let right = runs.remove(i + 1);
            runs[i].text.push_str(&right.text);
        } else {
            i += 1;
        }
    }
}

fn can_merge(left: &StyledFragment, right: &StyledFragment) -> bool {
    !left.is_marker()
        && !right.is_marker()
        && left.bold == right.bold
        && left.italic == right.italic
}
