use super::{RunList, StyledFragment, split_text};

/// Inserts `fragments` before `index`, keeping the order they are given in.
pub fn insert_ordered(runs: &mut RunList, fragments: Vec<StyledFragment>, index: usize) {
    let index = index.min(runs.len());
    for (offset, fragment) in fragments.into_iter().enumerate() {
        runs.insert(index + offset, fragment);
    }
}

/// Inserts every fragment at `index` in turn, so the last one given ends up
/// first in the list.
pub fn insert_reversed(runs: &mut RunList, fragments: Vec<StyledFragment>, index: usize) {
    let index = index.min(runs.len());
    for fragment in fragments {
        runs.insert(index, fragment);
    }
}

/// Places `pre`, `replacement`, `post` at `index` in that reading order.
pub fn insert_reversed_triple(
    runs: &mut RunList,
    pre: StyledFragment,
    replacement: StyledFragment,
    post: StyledFragment,
    index: usize,
) {
    insert_reversed(runs, vec![post, replacement, pre], index);
}

/// Replaces the first occurrence of `find` with `replacement`.
///
/// Fragments are inspected one at a time, so a match never spans two
/// fragments. The text around the match stays in place with the style of the
/// fragment it came from. Returns `false` without touching `runs` when no
/// fragment contains `find`.
pub fn replace_first_occurrence(
    runs: &mut RunList,
    find: &str,
    replacement: StyledFragment,
) -> bool {
    if find.is_empty() {
        return false;
    }

    for idx in 0..runs.len() {
        let original = &runs[idx];
        if original.is_marker() {
            continue;
        }
        let Some(byte_idx) = original.text.find(find) else {
            continue;
        };

        let pre = original.with_text(original.text[..byte_idx].to_string());
        let post = original.with_text(original.text[byte_idx + find.len()..].to_string());

        runs.remove(idx);
        insert_reversed_triple(runs, pre, replacement, post, idx);
        return true;
    }

    false
}

/// Splits the fragment at `index` after `offset` chars and puts `fragment`
/// between the two halves. An `index` past the end appends `fragment`; a
/// marker at `index` is not split, `fragment` goes in front of it.
pub fn split_insert(runs: &mut RunList, index: usize, offset: usize, fragment: StyledFragment) {
    if index >= runs.len() {
        runs.push(fragment);
        return;
    }
    if runs[index].is_marker() {
        runs.insert(index, fragment);
        return;
    }

    let original = runs.remove(index);
    let (left_text, right_text) = split_text(&original.text, offset);
    let pre = original.with_text(left_text);
    let post = original.with_text(right_text);
    insert_reversed_triple(runs, pre, fragment, post, index);
}
