use super::*;
use pretty_assertions::assert_eq;

fn paragraphs(texts: &[&str]) -> Vec<RunList> {
    texts
        .iter()
        .map(|text| {
            if text.is_empty() {
                Vec::new()
            } else {
                vec![StyledFragment::plain(*text)]
            }
        })
        .collect()
}

#[test]
fn document_text_joins_paragraphs_with_newlines() {
    let doc = paragraphs(&["Hello", "World"]);
    assert_eq!(document_text(&doc), "Hello\nWorld");
    assert_eq!(document_len(&doc), 11);
}

#[test]
fn locate_end_of_first_paragraph() {
    let doc = paragraphs(&["Hello", "World"]);
    assert_eq!(
        locate(&doc, 5),
        Ok(FootnoteLocation {
            paragraph: 0,
            fragment: 0,
            offset: 5
        })
    );
}

#[test]
fn locate_start_of_second_paragraph() {
    let doc = paragraphs(&["Hello", "World"]);
    assert_eq!(
        locate(&doc, 6),
        Ok(FootnoteLocation {
            paragraph: 1,
            fragment: 0,
            offset: 0
        })
    );
}

#[test]
fn locate_last_valid_offset() {
    let doc = paragraphs(&["Hello", "World"]);
    assert_eq!(
        locate(&doc, 11),
        Ok(FootnoteLocation {
            paragraph: 1,
            fragment: 0,
            offset: 5
        })
    );
}

#[test]
fn locate_past_the_end_fails() {
    let doc = paragraphs(&["Hello", "World"]);
    assert_eq!(
        locate(&doc, 12),
        Err(FootnoteError::PositionOutOfRange {
            position: 12,
            length: 11
        })
    );
}

#[test]
fn locate_in_empty_document_fails() {
    assert!(locate(&[], 0).is_err());
}

#[test]
fn locate_boundary_between_fragments_picks_earlier_one() {
    let doc = vec![vec![
        StyledFragment::plain("ab"),
        StyledFragment::styled("cd", true, false),
    ]];
    assert_eq!(
        locate(&doc, 2),
        Ok(FootnoteLocation {
            paragraph: 0,
            fragment: 0,
            offset: 2
        })
    );
    assert_eq!(
        locate(&doc, 3),
        Ok(FootnoteLocation {
            paragraph: 0,
            fragment: 1,
            offset: 1
        })
    );
}

#[test]
fn locate_empty_paragraph_is_a_target() {
    let doc = paragraphs(&["Hello", "", "World"]);
    assert_eq!(
        locate(&doc, 6),
        Ok(FootnoteLocation {
            paragraph: 1,
            fragment: 0,
            offset: 0
        })
    );
    assert_eq!(
        locate(&doc, 7),
        Ok(FootnoteLocation {
            paragraph: 2,
            fragment: 0,
            offset: 0
        })
    );
}

#[test]
fn locate_counts_chars() {
    let doc = paragraphs(&["Ünï", "cödé"]);
    assert_eq!(
        locate(&doc, 5),
        Ok(FootnoteLocation {
            paragraph: 1,
            fragment: 0,
            offset: 1
        })
    );
}

#[test]
fn insert_marker_splits_fragment_and_keeps_style() {
    let mut doc = vec![vec![StyledFragment::styled("Hello", true, false)]];
    let location = insert_marker(&mut doc, 3, 1).unwrap();
    assert_eq!(location.offset, 3);
    assert_eq!(
        doc[0],
        vec![
            StyledFragment::styled("Hel", true, false),
            StyledFragment::footnote_marker(1),
            StyledFragment::styled("lo", true, false),
        ]
    );
    assert_eq!(document_text(&doc), "Hello");
}

#[test]
fn insert_marker_into_empty_paragraph_makes_it_sole_content() {
    let mut doc = paragraphs(&["Hello", ""]);
    insert_marker(&mut doc, 6, 4).unwrap();
    assert_eq!(doc[1], vec![StyledFragment::footnote_marker(4)]);
}

#[test]
fn insert_marker_out_of_range_leaves_document_untouched() {
    let mut doc = paragraphs(&["Hello"]);
    let snapshot = doc.clone();
    assert!(insert_marker(&mut doc, 9, 1).is_err());
    assert_eq!(doc, snapshot);
}

#[test]
fn next_id_follows_highest_existing() {
    assert_eq!(next_footnote_id([1, 3, 4]), 5);
    assert_eq!(next_footnote_id([]), 1);
    assert_eq!(next_footnote_id([7, 2]), 8);
}

#[test]
fn add_footnote_recomputes_ids_from_document() {
    let mut doc = paragraphs(&["First sentence.", "Second sentence."]);

    let first = add_footnote(&mut doc, 15, vec![StyledFragment::plain("one")]).unwrap();
    let second = add_footnote(&mut doc, 32, vec![StyledFragment::plain("two")]).unwrap();
    assert_eq!((first.id, second.id), (1, 2));
    assert_eq!(first.location.paragraph, 0);
    assert_eq!(
        second.location,
        FootnoteLocation {
            paragraph: 1,
            fragment: 0,
            offset: 16
        }
    );
    assert_eq!(marker_ids(&doc), vec![1, 2]);

    // removing a marker out-of-band frees nothing above the maximum
    doc[0].retain(|fragment| fragment.footnote != Some(1));
    let third = add_footnote(&mut doc, 0, Vec::new()).unwrap();
    assert_eq!(third.id, 3);

    doc[1].retain(|fragment| !fragment.is_marker());
    let fourth = add_footnote(&mut doc, 0, Vec::new()).unwrap();
    assert_eq!(fourth.id, 4);
}

#[test]
fn markers_do_not_shift_later_positions() {
    let mut doc = paragraphs(&["abcdef"]);
    insert_marker(&mut doc, 2, 1).unwrap();
    let location = insert_marker(&mut doc, 4, 2).unwrap();
    assert_eq!(location.offset, 2);
    assert_eq!(marker_ids(&doc), vec![1, 2]);
    assert_eq!(document_text(&doc), "abcdef");
}
