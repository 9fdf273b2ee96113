use super::*;
use crate::error::ConditionError;
use crate::runs::plain_text;

const T: &str = TRUE_PLACE_HOLDER;
const F: &str = FALSE_PLACE_HOLDER;

fn fields(values: &[(&str, &str)]) -> Vec<FieldValue> {
    values
        .iter()
        .map(|(name, text)| FieldValue::new(*name, *text))
        .collect()
}

#[test]
fn substitution_marks_filled_and_empty_fields() {
    let fields = fields(&[("a", "1"), ("b", "")]);
    assert_eq!(substitute_fields("a+b", &fields), format!("{T}+{F}"));
    assert_eq!(substitute_fields("!a|!b", &fields), format!("{F}|{T}"));
}

#[test]
fn substitution_prefers_longer_names() {
    let fields = fields(&[("page", ""), ("pages", "12-14")]);
    assert_eq!(substitute_fields("pages", &fields), T);
    assert_eq!(substitute_fields("page|pages", &fields), format!("{F}|{T}"));
}

#[test]
fn substitution_never_rewrites_place_holders() {
    // "STATEMENT" appears inside both place holders
    let fields = fields(&[("x", "1"), ("STATEMENT", "")]);
    assert_eq!(substitute_fields("x|STATEMENT", &fields), format!("{T}|{F}"));
}

#[test]
fn line_statement_or_needs_one_true_term() {
    assert!(evaluate_line_statement(&format!("{F}|{T}")));
    assert!(!evaluate_line_statement(&format!("{F}|{F}")));
}

#[test]
fn line_statement_and_needs_every_term() {
    assert!(evaluate_line_statement(&format!("{T}+{T}")));
    assert!(!evaluate_line_statement(&format!("{T}+{F}")));
}

#[test]
fn line_statement_and_overrides_or_without_parentheses() {
    // T|T+T splits on '+' only, and "T|T" is not a single true term
    assert!(!evaluate_line_statement(&format!("{T}|{T}+{T}")));
    assert!(!evaluate_line_statement(&format!("{T}+{F}|{T}")));
}

#[test]
fn condition_reduces_inner_groups_first() {
    assert_eq!(evaluate_condition(&format!("({F}+{T})|{T}")), Ok(true));
    assert_eq!(evaluate_condition(&format!("({F}+{T})|{F}")), Ok(false));
    assert_eq!(
        evaluate_condition(&format!("(({T}|{F})+({F}|{T}))+{T}")),
        Ok(true)
    );
}

#[test]
fn condition_single_place_holder() {
    assert_eq!(evaluate_condition(T), Ok(true));
    assert_eq!(evaluate_condition(F), Ok(false));
    assert_eq!(evaluate_condition(""), Ok(false));
}

#[test]
fn condition_rejects_unbalanced_parentheses() {
    assert_eq!(
        evaluate_condition(&format!("({T}")),
        Err(ConditionError::UnclosedParen { position: 0 })
    );
    assert!(matches!(
        evaluate_condition(&format!("{T})")),
        Err(ConditionError::UnexpectedClosingParen { .. })
    ));
}

#[test]
fn condition_is_deterministic() {
    let expression = format!("({T}|{F})+!{F}");
    let first = evaluate_condition(&expression);
    for _ in 0..5 {
        assert_eq!(evaluate_condition(&expression), first);
    }
}

#[test]
fn and_requires_both_fields() {
    assert!(!condition_holds("a+b", &fields(&[("a", "1"), ("b", "")])));
    assert!(condition_holds("a+b", &fields(&[("a", "1"), ("b", "2")])));
}

#[test]
fn or_requires_either_field() {
    assert!(condition_holds("a|b", &fields(&[("a", ""), ("b", "2")])));
    assert!(!condition_holds("a|b", &fields(&[("a", ""), ("b", "")])));
}

#[test]
fn parenthesized_and_inside_or() {
    let values = fields(&[("a", ""), ("b", "yes"), ("c", "yes")]);
    assert!(condition_holds("(a+b)|c", &values));
}

#[test]
fn negation_checks_for_empty_field() {
    let values = fields(&[("editor", "")]);
    assert!(condition_holds("!editor", &values));
    assert!(!condition_holds("editor", &values));
}

#[test]
fn absent_fields_behave_like_empty_ones() {
    let values = fields(&[("a", "1")]);
    assert!(!condition_holds("missing", &values));
    assert!(condition_holds("!missing", &values));
    assert!(!condition_holds("a+missing", &values));
}

#[test]
fn malformed_condition_is_false() {
    let values = fields(&[("a", "1")]);
    assert!(!condition_holds("(a", &values));
    assert!(!condition_holds("a)", &values));
}

#[test]
fn whitespace_around_terms_makes_them_false() {
    let values = fields(&[("a", "1"), ("b", "2")]);
    assert!(!condition_holds("a + b", &values));
    assert!(!condition_holds(" a", &values));
    assert!(condition_holds("a+b", &values));
    assert_eq!(plain_text(&expand("{?a + b:X}", &values)), "");
}

#[test]
fn resolved_groups_cannot_be_negated() {
    assert_eq!(evaluate_condition(&format!("!({F})")), Ok(false));
    assert_eq!(evaluate_condition(&format!("!({T})")), Ok(false));
    assert!(!evaluate_line_statement(&format!("!{F}")));
}
