use tracing::{debug, warn};

use super::condition::condition_holds;
use super::{CONDITION_AND_OUTPUT_SEPARATOR, FieldValue, IF, NAME_REFERENCE};
use crate::runs::{RunList, StyledFragment, replace_first_occurrence};

/// Every `{<marker>...}` placeholder in `template`, in order of appearance.
fn placeholders(template: &str, marker: char) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = 0;
    while let Some(start) = template[rest..].find('{').map(|idx| rest + idx) {
        let body_start = start + 1;
        if !template[body_start..].starts_with(marker) {
            rest = body_start;
            continue;
        }
        let Some(end) = template[body_start..].find('}').map(|idx| body_start + idx) else {
            break;
        };
        found.push(&template[start..=end]);
        rest = end + 1;
    }
    found
}

/// `{@name}` placeholders, in order of appearance.
pub fn field_references(template: &str) -> Vec<&str> {
    placeholders(template, NAME_REFERENCE)
}

/// `{?condition:output}` placeholders, in order of appearance.
pub fn conditionals(template: &str) -> Vec<&str> {
    placeholders(template, IF)
}

/// Expands a template into a fresh run list.
///
/// Field references are resolved first, then conditionals. References to
/// fields that were not supplied expand to nothing.
pub fn expand(template: &str, fields: &[FieldValue]) -> RunList {
    let mut runs = vec![StyledFragment::plain(template)];
    resolve_field_references(&mut runs, template, fields);
    resolve_conditionals(&mut runs, template, fields);
    runs
}

pub fn resolve_field_references(runs: &mut RunList, template: &str, fields: &[FieldValue]) {
    for placeholder in field_references(template) {
        let name = &placeholder[2..placeholder.len() - 1];
        let replacement = match fields.iter().find(|field| field.name == name) {
            Some(field) => StyledFragment::styled(field.text.clone(), field.bold, field.italic),
            None => {
                debug!(field = name, "template references a field that was not supplied");
                StyledFragment::empty()
            }
        };
        replace_first_occurrence(runs, placeholder, replacement);
    }
}

fn resolve_conditionals(runs: &mut RunList, template: &str, fields: &[FieldValue]) {
    for placeholder in conditionals(template) {
        let body = &placeholder[2..placeholder.len() - 1];
        let Some((condition, output)) = body.split_once(CONDITION_AND_OUTPUT_SEPARATOR) else {
            warn!(placeholder, "conditional has no separator, leaving it untouched");
            continue;
        };

        let replacement = if condition_holds(condition, fields) {
            StyledFragment::plain(output)
        } else {
            StyledFragment::empty()
        };
        replace_first_occurrence(runs, placeholder, replacement);
    }
}
