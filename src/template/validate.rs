use std::fmt;

use super::{CONDITION_AND_OUTPUT_SEPARATOR, MULTIPLE_CONDITIONS_AND, MULTIPLE_CONDITIONS_OR};
use super::expand::conditionals;
use crate::error::TemplateSyntaxError;

/// Checks brace and parenthesis structure in a single pass.
///
/// Parentheses only count inside a placeholder and before its separator.
pub fn validate(template: &str) -> Option<TemplateSyntaxError> {
    let mut parens: i64 = 0;
    let mut braces: i64 = 0;
    let mut inside_brackets = false;
    let mut inside_condition = false;

    for ch in template.chars() {
        let counting = inside_brackets && inside_condition;
        if ch == '(' && counting {
            parens += 1;
        }
        if ch == ')' && counting {
            parens -= 1;
            if parens < 0 {
                return Some(TemplateSyntaxError::UnmatchedClosingParen);
            }
        }
        if ch == '{' {
            braces += 1;
            if braces == 1 {
                inside_brackets = true;
                inside_condition = true;
            }
        }
        if ch == '}' {
            braces -= 1;
        }
        if ch == CONDITION_AND_OUTPUT_SEPARATOR {
            inside_condition = false;
            if parens > 0 {
                return Some(TemplateSyntaxError::UnclosedParenBeforeSeparator);
            }
        }
        if braces > 1 {
            return Some(TemplateSyntaxError::NestedBraces);
        }
        if braces < 0 {
            return Some(TemplateSyntaxError::UnmatchedClosingBrace);
        }
        if braces == 0 {
            inside_brackets = false;
            inside_condition = false;
        }
    }

    None
}

/// Constructs that expand without error but probably not as the author meant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateWarning {
    /// A conditional has no separator and is left in the output verbatim.
    MissingSeparator { placeholder: String },
    /// `+` and `|` share one parenthesis level. `+` wins for the whole level.
    MixedOperators { placeholder: String },
}

impl fmt::Display for TemplateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateWarning::MissingSeparator { placeholder } => {
                write!(f, "{placeholder} has no `:` and is printed as is")
            }
            TemplateWarning::MixedOperators { placeholder } => {
                write!(f, "{placeholder} mixes `+` and `|` without parentheses")
            }
        }
    }
}

pub fn lint(template: &str) -> Vec<TemplateWarning> {
    let mut warnings = Vec::new();
    for placeholder in conditionals(template) {
        let body = &placeholder[2..placeholder.len() - 1];
        let Some((condition, _)) = body.split_once(CONDITION_AND_OUTPUT_SEPARATOR) else {
            warnings.push(TemplateWarning::MissingSeparator {
                placeholder: placeholder.to_string(),
            });
            continue;
        };
        if mixes_operators(condition) {
            warnings.push(TemplateWarning::MixedOperators {
                placeholder: placeholder.to_string(),
            });
        }
    }
    warnings
}

fn mixes_operators(condition: &str) -> bool {
    // (saw_and, saw_or) per open parenthesis level
    let mut levels = vec![(false, false)];
    for ch in condition.chars() {
        match ch {
            '(' => levels.push((false, false)),
            ')' => {
                if levels.len() > 1 {
                    levels.pop();
                }
            }
            MULTIPLE_CONDITIONS_AND | MULTIPLE_CONDITIONS_OR => {
                let Some(level) = levels.last_mut() else {
                    continue;
                };
                if ch == MULTIPLE_CONDITIONS_AND {
                    level.0 = true;
                } else {
                    level.1 = true;
                }
                if level.0 && level.1 {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
