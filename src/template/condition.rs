use tracing::warn;

use super::{
    FALSE_PLACE_HOLDER, FieldValue, INVERSE, MULTIPLE_CONDITIONS_AND, MULTIPLE_CONDITIONS_OR,
    TRUE_PLACE_HOLDER,
};
use crate::error::ConditionError;

enum Piece {
    Text(String),
    Resolved(&'static str),
}

/// Replaces field names in `condition` with the true/false place holders.
///
/// Longer names go first so that a name contained in another one cannot eat
/// part of it. Text that has already been replaced is not searched again.
pub fn substitute_fields(condition: &str, fields: &[FieldValue]) -> String {
    let mut ordered: Vec<&FieldValue> = fields
        .iter()
        .filter(|field| !field.name.is_empty())
        .collect();
    ordered.sort_by(|a, b| b.name.chars().count().cmp(&a.name.chars().count()));

    let mut pieces = vec![Piece::Text(condition.to_string())];
    for field in ordered {
        let (holds, inverse) = if field.is_filled() {
            (TRUE_PLACE_HOLDER, FALSE_PLACE_HOLDER)
        } else {
            (FALSE_PLACE_HOLDER, TRUE_PLACE_HOLDER)
        };
        let negated = format!("{INVERSE}{}", field.name);
        pieces = replace_in_pieces(pieces, &negated, inverse);
        pieces = replace_in_pieces(pieces, &field.name, holds);
    }

    pieces
        .iter()
        .map(|piece| match piece {
            Piece::Text(text) => text.as_str(),
            Piece::Resolved(holder) => *holder,
        })
        .collect()
}

fn replace_in_pieces(pieces: Vec<Piece>, pattern: &str, holder: &'static str) -> Vec<Piece> {
    let mut result = Vec::with_capacity(pieces.len());
    for piece in pieces {
        let Piece::Text(text) = piece else {
            result.push(piece);
            continue;
        };
        let mut parts = text.split(pattern);
        if let Some(first) = parts.next() {
            result.push(Piece::Text(first.to_string()));
        }
        for part in parts {
            result.push(Piece::Resolved(holder));
            result.push(Piece::Text(part.to_string()));
        }
    }
    result
}

/// Reduces a place holder expression to a single boolean.
///
/// Each parenthesized group is evaluated innermost first with
/// [`evaluate_line_statement`] and stands in for a place holder in the level
/// around it. The whole expression is treated as one outer group.
pub fn evaluate_condition(expression: &str) -> Result<bool, ConditionError> {
    let mut chars = expression.char_indices();
    let line = reduce_group(&mut chars, None)?;
    Ok(evaluate_line_statement(&line))
}

fn reduce_group(
    chars: &mut std::str::CharIndices<'_>,
    opened_at: Option<usize>,
) -> Result<String, ConditionError> {
    let mut line = String::new();
    while let Some((position, ch)) = chars.next() {
        match ch {
            '(' => {
                let inner = reduce_group(chars, Some(position))?;
                line.push_str(if evaluate_line_statement(&inner) {
                    TRUE_PLACE_HOLDER
                } else {
                    FALSE_PLACE_HOLDER
                });
            }
            ')' => {
                return match opened_at {
                    Some(_) => Ok(line),
                    None => Err(ConditionError::UnexpectedClosingParen { position }),
                };
            }
            _ => line.push(ch),
        }
    }
    match opened_at {
        Some(position) => Err(ConditionError::UnclosedParen { position }),
        None => Ok(line),
    }
}

/// Evaluates one parenthesis-free level.
///
/// A `+` anywhere makes the whole level a conjunction: it is split on `+`
/// only and every piece must be a true place holder, so pieces joined by `|`
/// never hold. Without `+` the level is split on `|` and one true piece is
/// enough.
pub fn evaluate_line_statement(line: &str) -> bool {
    if line.contains(MULTIPLE_CONDITIONS_AND) {
        if line.contains(MULTIPLE_CONDITIONS_OR) {
            warn!(
                line,
                "'+' and '|' share one level of a condition, '|' is ignored; add parentheses"
            );
        }
        line.split(MULTIPLE_CONDITIONS_AND).all(token_holds)
    } else {
        line.split(MULTIPLE_CONDITIONS_OR).any(token_holds)
    }
}

/// A term holds only when it is exactly the true place holder, whitespace
/// included.
fn token_holds(token: &str) -> bool {
    if token == TRUE_PLACE_HOLDER {
        return true;
    }
    if token.is_empty() || token.contains(TRUE_PLACE_HOLDER) || token.contains(FALSE_PLACE_HOLDER)
    {
        return false;
    }
    if token.contains(MULTIPLE_CONDITIONS_AND) || token.contains(MULTIPLE_CONDITIONS_OR) {
        return false;
    }

    // Unknown fields behave like fields that were left empty.
    warn!(field = token, "condition references a field that was not supplied");
    match token.strip_prefix(INVERSE) {
        Some(name) => !name.is_empty(),
        None => false,
    }
}

/// Substitutes `fields` into `condition` and evaluates it. Malformed
/// conditions are logged and count as false.
pub fn condition_holds(condition: &str, fields: &[FieldValue]) -> bool {
    let expression = substitute_fields(condition, fields);
    match evaluate_condition(&expression) {
        Ok(holds) => holds,
        Err(error) => {
            warn!(condition, %error, "condition could not be evaluated");
            false
        }
    }
}
