//! The citation template language.
//!
//! A template is plain text with two kinds of placeholders:
//!
//! - `{@name}` is replaced by the text of the field called `name`, carrying
//!   that field's bold/italic style.
//! - `{?condition:output}` is replaced by `output` when `condition` holds.
//!   Conditions combine field names with `+` (and) and `|` (or), `!name`
//!   negates, and parentheses group. A field counts as true when its text is
//!   non-empty.

mod condition;
mod expand;
mod validate;

pub use condition::{
    condition_holds, evaluate_condition, evaluate_line_statement, substitute_fields,
};
pub use expand::{conditionals, expand, field_references, resolve_field_references};
pub use validate::{TemplateWarning, lint, validate};

use crate::error::InvalidFieldName;

pub const NAME_REFERENCE: char = '@';
pub const IF: char = '?';
pub const INVERSE: char = '!';
pub const CONDITION_AND_OUTPUT_SEPARATOR: char = ':';
pub const MULTIPLE_CONDITIONS_AND: char = '+';
pub const MULTIPLE_CONDITIONS_OR: char = '|';

pub const TRUE_PLACE_HOLDER: &str = "TRUESTATEMENT00000";
pub const FALSE_PLACE_HOLDER: &str = "FALSESTATEMENT99999";

const RESERVED_NAME_CHARS: [char; 9] = [
    '{',
    '}',
    '(',
    ')',
    NAME_REFERENCE,
    IF,
    CONDITION_AND_OUTPUT_SEPARATOR,
    MULTIPLE_CONDITIONS_AND,
    MULTIPLE_CONDITIONS_OR,
];

/// A named, styled value supplied for one citation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldValue {
    pub name: String,
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn is_filled(&self) -> bool {
        !self.text.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Link,
    Date,
}

/// A form field collecting one value for a citation source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInput {
    pub kind: FieldKind,
    pub name: String,
    pub title: String,
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl FieldInput {
    pub fn new(kind: FieldKind, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            title: title.into(),
            text: String::new(),
            bold: false,
            italic: false,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn value(&self) -> FieldValue {
        FieldValue {
            name: self.name.clone(),
            text: self.text.clone(),
            bold: self.bold,
            italic: self.italic,
        }
    }
}

pub fn validate_field_name(name: &str) -> Result<(), InvalidFieldName> {
    if name.is_empty() {
        return Err(InvalidFieldName::Empty);
    }
    if let Some(ch) = name.chars().find(|ch| RESERVED_NAME_CHARS.contains(ch)) {
        return Err(InvalidFieldName::ReservedCharacter(ch));
    }
    if name == TRUE_PLACE_HOLDER || name == FALSE_PLACE_HOLDER {
        return Err(InvalidFieldName::Sentinel);
    }
    Ok(())
}


#[cfg(test)]
#[path = "template/condition_tests.rs"]
mod condition_tests;
