//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Syntax problems found by [`crate::template::validate`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TemplateSyntaxError {
    #[error("used closing parenthesis without opening parenthesis")]
    UnmatchedClosingParen,

    #[error("parenthesis left open before the condition separator")]
    UnclosedParenBeforeSeparator,

    #[error("curly brackets inside curly brackets")]
    NestedBraces,

    #[error("too many closing curly brackets")]
    UnmatchedClosingBrace,
}

/// A condition that cannot be reduced to a single boolean.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConditionError {
    #[error("closing parenthesis at {position} has no opening parenthesis")]
    UnexpectedClosingParen { position: usize },

    #[error("parenthesis opened at {position} is never closed")]
    UnclosedParen { position: usize },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FootnoteError {
    #[error("position {position} is beyond the end of the document (length {length})")]
    PositionOutOfRange { position: usize, length: usize },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidFieldName {
    #[error("field name is empty")]
    Empty,

    #[error("field name contains reserved character '{0}'")]
    ReservedCharacter(char),

    #[error("field name collides with an internal condition token")]
    Sentinel,
}

/// Errors raised while reading a template library.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("library is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{what} is missing a {attribute}")]
    MissingAttribute {
        what: String,
        attribute: &'static str,
    },

    #[error("source '{source_title}' has an invalid {template} template: {error}")]
    InvalidTemplate {
        source_title: String,
        template: &'static str,
        error: TemplateSyntaxError,
    },

    #[error("input '{input}' has an invalid name: {error}")]
    InvalidInputName {
        input: String,
        error: InvalidFieldName,
    },

    #[error("source '{source_title}' doesn't contain any inputs")]
    NoInputs { source_title: String },

    #[error("category '{category}' doesn't contain any source types")]
    EmptyCategory { category: String },
}
