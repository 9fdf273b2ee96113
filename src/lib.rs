//! Citation templates and footnote placement for styled rich-text documents.
//!
//! Paragraph text is modelled as lists of [`StyledFragment`]s. Citation
//! templates from a [`Library`] expand into such lists, and footnote markers
//! are spliced into them at plain-text offsets.

pub mod bibliography;
pub mod document;
pub mod error;
pub mod footnote;
pub mod library;
pub mod runs;
pub mod template;

pub use bibliography::{Citation, SourceHand, build_bibliography};
pub use error::{
    ConditionError, FootnoteError, InvalidFieldName, LibraryError, TemplateSyntaxError,
};
pub use footnote::{Footnote, FootnoteLocation, add_footnote, locate};
pub use library::{CitationSource, Library, LoadReport};
pub use runs::{FootnoteId, RunList, StyledFragment};
pub use template::{FieldInput, FieldKind, FieldValue, expand, validate};
