//! Template libraries: citation source types grouped into categories, read
//! from TOML.
//!
//! ```toml
//! title = "Chicago notes"
//!
//! [[category]]
//! title = "Books"
//!
//! [[category.source]]
//! title = "Book"
//! bibliography = "{@author}. {@title}. {@city}: {@publisher}, {@year}."
//! footnote = "{@author}, {@title} ({@city}: {@publisher}, {@year}){?page:, }{@page}."
//!
//! [[category.source.input]]
//! name = "title"
//! title = "Title"
//! italic = true
//! ```
//!
//! Loading is tolerant: a source with a broken template or missing pieces is
//! skipped and reported, everything else still loads.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::LibraryError;
use crate::runs::{RunList, plain_text};
use crate::template::{
    FieldInput, FieldKind, FieldValue, TemplateWarning, expand, lint, validate,
    validate_field_name,
};

#[derive(Debug, Deserialize)]
struct RawLibrary {
    title: Option<String>,
    #[serde(default, rename = "category")]
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    title: Option<String>,
    #[serde(default, rename = "source")]
    sources: Vec<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    title: Option<String>,
    bibliography: Option<String>,
    footnote: Option<String>,
    #[serde(default, rename = "input")]
    inputs: Vec<RawInput>,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    #[serde(default)]
    kind: FieldKind,
    name: Option<String>,
    title: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Library {
    pub title: String,
    pub categories: Vec<SourceCategory>,
}

#[derive(Clone, Debug)]
pub struct SourceCategory {
    pub title: String,
    pub sources: Vec<CitationSource>,
}

/// Everything that went wrong while loading, without stopping the load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub skipped: Vec<LibraryError>,
    pub warnings: Vec<(String, TemplateWarning)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.warnings.is_empty()
    }

    fn skip(&mut self, error: LibraryError) {
        warn!(%error, "skipping library entry");
        self.skipped.push(error);
    }
}

impl Library {
    pub fn load(path: &Path) -> Result<(Self, LoadReport), LibraryError> {
        info!(path = %path.display(), "reading template library");
        let content = fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<(Self, LoadReport), LibraryError> {
        let raw: RawLibrary = toml::from_str(content)?;
        let mut report = LoadReport::default();
        let mut library = Library {
            title: raw.title.unwrap_or_default(),
            categories: Vec::new(),
        };

        for (idx, raw_category) in raw.categories.into_iter().enumerate() {
            let Some(title) = raw_category.title else {
                report.skip(LibraryError::MissingAttribute {
                    what: format!("category #{}", idx + 1),
                    attribute: "title",
                });
                continue;
            };
            debug!(category = %title, "reading source types");

            let sources: Vec<CitationSource> = raw_category
                .sources
                .into_iter()
                .enumerate()
                .filter_map(|(idx, raw)| read_source(&title, idx, raw, &mut report))
                .collect();
            if sources.is_empty() {
                report.skip(LibraryError::EmptyCategory { category: title });
                continue;
            }
            library.categories.push(SourceCategory { title, sources });
        }

        Ok((library, report))
    }

    pub fn sources(&self) -> impl Iterator<Item = &CitationSource> {
        self.categories
            .iter()
            .flat_map(|category| category.sources.iter())
    }

    pub fn source(&self, title: &str) -> Option<&CitationSource> {
        self.sources().find(|source| source.title == title)
    }
}

fn read_source(
    category: &str,
    idx: usize,
    raw: RawSource,
    report: &mut LoadReport,
) -> Option<CitationSource> {
    let Some(title) = raw.title else {
        report.skip(LibraryError::MissingAttribute {
            what: format!("source type #{} in {category}", idx + 1),
            attribute: "title",
        });
        return None;
    };

    let mut templates = Vec::with_capacity(2);
    for (template, code) in [("bibliography", raw.bibliography), ("footnote", raw.footnote)] {
        let Some(code) = code else {
            report.skip(LibraryError::MissingAttribute {
                what: format!("source type {title}"),
                attribute: template,
            });
            return None;
        };
        if let Some(error) = validate(&code) {
            report.skip(LibraryError::InvalidTemplate {
                source_title: title,
                template,
                error,
            });
            return None;
        }
        for warning in lint(&code) {
            warn!(source = %title, ?warning, "suspicious {template} template");
            report.warnings.push((title.clone(), warning));
        }
        templates.push(code);
    }
    let footnote = templates.pop().unwrap_or_default();
    let bibliography = templates.pop().unwrap_or_default();

    let mut inputs = Vec::with_capacity(raw.inputs.len());
    for raw_input in raw.inputs {
        if let Some(input) = read_input(&title, raw_input, report) {
            inputs.push(input);
        }
    }
    if inputs.is_empty() {
        report.skip(LibraryError::NoInputs {
            source_title: title,
        });
        return None;
    }

    debug!(source = %title, inputs = inputs.len(), "loaded source type");
    Some(CitationSource {
        title,
        bibliography,
        footnote,
        inputs,
    })
}

fn read_input(source: &str, raw: RawInput, report: &mut LoadReport) -> Option<FieldInput> {
    let Some(title) = raw.title else {
        report.skip(LibraryError::MissingAttribute {
            what: format!("input in {source}"),
            attribute: "title",
        });
        return None;
    };
    let Some(name) = raw.name else {
        report.skip(LibraryError::MissingAttribute {
            what: format!("input {title}"),
            attribute: "name",
        });
        return None;
    };
    if let Err(error) = validate_field_name(&name) {
        report.skip(LibraryError::InvalidInputName {
            input: title,
            error,
        });
        return None;
    }

    let mut input = FieldInput::new(raw.kind, name, title);
    input.bold = raw.bold;
    input.italic = raw.italic;
    Some(input)
}

/// A citation source type together with the form values filled in for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CitationSource {
    pub title: String,
    pub bibliography: String,
    pub footnote: String,
    pub inputs: Vec<FieldInput>,
}

impl CitationSource {
    pub fn fields(&self) -> Vec<FieldValue> {
        self.inputs.iter().map(FieldInput::value).collect()
    }

    /// Sets the text of the input called `name`. Returns `false` if there is
    /// no such input.
    pub fn set_field(&mut self, name: &str, text: impl Into<String>) -> bool {
        match self.inputs.iter_mut().find(|input| input.name == name) {
            Some(input) => {
                input.set_text(text);
                true
            }
            None => false,
        }
    }

    pub fn clear_form(&mut self) {
        for input in &mut self.inputs {
            input.clear();
        }
    }

    pub fn bibliography_runs(&self) -> RunList {
        expand(&self.bibliography, &self.fields())
    }

    pub fn footnote_runs(&self) -> RunList {
        expand(&self.footnote, &self.fields())
    }

    pub fn bibliography_preview(&self) -> String {
        plain_text(&self.bibliography_runs())
    }

    pub fn footnote_preview(&self) -> String {
        plain_text(&self.footnote_runs())
    }
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod library_tests;
