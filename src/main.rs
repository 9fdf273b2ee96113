use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use citeweave::{
    CitationSource, Library, LoadReport, StyledFragment,
    document::{append_paragraphs, footnote_glyph, paragraphs_from_document, write_paragraph},
    footnote::{add_footnote, document_len},
};
use tdoc::{Document, markdown, parse, writer::Writer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DocumentFormat {
    Ftml,
    Markdown,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("md") | Some("markdown") | Some("mkd") | Some("mdown") | Some("mdtxt") => {
                DocumentFormat::Markdown
            }
            _ => DocumentFormat::Ftml,
        }
    }
}

#[derive(Parser)]
#[command(name = "citeweave")]
#[command(about = "Expand citation templates and place footnotes in documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a template library and report problems
    Check {
        library: PathBuf,
    },

    /// Print the bibliography entry and footnote for one source
    Cite {
        library: PathBuf,

        /// Title of the source type
        #[arg(short, long)]
        source: String,

        /// Field value as name=text (repeatable)
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Only print the footnote
        #[arg(long)]
        footnote: bool,
    },

    /// Insert a footnote citing a source into a document
    Footnote {
        library: PathBuf,

        #[arg(short, long)]
        source: String,

        /// FTML or Markdown file
        #[arg(short, long)]
        document: PathBuf,

        /// Char offset into the document text
        #[arg(short, long)]
        position: usize,

        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Where to write the result (defaults to the input document)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_field(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, text)) if !name.is_empty() => Ok((name.to_string(), text.to_string())),
        _ => Err(format!("expected name=text, got `{arg}`")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citeweave=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { library } => check(&library),
        Commands::Cite {
            library,
            source,
            fields,
            footnote,
        } => {
            let source = filled_source(&library, &source, &fields)?;
            if !footnote {
                println!("{}", source.bibliography_preview());
            }
            println!("{}", source.footnote_preview());
            Ok(())
        }
        Commands::Footnote {
            library,
            source,
            document,
            position,
            fields,
            output,
        } => {
            let source = filled_source(&library, &source, &fields)?;
            let output = output.unwrap_or_else(|| document.clone());
            insert_footnote(&source, &document, position, &output)
        }
    }
}

fn check(path: &Path) -> Result<()> {
    let (library, report) =
        Library::load(path).with_context(|| format!("failed to load {}", path.display()))?;
    for category in &library.categories {
        println!("{}", category.title);
        for source in &category.sources {
            println!("  {} ({} inputs)", source.title, source.inputs.len());
        }
    }
    print_report(&report);
    if !report.skipped.is_empty() {
        bail!("{} entries skipped", report.skipped.len());
    }
    Ok(())
}

fn print_report(report: &LoadReport) {
    for error in &report.skipped {
        eprintln!("skipped: {error}");
    }
    for (source, warning) in &report.warnings {
        eprintln!("warning: {source}: {warning}");
    }
}

fn filled_source(path: &Path, title: &str, fields: &[(String, String)]) -> Result<CitationSource> {
    let (library, report) =
        Library::load(path).with_context(|| format!("failed to load {}", path.display()))?;
    print_report(&report);

    let mut source = library
        .source(title)
        .cloned()
        .ok_or_else(|| anyhow!("no source type called `{title}` in {}", path.display()))?;
    for (name, text) in fields {
        if !source.set_field(name, text.as_str()) {
            bail!("source type `{title}` has no input called `{name}`");
        }
    }
    Ok(source)
}

fn insert_footnote(
    source: &CitationSource,
    path: &Path,
    position: usize,
    output: &Path,
) -> Result<()> {
    let (mut document, format) = load_document(path)?;
    let mut paragraphs = paragraphs_from_document(&document);
    let footnote = add_footnote(&mut paragraphs, position, source.footnote_runs())
        .with_context(|| {
            format!(
                "cannot place a footnote in {} ({} chars)",
                path.display(),
                document_len(&paragraphs)
            )
        })?;
    let index = footnote.location.paragraph;
    write_paragraph(&mut document, index, &paragraphs[index]);

    let mut body = vec![StyledFragment::plain(format!("{} ", footnote_glyph(footnote.id)))];
    body.extend(footnote.content);
    append_paragraphs(&mut document, &[body]);

    save_document(&document, format, output)?;
    info!(id = footnote.id, output = %output.display(), "footnote added");
    Ok(())
}

fn load_document(path: &Path) -> Result<(Document, DocumentFormat)> {
    let format = DocumentFormat::from_path(path);
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let document = match format {
        DocumentFormat::Ftml => parse(std::io::Cursor::new(content))
            .map_err(|err| anyhow!("failed to parse {}: {err}", path.display()))?,
        DocumentFormat::Markdown => markdown::parse(std::io::Cursor::new(content))
            .map_err(|err| anyhow!("failed to parse {}: {err}", path.display()))?,
    };
    Ok((document, format))
}

fn save_document(document: &Document, format: DocumentFormat, path: &Path) -> Result<()> {
    let contents = match format {
        DocumentFormat::Ftml => Writer::new()
            .write_to_string(document)
            .context("failed to render FTML")?
            .into_bytes(),
        DocumentFormat::Markdown => {
            let mut contents = Vec::new();
            markdown::write(&mut contents, document).context("failed to render Markdown")?;
            contents
        }
    };
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
