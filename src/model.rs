use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Paragraph { text: text.into() }
    }
}

/// A document section: its running header and the body paragraphs it spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub header: Vec<Paragraph>,
    pub body: Vec<Paragraph>,
}

impl Section {
    pub fn with_header<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Section {
            header: lines.into_iter().map(Paragraph::new).collect(),
            body: Vec::new(),
        }
    }
}

/// Document content as handed over by a collaborator, before extraction.
#[derive(Debug, Clone)]
pub enum RawDocument {
    /// Converter output, one line per `\n`.
    Flat(String),
    /// Sections read out of a document container.
    Structured(Vec<Section>),
}

/// Where a line came from, which decides whether blank lines and markup
/// delimiters count as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineContext {
    /// Paragraph text straight out of a document container.
    Raw,
    /// Plain text lines from a converter, such as HTML body text.
    Text,
    /// Lines of converter markdown after `strip_markup`.
    Markup,
}

/// How a document is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Read the DOCX container directly.
    Docx,
    /// Convert to markdown with pandoc and strip markup.
    Markdown,
    /// Convert to standalone HTML with pandoc and read the body text.
    Html,
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Engine::Docx => "docx",
            Engine::Markdown => "markdown",
            Engine::Html => "html",
        };
        f.write_str(name)
    }
}

/// Outcome of one document in a batch. `error` is set when the document could
/// not be read; absence of a title is not an error.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub engine: Engine,
    pub title: Option<String>,
    pub headers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentReport {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}
