use std::path::{Path, PathBuf};

use crate::convert::{source_format, Converter};
use crate::error::Result;
use crate::extract::{first_content_line, header_text_per_section};
use crate::model::{LineContext, Paragraph, RawDocument, Section};
use crate::{docx, html, paths, text};

/// A DOCX file read straight from its container.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    path: PathBuf,
    sections: Vec<Section>,
}

impl DocxDocument {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = paths::filepath(path)?;
        let sections = docx::open(&path)?;
        Ok(DocxDocument { path, sections })
    }

    pub fn from_sections(path: impl Into<PathBuf>, sections: Vec<Section>) -> Self {
        DocxDocument {
            path: path.into(),
            sections,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Body paragraphs of every section, in reading order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.sections.iter().flat_map(|s| s.body.iter())
    }

    pub fn body_title(&self) -> Option<String> {
        first_content_line(self.paragraphs().map(|p| p.text.as_str()), LineContext::Raw)
    }

    pub fn header_text(&self) -> Vec<String> {
        header_text_per_section(&self.sections)
    }

    pub fn into_raw(self) -> RawDocument {
        RawDocument::Structured(self.sections)
    }
}

/// Converter markdown with bold, link and underline markup stripped.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    path: PathBuf,
    content: String,
}

impl MarkdownDocument {
    pub fn open(path: impl AsRef<Path>, converter: &dyn Converter) -> Result<Self> {
        let path = paths::filepath(path)?;
        let format = source_format(&path)?;
        let markdown = converter.to_markdown(&path, &format)?;
        Ok(MarkdownDocument {
            content: text::strip_markup(&markdown),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn body_title(&self) -> Option<String> {
        first_content_line(self.content.lines(), LineContext::Markup)
    }

    pub fn into_raw(self) -> RawDocument {
        RawDocument::Flat(self.content)
    }
}

/// Converter standalone HTML, read through its body text.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    path: PathBuf,
    html: String,
    body: String,
}

impl HtmlDocument {
    pub fn open(path: impl AsRef<Path>, converter: &dyn Converter) -> Result<Self> {
        let path = paths::filepath(path)?;
        let format = source_format(&path)?;
        let html = converter.to_html(&path, &format)?;
        let body = html::body_text(&html);
        Ok(HtmlDocument { path, html, body })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn body_text(&self) -> &str {
        &self.body
    }

    pub fn body_title(&self) -> Option<String> {
        first_content_line(self.body.lines(), LineContext::Text)
    }

    pub fn into_raw(self) -> RawDocument {
        RawDocument::Flat(self.body)
    }
}

/// Title of a raw document, whichever collaborator produced it.
pub fn raw_title(raw: &RawDocument, context: LineContext) -> Option<String> {
    match raw {
        RawDocument::Flat(content) => first_content_line(content.lines(), context),
        RawDocument::Structured(sections) => first_content_line(
            sections.iter().flat_map(|s| s.body.iter()).map(|p| p.text.as_str()),
            context,
        ),
    }
}
