//! Title and running-header extraction for word-processing documents.
//!
//! Documents come in through a collaborator (the DOCX container reader or a
//! `pandoc` conversion), markup is stripped, and the first meaningful line is
//! picked out by a single noise/content predicate.

pub mod batch;
pub mod classify;
pub mod convert;
pub mod document;
pub mod docx;
pub mod error;
pub mod extract;
pub mod html;
pub mod model;
pub mod paths;
pub mod settings;
pub mod text;

pub use classify::is_content;
pub use convert::{Converter, Pandoc};
pub use document::{DocxDocument, HtmlDocument, MarkdownDocument};
pub use error::{Error, Result};
pub use extract::{first_content_line, header_text_per_section};
pub use model::{DocumentReport, Engine, LineContext, Paragraph, RawDocument, Section};
pub use settings::Settings;
