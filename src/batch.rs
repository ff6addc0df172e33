use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::warn;

use crate::convert::Converter;
use crate::document::{DocxDocument, HtmlDocument, MarkdownDocument};
use crate::error::Result;
use crate::model::{DocumentReport, Engine};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Title and headers of a single document. Headers are only available from
/// the DOCX container; converter engines leave them empty.
pub fn extract_document(
    path: &Path,
    engine: Engine,
    converter: &dyn Converter,
) -> Result<(Option<String>, Vec<String>)> {
    match engine {
        Engine::Docx => {
            let doc = DocxDocument::open(path)?;
            Ok((doc.body_title(), doc.header_text()))
        }
        Engine::Markdown => {
            let doc = MarkdownDocument::open(path, converter)?;
            Ok((doc.body_title(), Vec::new()))
        }
        Engine::Html => {
            let doc = HtmlDocument::open(path, converter)?;
            Ok((doc.body_title(), Vec::new()))
        }
    }
}

fn report(path: &Path, engine: Engine, converter: &dyn Converter) -> DocumentReport {
    match extract_document(path, engine, converter) {
        Ok((title, headers)) => DocumentReport {
            path: path.to_path_buf(),
            engine,
            title,
            headers,
            error: None,
        },
        Err(e) => {
            warn!(path = %path.display(), %engine, "extraction failed: {}", e);
            DocumentReport {
                path: path.to_path_buf(),
                engine,
                title: None,
                headers: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Extract every document, isolating failures to their own report.
/// Reports come back in the order of `paths`.
#[cfg(feature = "rayon")]
pub fn run(
    paths: &[PathBuf],
    engine: Engine,
    converter: &dyn Converter,
    progress: &ProgressBar,
) -> Vec<DocumentReport> {
    paths
        .par_iter()
        .map(|p| {
            let r = report(p, engine, converter);
            progress.inc(1);
            r
        })
        .collect()
}

#[cfg(not(feature = "rayon"))]
pub fn run(
    paths: &[PathBuf],
    engine: Engine,
    converter: &dyn Converter,
    progress: &ProgressBar,
) -> Vec<DocumentReport> {
    paths
        .iter()
        .map(|p| {
            let r = report(p, engine, converter);
            progress.inc(1);
            r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Pandoc;
    use std::io::Write;

    #[test]
    fn failures_do_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.docx");
        std::fs::File::create(&broken)
            .unwrap()
            .write_all(b"not a zip")
            .unwrap();
        let missing = dir.path().join("missing.docx");

        let paths = vec![broken.clone(), missing.clone()];
        let reports = run(&paths, Engine::Docx, &Pandoc::default(), &ProgressBar::hidden());

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].path, broken);
        assert_eq!(reports[1].path, missing);
        assert!(reports.iter().all(DocumentReport::failed));
        assert!(reports[0].error.as_deref().unwrap().contains("cannot read document container"));
        assert!(reports[1].error.as_deref().unwrap().contains("is not a file"));
    }

    #[test]
    fn report_serializes_without_error_field_on_success() {
        let r = DocumentReport {
            path: PathBuf::from("/data/a.docx"),
            engine: Engine::Markdown,
            title: Some("Budget".to_string()),
            headers: Vec::new(),
            error: None,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["engine"], "markdown");
        assert_eq!(json["title"], "Budget");
        assert!(json.get("error").is_none());
    }
}
