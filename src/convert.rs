use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Turns a document on disk into text.
pub trait Converter: Send + Sync {
    /// Markdown rendering of `path`, read as `from_format`.
    fn to_markdown(&self, path: &Path, from_format: &str) -> Result<String>;

    /// Standalone HTML rendering of `path`, read as `from_format`.
    fn to_html(&self, path: &Path, from_format: &str) -> Result<String>;
}

/// Source format name for the converter, taken from the file extension.
pub fn source_format(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| Error::UnknownFormat(path.to_path_buf()))?
        .to_ascii_lowercase();
    let format = match ext.as_str() {
        "md" | "markdown" => "markdown",
        "htm" | "xhtml" => "html",
        "tex" => "latex",
        "txt" => "plain",
        other => other,
    };
    Ok(format.to_string())
}

/// The `pandoc` command line tool.
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: PathBuf,
    wrap: String,
}

impl Default for Pandoc {
    fn default() -> Self {
        Pandoc::new("pandoc", "none")
    }
}

impl Pandoc {
    pub fn new(program: impl Into<PathBuf>, wrap: impl Into<String>) -> Self {
        Pandoc {
            program: program.into(),
            wrap: wrap.into(),
        }
    }

    fn run(&self, path: &Path, args: Vec<OsString>) -> Result<String> {
        debug!(program = %self.program.display(), ?args, "running converter");
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(Error::Conversion {
                path: path.to_path_buf(),
                status: output.status.code(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            warn!(path = %path.display(), "converter reported: {}", stderr);
        }

        String::from_utf8(output.stdout).map_err(|e| Error::Conversion {
            path: path.to_path_buf(),
            status: output.status.code(),
            stderr: format!("output is not valid UTF-8: {}", e),
        })
    }
}

impl Converter for Pandoc {
    fn to_markdown(&self, path: &Path, from_format: &str) -> Result<String> {
        let args = vec![
            OsString::from("-f"),
            OsString::from(from_format),
            OsString::from("-t"),
            OsString::from("markdown"),
            OsString::from(format!("--wrap={}", self.wrap)),
            path.as_os_str().to_owned(),
        ];
        self.run(path, args)
    }

    fn to_html(&self, path: &Path, from_format: &str) -> Result<String> {
        let args = vec![
            OsString::from("-s"),
            OsString::from("-f"),
            OsString::from(from_format),
            OsString::from("-t"),
            OsString::from("html"),
            path.as_os_str().to_owned(),
        ];
        self.run(path, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(source_format(Path::new("/d/report.docx")).unwrap(), "docx");
        assert_eq!(source_format(Path::new("/d/Report.ODT")).unwrap(), "odt");
        assert_eq!(source_format(Path::new("notes.md")).unwrap(), "markdown");
        assert_eq!(source_format(Path::new("page.htm")).unwrap(), "html");
        assert_eq!(source_format(Path::new("paper.tex")).unwrap(), "latex");
        assert_eq!(source_format(Path::new("guide.RST")).unwrap(), "rst");
    }

    #[test]
    fn format_needs_extension() {
        assert!(matches!(
            source_format(Path::new("/d/README")),
            Err(Error::UnknownFormat(_))
        ));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let pandoc = Pandoc::new("/nonexistent/bin/pandoc-for-tests", "none");
        let err = pandoc
            .to_markdown(Path::new("with space.docx"), "docx")
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_a_conversion_error() {
        let failing = Pandoc::new("false", "none");
        let err = failing.to_html(Path::new("a b.docx"), "docx").unwrap_err();
        match err {
            Error::Conversion { path, status, .. } => {
                assert_eq!(path, PathBuf::from("a b.docx"));
                assert_eq!(status, Some(1));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn path_with_spaces_is_one_argument() {
        // `echo` prints its arguments back, so the path arrives unsplit and unescaped.
        let echo = Pandoc::new("echo", "none");
        let out = echo
            .to_markdown(Path::new("/tmp/my report.docx"), "docx")
            .unwrap();
        assert_eq!(out.trim_end(), "-f docx -t markdown --wrap=none /tmp/my report.docx");
    }
}
