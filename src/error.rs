use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),

    #[error("cannot infer a source format for {} (no extension)", .0.display())]
    UnknownFormat(PathBuf),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("converting {} failed (exit status {status:?}): {stderr}", path.display())]
    Conversion {
        path: PathBuf,
        status: Option<i32>,
        stderr: String,
    },

    #[error("cannot read document container {}: {reason}", path.display())]
    MalformedContainer { path: PathBuf, reason: String },

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(path: &std::path::Path, reason: impl ToString) -> Self {
        Error::MalformedContainer {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
