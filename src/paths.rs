use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

/// Expand a glob pattern into absolute paths of regular files.
///
/// Matches that are not files (directories, unreadable entries) are logged
/// and skipped.
pub fn filepaths(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                warn!(path = %e.path().display(), "skipping unreadable glob match: {}", e.error());
                continue;
            }
        };
        match filepath(&path) {
            Ok(p) => files.push(p),
            Err(e) => warn!("skipping {}", e),
        }
    }
    Ok(files)
}

/// Absolute path of `path`, provided it names a regular file.
pub fn filepath(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }
    Ok(std::path::absolute(path)?)
}
