//! Atomic persistence of the rendered auth config.
//!
//! The destination has one writer (this process) and arbitrarily many
//! external readers, so the replacement must never expose a partial
//! document: the rendered text is written to a temp file in the
//! destination's directory and renamed into place.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{RefresherError, Result};

/// Write `contents` to `path`, fully replacing any existing file.
///
/// Creates the destination if it is absent. A missing parent directory or
/// an unwritable path is fatal; the temp file is cleaned up on failure so
/// no partial document is left behind.
pub fn write_config(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut staged =
        NamedTempFile::new_in(parent).map_err(|source| write_error(path, source))?;
    staged
        .write_all(contents.as_bytes())
        .map_err(|source| write_error(path, source))?;
    staged
        .persist(path)
        .map_err(|persist| write_error(path, persist.error))?;
    debug!(path = %path.display(), bytes = contents.len(), "replaced registry auth config");
    Ok(())
}

fn write_error(path: &Path, source: std::io::Error) -> RefresherError {
    RefresherError::Write {
        path: path.to_path_buf(),
        source,
    }
}
