//! Atomic output writes.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::SiteError;

/// Replace `path` with `contents` atomically.
///
/// The data goes to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old or the new file.
/// Returns `false` without touching the file when it already holds `contents`.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<bool, SiteError> {
    if fs::read(path).is_ok_and(|existing| existing == contents) {
        return Ok(false);
    }

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| SiteError::write(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| SiteError::write(path, e))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| SiteError::write(path, e))?;
    tmp.persist(path).map_err(|e| SiteError::write(path, e.error))?;
    Ok(true)
}
