//! Content root discovery.
//!
//! Walks the content root depth-first with entries sorted by name, so the walk
//! order (and everything derived from it) is stable across runs. Hidden
//! entries are skipped. Files are split into documents (`.md`, `.markdown`)
//! and assets (everything else).

use std::fs;
use std::path::{Path, PathBuf};

use quire_renderer::is_document_path;

use crate::error::SiteError;

/// A file under the content root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SourceFile {
    /// Path relative to the content root, `/`-separated.
    pub rel_path: String,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub(crate) struct ScanResult {
    /// Documents in walk order.
    pub documents: Vec<SourceFile>,
    pub assets: Vec<SourceFile>,
    /// Subdirectories that could not be read.
    pub warnings: Vec<String>,
}

pub(crate) struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk the content root.
    ///
    /// Fails only if the root itself cannot be listed; unreadable
    /// subdirectories become warnings.
    pub fn scan(&self) -> Result<ScanResult, SiteError> {
        let entries = read_sorted(&self.root).map_err(|source| SiteError::ContentRoot {
            path: self.root.clone(),
            source,
        })?;

        let mut result = ScanResult::default();
        self.visit(entries, "", &mut result);
        tracing::debug!(
            documents = result.documents.len(),
            assets = result.assets.len(),
            "Content scan completed"
        );
        Ok(result)
    }

    fn visit(&self, entries: Vec<fs::DirEntry>, prefix: &str, result: &mut ScanResult) {
        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let rel_path = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };

            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() && path.is_dir() {
                // Not followed; a link back up the tree would never end.
                tracing::debug!(path = %path.display(), "Skipping symlinked directory");
                continue;
            }

            if file_type.is_dir() {
                match read_sorted(&path) {
                    Ok(children) => self.visit(children, &rel_path, result),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Cannot read directory");
                        result
                            .warnings
                            .push(format!("cannot read directory {}: {e}", path.display()));
                    }
                }
            } else if is_document_path(&rel_path) {
                result.documents.push(SourceFile { rel_path, path });
            } else {
                result.assets.push(SourceFile { rel_path, path });
            }
        }
    }
}

fn read_sorted(dir: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries)
}
