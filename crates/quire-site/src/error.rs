use std::io;
use std::path::PathBuf;

use quire_assets::AssetError;
use quire_renderer::ParseError;

/// Error returned by the build pipeline.
///
/// [`SourceRead`](Self::SourceRead) and [`Parse`](Self::Parse) are per-document:
/// the builder reports them as warnings and skips the document. The other
/// variants abort the build.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Document cannot be read.
    #[error("cannot read {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Document frontmatter is malformed.
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Content root is missing or unreadable.
    #[error("content root {} is not readable: {source}", path.display())]
    ContentRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output cannot be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output assets cannot be materialized.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Refused to remove a directory holding the content root.
    #[error("refusing to remove {}: it contains the content root", path.display())]
    UnsafeClean { path: PathBuf },
}

impl SiteError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
