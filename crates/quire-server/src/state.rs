//! Application state.
//!
//! Shared, read-only state for all request handlers.

use std::path::PathBuf;

use crate::live_reload::LiveReloadManager;
use crate::media::MediaTypeTable;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Static roots, searched in order.
    pub(crate) roots: Vec<PathBuf>,
    /// Extension to content type table.
    pub(crate) media_types: MediaTypeTable,
    /// Live reload manager (if enabled).
    pub(crate) live_reload: Option<LiveReloadManager>,
}

impl AppState {
    pub(crate) fn new(roots: Vec<PathBuf>, media_types: MediaTypeTable) -> Self {
        Self {
            roots,
            media_types,
            live_reload: None,
        }
    }
}
