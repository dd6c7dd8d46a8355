//! Shared utility functions for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// Output directory (relative to the output root) that holds fragments.
pub(crate) const CONTENT_DIR: &str = "content";

/// File extensions treated as source documents.
const DOCUMENT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Whether a path names a source document (by extension, case-insensitive).
///
/// # Examples
///
/// ```
/// use quire_renderer::is_document_path;
///
/// assert!(is_document_path("guide/intro.md"));
/// assert!(is_document_path("NOTES.Markdown"));
/// assert!(!is_document_path("logo.png"));
/// ```
pub fn is_document_path(path: &str) -> bool {
    path.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty()
            && !ext.contains('/')
            && DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// Derive a route id from a path relative to the content root.
///
/// The extension is stripped and separators are normalized to `/`.
///
/// # Examples
///
/// ```
/// use quire_renderer::route_id;
///
/// assert_eq!(route_id("guide/intro.md"), "guide/intro");
/// assert_eq!(route_id("guide\\deep\\page.markdown"), "guide/deep/page");
/// assert_eq!(route_id("./readme.md"), "readme");
/// ```
pub fn route_id(relative_path: &str) -> String {
    let normalized = relative_path.replace('\\', "/");
    let segments: Vec<&str> = normalized
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    let joined = segments.join("/");

    match joined.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem.to_owned(),
        _ => joined,
    }
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
