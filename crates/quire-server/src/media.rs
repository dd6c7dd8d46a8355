//! Extension to media type resolution.

use std::collections::BTreeMap;
use std::path::Path;

/// Content type for unknown extensions.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Content type forced on the bootstrap module.
pub const SCRIPT_MEDIA_TYPE: &str = "text/javascript; charset=utf-8";

const DEFAULT_TYPES: &[(&str, &str)] = &[
    ("css", "text/css; charset=utf-8"),
    ("gif", "image/gif"),
    ("htm", "text/html; charset=utf-8"),
    ("html", "text/html; charset=utf-8"),
    ("ico", "image/x-icon"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "text/javascript; charset=utf-8"),
    ("json", "application/json"),
    ("map", "application/json"),
    ("md", "text/markdown; charset=utf-8"),
    ("mjs", "text/javascript; charset=utf-8"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("ts", "video/mp2t"),
    ("tsx", FALLBACK_MEDIA_TYPE),
    ("ttf", "font/ttf"),
    ("txt", "text/plain; charset=utf-8"),
    ("wasm", "application/wasm"),
    ("webp", "image/webp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("xml", "application/xml"),
];

/// The module served as a script no matter what the table says.
///
/// A request matches when its file name ends with `.{extension}` and
/// contains `stem`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapModule {
    pub stem: String,
    pub extension: String,
}

impl Default for BootstrapModule {
    fn default() -> Self {
        Self {
            stem: "main".to_owned(),
            extension: "tsx".to_owned(),
        }
    }
}

impl BootstrapModule {
    fn matches(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(&self.extension)
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|_| file_name.contains(&self.stem))
    }
}

/// Immutable extension → content type table.
///
/// Built once and handed to the server; lookups are case-insensitive on the
/// extension.
#[derive(Clone, Debug)]
pub struct MediaTypeTable {
    types: BTreeMap<String, String>,
    fallback: String,
    bootstrap: Option<BootstrapModule>,
}

impl Default for MediaTypeTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_TYPES
                .iter()
                .map(|&(ext, ty)| (ext.to_owned(), ty.to_owned())),
        )
        .with_bootstrap(BootstrapModule::default())
    }
}

impl MediaTypeTable {
    /// Table with the given entries, no bootstrap override and the
    /// `application/octet-stream` fallback.
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            types: entries
                .into_iter()
                .map(|(ext, ty)| (ext.to_ascii_lowercase(), ty))
                .collect(),
            fallback: FALLBACK_MEDIA_TYPE.to_owned(),
            bootstrap: None,
        }
    }

    #[must_use]
    pub fn with_bootstrap(mut self, bootstrap: BootstrapModule) -> Self {
        self.bootstrap = Some(bootstrap);
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// All (extension, content type) pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(e, t)| (e.as_str(), t.as_str()))
    }

    pub fn bootstrap(&self) -> Option<&BootstrapModule> {
        self.bootstrap.as_ref()
    }

    /// Content type for a request path.
    pub fn resolve(&self, path: &str) -> &str {
        let file_name = path.rsplit('/').next().unwrap_or(path);

        if let Some(bootstrap) = &self.bootstrap
            && bootstrap.matches(file_name)
        {
            return SCRIPT_MEDIA_TYPE;
        }

        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.types.get(&ext.to_ascii_lowercase()))
            .map_or(self.fallback.as_str(), String::as_str)
    }
}
