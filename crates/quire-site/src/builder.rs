//! Full site build: content root to fragments and manifest.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use quire_assets::{CONTENT_DIR, MANIFEST_PATH, RouteManifest};
use quire_renderer::DEFAULT_DIAGRAM_LANGUAGES;
use rayon::prelude::*;

use crate::error::SiteError;
use crate::manifest::build_manifest;
use crate::page::{Page, load_page};
use crate::scanner::Scanner;
use crate::write::write_atomic;

/// Options for [`SiteBuilder`].
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Content root.
    pub source_dir: PathBuf,
    /// Output root; fragments go under `content/`.
    pub output_dir: PathBuf,
    /// Fence languages flagged as diagrams.
    pub diagram_languages: Vec<String>,
}

impl BuildOptions {
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            diagram_languages: DEFAULT_DIAGRAM_LANGUAGES
                .iter()
                .map(|&l| l.to_owned())
                .collect(),
        }
    }
}

/// Outcome of a build.
#[derive(Clone, Debug)]
pub struct BuildReport {
    pub manifest: RouteManifest,
    /// Pages that made it into the manifest.
    pub pages: usize,
    /// Fragments whose content changed on disk.
    pub fragments_written: usize,
    /// Non-document files copied or refreshed under `content/`.
    pub assets_copied: usize,
    /// Fragments left by earlier builds whose documents are gone or broken.
    pub fragments_removed: usize,
    /// Skipped documents and other recovered problems.
    pub warnings: Vec<String>,
}

/// Builds fragments and the route manifest from a content root.
///
/// Every build covers the whole tree. Writes go through a temp-file-and-rename
/// and skip files whose bytes are unchanged, so repeated builds of the same
/// tree leave the output identical. `content/` is owned by the build: `.html`
/// files there that the current tree did not produce are deleted.
pub struct SiteBuilder {
    options: BuildOptions,
}

impl SiteBuilder {
    #[must_use]
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run the build.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::ContentRoot`] when the content root cannot be
    /// listed and [`SiteError::Write`] when output cannot be written.
    /// Unreadable or malformed documents are reported as warnings.
    pub fn build(&self) -> Result<BuildReport, SiteError> {
        let start = Instant::now();
        let scan = Scanner::new(&self.options.source_dir).scan()?;
        let mut warnings = scan.warnings;

        let loaded: Vec<_> = scan
            .documents
            .par_iter()
            .map(|file| load_page(file, &self.options.diagram_languages))
            .collect();

        let mut pages: Vec<Page> = Vec::with_capacity(loaded.len());
        let mut sources_by_id: HashMap<String, String> = HashMap::new();
        for result in loaded {
            match result {
                Ok(mut page) => {
                    if let Some(first) = sources_by_id.get(&page.id) {
                        tracing::warn!(
                            path = %page.source,
                            id = %page.id,
                            "Duplicate route, keeping {first}"
                        );
                        warnings.push(format!(
                            "{}: route {} already defined by {first}; skipped",
                            page.source, page.id
                        ));
                        continue;
                    }
                    for warning in &page.warnings {
                        tracing::warn!(path = %page.source, "{warning}");
                    }
                    warnings.append(&mut page.warnings);
                    sources_by_id.insert(page.id.clone(), page.source.clone());
                    pages.push(page);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping document");
                    warnings.push(e.to_string());
                }
            }
        }

        let manifest = build_manifest(&pages);
        let content_dir = self.options.output_dir.join(CONTENT_DIR);

        let mut fragments_written = 0;
        let mut reserved: HashSet<String> = HashSet::with_capacity(pages.len() + 1);
        for page in &pages {
            let rel = fragment_path(&page.id);
            let path = self.options.output_dir.join(&rel);
            if write_atomic(&path, page.html.as_bytes())? {
                tracing::debug!(path = %path.display(), "Wrote fragment");
                fragments_written += 1;
            }
            reserved.insert(rel);
        }
        reserved.insert(MANIFEST_PATH.to_owned());

        let mut assets_copied = 0;
        let mut keep = reserved.clone();
        for asset in &scan.assets {
            let rel = format!("{CONTENT_DIR}/{}", asset.rel_path);
            if reserved.contains(&rel) {
                tracing::warn!(path = %asset.rel_path, "Asset collides with generated output");
                warnings.push(format!(
                    "{}: collides with generated {rel}; not copied",
                    asset.rel_path
                ));
                continue;
            }
            keep.insert(rel);
            match fs::read(&asset.path) {
                Ok(bytes) => {
                    if write_atomic(&content_dir.join(&asset.rel_path), &bytes)? {
                        assets_copied += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %asset.path.display(), error = %e, "Cannot read asset");
                    warnings.push(format!("cannot read {}: {e}", asset.path.display()));
                }
            }
        }

        // Manifest last: it only ever points at fragments that exist.
        let json = manifest
            .to_json()
            .map_err(|e| SiteError::write(self.manifest_path(), e.into()))?;
        write_atomic(&self.manifest_path(), json.as_bytes())?;
        let fragments_removed = self.remove_stale_fragments(&keep)?;

        tracing::info!(
            pages = pages.len(),
            fragments_written,
            fragments_removed,
            assets_copied,
            warnings = warnings.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Site built"
        );

        Ok(BuildReport {
            pages: pages.len(),
            manifest,
            fragments_written,
            assets_copied,
            fragments_removed,
            warnings,
        })
    }

    /// Delete `.html` files under `content/` whose output-relative path is not
    /// in `keep`. Runs after the manifest is written, so the manifest on disk
    /// never names a removed fragment.
    fn remove_stale_fragments(&self, keep: &HashSet<String>) -> Result<usize, SiteError> {
        let output = &self.options.output_dir;
        let mut removed = 0;
        let mut dirs = vec![output.join(CONTENT_DIR)];

        while let Some(dir) = dirs.pop() {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(SiteError::write(&dir, e)),
            };
            for entry in entries {
                let entry = entry.map_err(|e| SiteError::write(&dir, e))?;
                let path = entry.path();
                let file_type = entry.file_type().map_err(|e| SiteError::write(&path, e))?;
                if file_type.is_dir() {
                    dirs.push(path);
                    continue;
                }
                if path.extension().is_none_or(|ext| ext != "html") {
                    continue;
                }
                let Ok(rel) = path.strip_prefix(output) else {
                    continue;
                };
                if keep.contains(&rel.to_string_lossy().replace('\\', "/")) {
                    continue;
                }
                fs::remove_file(&path).map_err(|e| SiteError::write(&path, e))?;
                tracing::debug!(path = %path.display(), "Removed stale fragment");
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn manifest_path(&self) -> PathBuf {
        self.options.output_dir.join(MANIFEST_PATH)
    }
}

/// Fragment location for a route, relative to the output root.
#[must_use]
pub fn fragment_path(route_id: &str) -> String {
    format!("{CONTENT_DIR}/{route_id}.html")
}

/// Whether `path` is `ancestor` or lies inside it, after resolving both.
pub(crate) fn is_within(path: &Path, ancestor: &Path) -> bool {
    let resolve = |p: &Path| fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
    resolve(path).starts_with(resolve(ancestor))
}
