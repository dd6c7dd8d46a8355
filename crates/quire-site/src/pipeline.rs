//! Build pipeline: materialize assets, then build the site.

use std::fs;
use std::path::{Path, PathBuf};

use quire_assets::{MaterializeOptions, MaterializeReport, Materializer};

use crate::builder::{BuildOptions, BuildReport, SiteBuilder, is_within};
use crate::error::SiteError;

/// Everything a full build needs.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Where user-owned top-level files are copied from.
    pub assets_dir: PathBuf,
    pub site_title: String,
    pub diagram_languages: Vec<String>,
}

/// Reports from both stages of a pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineReport {
    pub assets: MaterializeReport,
    pub build: BuildReport,
}

impl PipelineReport {
    /// Warnings from every stage, in stage order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.assets
            .warnings
            .iter()
            .chain(&self.build.warnings)
            .map(String::as_str)
    }
}

/// Asset materialization followed by a full site build.
pub struct Pipeline {
    materializer: Materializer,
    builder: SiteBuilder,
}

impl Pipeline {
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        let materializer = Materializer::new(MaterializeOptions {
            assets_dir: options.assets_dir,
            output_dir: options.output_dir.clone(),
            site_title: options.site_title,
        });
        let builder = SiteBuilder::new(BuildOptions {
            source_dir: options.source_dir,
            output_dir: options.output_dir,
            diagram_languages: options.diagram_languages,
        });
        Self {
            materializer,
            builder,
        }
    }

    /// Run both stages.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: an unwritable output root or an
    /// unreadable content root.
    pub fn run(&self) -> Result<PipelineReport, SiteError> {
        let assets = self.materializer.run()?;
        let build = self.builder.build()?;
        Ok(PipelineReport { assets, build })
    }
}

/// Remove the output root.
///
/// Returns `false` when there was nothing to remove.
///
/// # Errors
///
/// Returns [`SiteError::UnsafeClean`] if `source_dir` is `output_dir` or lies
/// inside it, and [`SiteError::Write`] if removal fails.
pub fn clean(output_dir: &Path, source_dir: &Path) -> Result<bool, SiteError> {
    if !output_dir.exists() {
        return Ok(false);
    }
    if is_within(source_dir, output_dir) {
        return Err(SiteError::UnsafeClean {
            path: output_dir.to_path_buf(),
        });
    }
    fs::remove_dir_all(output_dir).map_err(|e| SiteError::write(output_dir, e))?;
    tracing::info!(path = %output_dir.display(), "Removed output");
    Ok(true)
}
