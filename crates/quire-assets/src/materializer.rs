//! Output tree materialization.
//!
//! Two write policies apply, and neither ever replaces an existing file:
//!
//! - user-owned top-level files (`index.html`, `.nojekyll`, `CNAME`,
//!   `favicon.ico`) are copied from the assets directory when the
//!   destination is absent;
//! - build-owned files (`css/style.css`, `js/main.js`, `js/router.js`) are
//!   written from embedded templates when absent.
//!
//! A missing `index.html` source is replaced by a synthesized shell and a
//! missing `.nojekyll` by an empty file. Both are recovered, not fatal.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::templates;

/// Error returned when the output tree cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What to do when a user-owned file has no source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OnMissing {
    /// Write a generated replacement and warn.
    Synthesize,
    /// Create an empty file.
    CreateEmpty,
    /// Leave it out.
    Skip,
}

struct UserFile {
    name: &'static str,
    on_missing: OnMissing,
}

const USER_FILES: [UserFile; 4] = [
    UserFile {
        name: "index.html",
        on_missing: OnMissing::Synthesize,
    },
    UserFile {
        name: ".nojekyll",
        on_missing: OnMissing::CreateEmpty,
    },
    UserFile {
        name: "CNAME",
        on_missing: OnMissing::Skip,
    },
    UserFile {
        name: "favicon.ico",
        on_missing: OnMissing::Skip,
    },
];

const ASSET_DIRS: [&str; 2] = ["css", "js"];

const GENERATED_FILES: [(&str, fn() -> String); 3] = [
    ("css/style.css", templates::style_css),
    ("js/main.js", templates::main_js),
    ("js/router.js", templates::router_js),
];

/// Options for [`Materializer`].
#[derive(Clone, Debug)]
pub struct MaterializeOptions {
    /// Where user-owned top-level files are copied from.
    pub assets_dir: PathBuf,
    /// Output root.
    pub output_dir: PathBuf,
    /// Title used by a synthesized shell.
    pub site_title: String,
}

/// Outcome of a materialization run. Paths are relative to the output root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Copied from the assets directory.
    pub copied: Vec<String>,
    /// Written from templates, synthesized or created empty.
    pub generated: Vec<String>,
    /// Already present and left untouched.
    pub kept: Vec<String>,
    pub warnings: Vec<String>,
}

/// Ensures the static parts of the output tree exist.
pub struct Materializer {
    options: MaterializeOptions,
}

impl Materializer {
    #[must_use]
    pub fn new(options: MaterializeOptions) -> Self {
        Self { options }
    }

    /// Materialize the output tree.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Write`] if a directory or file in the output root
    /// cannot be created.
    pub fn run(&self) -> Result<MaterializeReport, AssetError> {
        let output = &self.options.output_dir;
        let mut report = MaterializeReport::default();

        create_dir(output)?;
        for file in &USER_FILES {
            self.place_user_file(file, &mut report)?;
        }

        for dir in ASSET_DIRS {
            create_dir(&output.join(dir))?;
        }
        for (name, render) in GENERATED_FILES {
            let path = output.join(name);
            if write_new(&path, render().as_bytes())? {
                tracing::debug!(path = %path.display(), "Generated asset");
                report.generated.push(name.to_owned());
            } else {
                report.kept.push(name.to_owned());
            }
        }

        tracing::info!(
            copied = report.copied.len(),
            generated = report.generated.len(),
            kept = report.kept.len(),
            "Materialized output assets"
        );
        Ok(report)
    }

    fn place_user_file(
        &self,
        file: &UserFile,
        report: &mut MaterializeReport,
    ) -> Result<(), AssetError> {
        let dest = self.options.output_dir.join(file.name);
        if dest.exists() {
            report.kept.push(file.name.to_owned());
            return Ok(());
        }

        let source = self.options.assets_dir.join(file.name);
        match File::open(&source) {
            Ok(mut reader) => {
                if copy_new(&mut reader, &dest)? {
                    tracing::debug!(path = %dest.display(), "Copied asset");
                    report.copied.push(file.name.to_owned());
                } else {
                    report.kept.push(file.name.to_owned());
                }
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                let warning = format!("cannot read {}: {e}", source.display());
                tracing::warn!(path = %source.display(), error = %e, "Cannot read asset");
                report.warnings.push(warning);
            }
        }

        let contents = match file.on_missing {
            OnMissing::Skip => return Ok(()),
            OnMissing::CreateEmpty => String::new(),
            OnMissing::Synthesize => {
                let warning = format!(
                    "{} not found in {}; writing a default site shell",
                    file.name,
                    self.options.assets_dir.display()
                );
                tracing::warn!(
                    path = %source.display(),
                    "Site shell missing, synthesizing default"
                );
                report.warnings.push(warning);
                templates::shell_html(&self.options.site_title)
            }
        };

        if write_new(&dest, contents.as_bytes())? {
            report.generated.push(file.name.to_owned());
        } else {
            report.kept.push(file.name.to_owned());
        }
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<(), AssetError> {
    fs::create_dir_all(path).map_err(|source| AssetError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Create `path` with `contents` unless it already exists.
///
/// Returns `false` when the file was already there.
fn write_new(path: &Path, contents: &[u8]) -> Result<bool, AssetError> {
    persist_new(path, |file| file.write_all(contents))
}

fn copy_new(reader: &mut File, path: &Path) -> Result<bool, AssetError> {
    persist_new(path, |file| io::copy(reader, file).map(drop))
}

/// Fill a temporary file next to `path`, then link it in place unless `path`
/// exists by then.
///
/// A failed fill removes the temporary file, so no partial file is ever left
/// under the final name for later runs to keep.
fn persist_new(
    path: &Path,
    fill: impl FnOnce(&mut File) -> io::Result<()>,
) -> Result<bool, AssetError> {
    let write_error = |source: io::Error| AssetError::Write {
        path: path.to_path_buf(),
        source,
    };
    if path.exists() {
        return Ok(false);
    }

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(parent).map_err(write_error)?;
    fill(tmp.as_file_mut())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(write_error)?;

    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(write_error(e.error)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn materializer(assets: &Path, output: &Path) -> Materializer {
        Materializer::new(MaterializeOptions {
            assets_dir: assets.to_path_buf(),
            output_dir: output.to_path_buf(),
            site_title: "Test Docs".to_owned(),
        })
    }

    #[test]
    fn test_copies_user_files_when_absent() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(assets.path().join("index.html"), "<html>mine</html>").unwrap();
        fs::write(assets.path().join("CNAME"), "docs.example.com").unwrap();
        fs::write(assets.path().join("favicon.ico"), [0u8, 1, 2]).unwrap();
        fs::write(assets.path().join(".nojekyll"), "").unwrap();

        let report = materializer(assets.path(), output.path()).run().unwrap();

        assert_eq!(report.copied, ["index.html", ".nojekyll", "CNAME", "favicon.ico"]);
        assert!(report.warnings.is_empty());
        assert_eq!(
            fs::read_to_string(output.path().join("index.html")).unwrap(),
            "<html>mine</html>"
        );
        assert_eq!(fs::read(output.path().join("favicon.ico")).unwrap(), [0, 1, 2]);
    }

    #[test]
    fn test_existing_destinations_untouched() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(assets.path().join("index.html"), "new").unwrap();
        fs::write(output.path().join("index.html"), "old").unwrap();
        fs::create_dir_all(output.path().join("css")).unwrap();
        fs::write(output.path().join("css/style.css"), "custom").unwrap();

        let report = materializer(assets.path(), output.path()).run().unwrap();

        assert_eq!(fs::read_to_string(output.path().join("index.html")).unwrap(), "old");
        assert_eq!(
            fs::read_to_string(output.path().join("css/style.css")).unwrap(),
            "custom"
        );
        assert!(report.kept.contains(&"index.html".to_owned()));
        assert!(report.kept.contains(&"css/style.css".to_owned()));
    }

    #[test]
    fn test_missing_shell_is_synthesized_with_warning() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let report = materializer(assets.path(), output.path()).run().unwrap();

        let shell = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(shell.contains("<title>Test Docs</title>"));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("index.html"));
    }

    #[test]
    fn test_missing_optional_files() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        materializer(assets.path(), output.path()).run().unwrap();

        assert_eq!(fs::read(output.path().join(".nojekyll")).unwrap(), b"");
        assert!(!output.path().join("CNAME").exists());
        assert!(!output.path().join("favicon.ico").exists());
    }

    #[test]
    fn test_generates_scripts_and_stylesheet() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let report = materializer(assets.path(), output.path()).run().unwrap();

        for name in ["css/style.css", "js/main.js", "js/router.js"] {
            assert!(output.path().join(name).is_file(), "{name} missing");
            assert!(report.generated.contains(&name.to_owned()));
        }
        let router = fs::read_to_string(output.path().join("js/router.js")).unwrap();
        assert!(router.contains("content/routes.json"));
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let materializer = materializer(assets.path(), output.path());

        materializer.run().unwrap();
        let shell = fs::read_to_string(output.path().join("index.html")).unwrap();
        let second = materializer.run().unwrap();

        assert!(second.copied.is_empty());
        assert!(second.generated.is_empty());
        assert!(second.warnings.is_empty());
        assert_eq!(fs::read_to_string(output.path().join("index.html")).unwrap(), shell);
    }

    #[test]
    fn test_creates_missing_output_root() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let nested = output.path().join("site/out");

        materializer(assets.path(), &nested).run().unwrap();

        assert!(nested.join("js/router.js").is_file());
    }

    #[test]
    fn test_unwritable_output_is_error() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let blocker = output.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let result = materializer(assets.path(), &blocker.join("out")).run();

        assert!(matches!(result, Err(AssetError::Write { .. })));
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");

        let result = persist_new(&path, |file| {
            file.write_all(b"<html><bo")?;
            Err(io::Error::other("no space left on device"))
        });

        assert!(matches!(result, Err(AssetError::Write { .. })));
        assert!(entries(dir.path()).is_empty());
        assert!(write_new(&path, b"<html></html>").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_existing_file_kept_without_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.js");
        fs::write(&path, "custom").unwrap();

        assert!(!write_new(&path, b"generated").unwrap());
        let mut source = File::open(&path).unwrap();
        assert!(!copy_new(&mut source, &path).unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "custom");
        assert_eq!(entries(dir.path()), ["router.js"]);
    }

    #[test]
    fn test_copy_new_writes_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("source.ico");
        fs::write(&source_path, [7u8; 4096]).unwrap();
        let dest = dir.path().join("favicon.ico");

        let mut source = File::open(&source_path).unwrap();
        assert!(copy_new(&mut source, &dest).unwrap());

        assert_eq!(fs::read(&dest).unwrap(), [7u8; 4096]);
        assert_eq!(entries(dir.path()), ["favicon.ico", "source.ico"]);
    }
}
