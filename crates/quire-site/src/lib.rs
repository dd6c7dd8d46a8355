//! Site build for quire.
//!
//! This crate provides:
//! - [`SiteBuilder`]: walks a content root, parses every document and writes
//!   one HTML fragment per route plus `content/routes.json`
//! - [`Pipeline`]: asset materialization followed by a full build
//! - [`clean`]: removal of the output root
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use quire_site::{Pipeline, PipelineOptions};
//!
//! let pipeline = Pipeline::new(PipelineOptions {
//!     source_dir: "docs".into(),
//!     output_dir: "dist".into(),
//!     assets_dir: ".".into(),
//!     site_title: "Documentation".to_owned(),
//!     diagram_languages: vec!["mermaid".to_owned()],
//! });
//!
//! let report = pipeline.run()?;
//! for warning in report.warnings() {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod manifest;
mod page;
mod pipeline;
mod scanner;
mod write;

pub use builder::{BuildOptions, BuildReport, SiteBuilder, fragment_path};
pub use error::SiteError;
pub use page::Page;
pub use pipeline::{Pipeline, PipelineOptions, PipelineReport, clean};

pub use quire_assets::{RouteDescriptor, RouteManifest};
