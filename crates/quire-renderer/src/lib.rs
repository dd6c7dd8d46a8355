//! Markdown document parsing for quire.
//!
//! This crate turns one source document into an HTML fragment:
//!
//! 1. [`split_frontmatter`] separates the leading YAML block (delimited by
//!    `---`) from the body.
//! 2. [`MarkdownRenderer`] walks pulldown-cmark events and writes HTML through
//!    a [`RenderBackend`], rewriting cross-document links into hash routes.
//! 3. [`DiagramFlagger`] marks diagram code fences so the browser can turn
//!    them into rendered diagrams.
//!
//! [`parse_document`] runs all three and returns a [`ParsedDocument`].
//!
//! # Example
//!
//! ```
//! use quire_renderer::{DocumentOptions, parse_document};
//!
//! let raw = "---\ntitle: Intro\n---\n# Intro\n\nSee [setup](./setup.md).";
//! let doc = parse_document(raw, &DocumentOptions::for_path("guide/intro.md")).unwrap();
//!
//! assert_eq!(doc.frontmatter.get("title"), Some("Intro"));
//! assert!(doc.html.contains(r##"href="#/guide/setup""##));
//! ```

mod backend;
mod code_block;
mod diagram;
mod document;
mod frontmatter;
mod html;
mod renderer;
mod state;
mod util;

pub use backend::{AlertKind, RenderBackend};
pub use code_block::{CodeBlockProcessor, ExtractedCodeBlock, ProcessResult};
pub use diagram::{DEFAULT_DIAGRAM_LANGUAGES, DiagramFlagger};
pub use document::{DocumentOptions, ParsedDocument, parse_document};
pub use frontmatter::{Frontmatter, ParseError, split_frontmatter};
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
pub use util::{is_document_path, route_id};
