//! Page loading: one source document to one routed page.

use std::fs;

use quire_renderer::{DocumentOptions, ParsedDocument, parse_document, route_id};

use crate::error::SiteError;
use crate::scanner::SourceFile;

/// A successfully parsed document with its route information.
#[derive(Clone, Debug)]
pub struct Page {
    /// Route id (`guide/intro`).
    pub id: String,
    /// Source path relative to the content root.
    pub source: String,
    pub title: String,
    pub category: Option<String>,
    pub order: Option<i64>,
    /// HTML fragment.
    pub html: String,
    /// Number of flagged diagram blocks.
    pub diagrams: usize,
    pub warnings: Vec<String>,
}

/// Read and parse `file`.
pub(crate) fn load_page(file: &SourceFile, diagram_languages: &[String]) -> Result<Page, SiteError> {
    let raw = fs::read_to_string(&file.path).map_err(|source| SiteError::SourceRead {
        path: file.path.clone(),
        source,
    })?;

    let options = DocumentOptions::for_path(&file.rel_path)
        .with_diagram_languages(diagram_languages.iter().cloned());
    let doc = parse_document(&raw, &options).map_err(|source| SiteError::Parse {
        path: file.path.clone(),
        source,
    })?;

    Ok(Page::from_document(&file.rel_path, doc))
}

impl Page {
    pub(crate) fn from_document(rel_path: &str, doc: ParsedDocument) -> Self {
        let mut warnings = doc.warnings;

        let order = doc.frontmatter.get("order").and_then(|value| {
            value
                .trim()
                .parse::<i64>()
                .inspect_err(|_| {
                    warnings.push(format!("{rel_path}: ignoring non-integer order {value:?}"));
                })
                .ok()
        });

        let category = doc
            .frontmatter
            .get("category")
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned)
            .or_else(|| top_level_dir(rel_path));

        let title = doc
            .frontmatter
            .get("title")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .or(doc.title)
            .unwrap_or_else(|| title_from_filename(rel_path));

        Self {
            id: route_id(rel_path),
            source: rel_path.to_owned(),
            title,
            category,
            order,
            html: doc.html,
            diagrams: doc.diagrams.len(),
            warnings,
        }
    }
}

/// Category of a document: its top-level directory, none at the root.
fn top_level_dir(rel_path: &str) -> Option<String> {
    rel_path
        .split_once('/')
        .map(|(dir, _)| dir.to_owned())
        .filter(|dir| !dir.is_empty())
}

/// Title derived from the file stem (`setup-guide.md` → `Setup Guide`).
fn title_from_filename(rel_path: &str) -> String {
    let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);

    let mut title = String::with_capacity(stem.len());
    for word in stem.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !title.is_empty() {
            title.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            title.extend(first.to_uppercase());
            title.push_str(chars.as_str());
        }
    }
    if title.is_empty() {
        stem.to_owned()
    } else {
        title
    }
}
