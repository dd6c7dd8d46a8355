//! HTML backend for markdown rendering.
//!
//! Produces HTML fragments meant to be injected into the site shell by the
//! client router. Links between documents become hash routes (`#/guide/setup`)
//! and relative resource URLs are re-rooted under the output `content/`
//! directory, because a fragment is displayed from the shell's location rather
//! than from its own.

use std::borrow::Cow;
use std::fmt::Write;

use crate::backend::{AlertKind, RenderBackend};
use crate::state::escape_html;
use crate::util::{CONTENT_DIR, is_document_path, route_id};

/// HTML render backend.
///
/// Produces HTML5 with:
/// - `<pre><code class="language-*">` for code blocks
/// - `<div class="alert alert-*">` panels for GitHub alerts
/// - `#/route` hrefs for links to other documents
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn alert_start(kind: AlertKind, out: &mut String) {
        let (class, title) = match kind {
            AlertKind::Note => ("note", "Note"),
            AlertKind::Tip => ("tip", "Tip"),
            AlertKind::Important => ("important", "Important"),
            AlertKind::Warning => ("warning", "Warning"),
            AlertKind::Caution => ("caution", "Caution"),
        };
        write!(
            out,
            r#"<div class="alert alert-{class}"><p class="alert-title">{title}</p><div class="alert-content">"#
        )
        .unwrap();
    }

    fn alert_end(_kind: AlertKind, out: &mut String) {
        out.push_str("</div></div>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }

    fn transform_link<'a>(url: &'a str, base_dir: Option<&str>) -> Cow<'a, str> {
        match base_dir {
            Some(base) => resolve_link(url, base),
            None => Cow::Borrowed(url),
        }
    }

    fn transform_asset<'a>(url: &'a str, base_dir: Option<&str>) -> Cow<'a, str> {
        match base_dir {
            Some(base) if is_relative_local(url) => Cow::Owned(resolve_asset(url, base)),
            _ => Cow::Borrowed(url),
        }
    }
}

/// Whether a URL points at a file next to the document (no scheme, not rooted).
fn is_relative_local(url: &str) -> bool {
    !(url.is_empty()
        || url.starts_with('/')
        || url.starts_with('#')
        || url.starts_with("data:")
        || url.contains("://")
        || url.starts_with("mailto:")
        || url.starts_with("tel:"))
}

/// Resolve a link found in a document living in `base_dir`.
///
/// - `./setup.md` in `guide` → `#/guide/setup`
/// - `../api/ref.md#errors` in `guide` → `#/api/ref` (the anchor is dropped:
///   the hash already carries the route)
/// - `diagram.png` in `guide` → `content/guide/diagram.png`
/// - external links, rooted paths and `#fragment` links are unchanged
fn resolve_link<'a>(url: &'a str, base_dir: &str) -> Cow<'a, str> {
    if !is_relative_local(url) {
        // Rooted document links are still routes, just not relative ones.
        if let Some(rooted) = url.strip_prefix('/') {
            let path = rooted.split('#').next().unwrap_or(rooted);
            if is_document_path(path) {
                return Cow::Owned(format!("#/{}", route_id(path)));
            }
        }
        return Cow::Borrowed(url);
    }

    let path = url.split('#').next().unwrap_or(url);
    if is_document_path(path) {
        let resolved = resolve_relative_path(path, base_dir);
        Cow::Owned(format!("#/{}", route_id(&resolved)))
    } else {
        Cow::Owned(resolve_asset(url, base_dir))
    }
}

/// Re-root a relative resource URL under the output content directory.
fn resolve_asset(url: &str, base_dir: &str) -> String {
    let (path, suffix) = match url.find(['?', '#']) {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };
    let resolved = resolve_relative_path(path, base_dir);
    format!("{CONTENT_DIR}/{resolved}{suffix}")
}

/// Resolve a relative path against a base directory.
///
/// Handles `.` (current), `..` (parent), and plain relative paths. Leading
/// `..` components past the content root are dropped.
fn resolve_relative_path(relative: &str, base: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}
