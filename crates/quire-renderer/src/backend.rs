//! Render backend trait for format-specific rendering.
//!
//! The generic renderer handles shared structure (lists, tables, inline
//! formatting); the backend decides how code blocks, quotes, images and links
//! are written out.

use std::borrow::Cow;

use pulldown_cmark::BlockQuoteKind;

/// GitHub-style alert kinds (`> [!NOTE]`, `> [!WARNING]`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// Backend trait for format-specific rendering operations.
pub trait RenderBackend {
    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `content` - The code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render the opening of an alert panel.
    fn alert_start(kind: AlertKind, out: &mut String);

    /// Render the closing of an alert panel.
    fn alert_end(kind: AlertKind, out: &mut String);

    /// Render an image.
    ///
    /// `src` has already been passed through [`transform_asset`](Self::transform_asset).
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Transform a link URL.
    ///
    /// Default implementation returns the URL unchanged.
    ///
    /// # Arguments
    ///
    /// * `url` - The original link URL
    /// * `base_dir` - Directory of the current document relative to the content root
    #[must_use]
    fn transform_link<'a>(url: &'a str, _base_dir: Option<&str>) -> Cow<'a, str> {
        Cow::Borrowed(url)
    }

    /// Transform the URL of a non-document resource (image source).
    ///
    /// Default implementation returns the URL unchanged.
    #[must_use]
    fn transform_asset<'a>(url: &'a str, _base_dir: Option<&str>) -> Cow<'a, str> {
        Cow::Borrowed(url)
    }

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
