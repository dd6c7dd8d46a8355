//! Whole-document parsing: frontmatter, body HTML and diagram blocks.

use crate::code_block::ExtractedCodeBlock;
use crate::diagram::{DEFAULT_DIAGRAM_LANGUAGES, DiagramFlagger};
use crate::frontmatter::{Frontmatter, ParseError, split_frontmatter};
use crate::html::HtmlBackend;
use crate::renderer::MarkdownRenderer;
use crate::state::TocEntry;

/// Options for [`parse_document`].
#[derive(Clone, Debug)]
pub struct DocumentOptions {
    /// Directory of the document relative to the content root (`""` for the
    /// root). Relative links are resolved against it.
    pub base_dir: String,
    /// Fence languages flagged as diagrams.
    pub diagram_languages: Vec<String>,
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            base_dir: String::new(),
            diagram_languages: DEFAULT_DIAGRAM_LANGUAGES
                .iter()
                .map(|&l| l.to_owned())
                .collect(),
            gfm: true,
        }
    }
}

impl DocumentOptions {
    /// Options for the document at `relative_path` (e.g. `guide/intro.md`).
    #[must_use]
    pub fn for_path(relative_path: &str) -> Self {
        let normalized = relative_path.replace('\\', "/");
        let base_dir = normalized
            .rsplit_once('/')
            .map(|(dir, _)| dir.trim_start_matches("./").to_owned())
            .unwrap_or_default();
        Self {
            base_dir,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_diagram_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diagram_languages = languages.into_iter().map(Into::into).collect();
        self
    }
}

/// A parsed source document.
#[derive(Clone, Debug)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    /// Body rendered as an HTML fragment.
    pub html: String,
    /// Text of the first heading in document order, at any level.
    pub title: Option<String>,
    pub toc: Vec<TocEntry>,
    /// Code blocks flagged as diagrams, in document order.
    pub diagrams: Vec<ExtractedCodeBlock>,
    pub warnings: Vec<String>,
}

/// Parse one source document.
///
/// # Errors
///
/// Returns [`ParseError`] when the frontmatter block is malformed. Problems
/// inside the body never fail; they are reported in
/// [`ParsedDocument::warnings`].
pub fn parse_document(raw: &str, options: &DocumentOptions) -> Result<ParsedDocument, ParseError> {
    let (frontmatter, body) = split_frontmatter(raw)?;

    let mut renderer = MarkdownRenderer::<HtmlBackend>::new()
        .with_title_extraction()
        .with_gfm(options.gfm)
        .with_base_dir(options.base_dir.clone())
        .with_processor(DiagramFlagger::new(options.diagram_languages.iter().cloned()));

    let result = renderer.render_markdown(body);
    let diagrams = renderer.extracted_code_blocks().collect();

    Ok(ParsedDocument {
        frontmatter,
        html: result.html,
        title: result.first_heading,
        toc: result.toc,
        diagrams,
        warnings: result.warnings,
    })
}
