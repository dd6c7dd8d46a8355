//! Diagram fence flagging.
//!
//! Diagram sources are not rendered at build time. The block is emitted as a
//! marked `<pre>` that the client router swaps for a diagram container:
//!
//! ```html
//! <pre class="diagram" data-diagram="mermaid"><code class="language-mermaid">graph TD; A--&gt;B</code></pre>
//! ```

use std::collections::BTreeMap;

use crate::code_block::{CodeBlockProcessor, ExtractedCodeBlock, ProcessResult};
use crate::state::escape_html;

/// Fence languages flagged when no explicit list is configured.
pub const DEFAULT_DIAGRAM_LANGUAGES: &[&str] = &["mermaid"];

/// Code block processor that flags diagram fences for client-side rendering.
#[derive(Debug)]
pub struct DiagramFlagger {
    languages: Vec<String>,
    extracted: Vec<ExtractedCodeBlock>,
    warnings: Vec<String>,
}

impl DiagramFlagger {
    /// Flag fences whose language is one of `languages` (case-insensitive).
    #[must_use]
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages
                .into_iter()
                .map(|l| l.into().to_ascii_lowercase())
                .collect(),
            extracted: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn is_diagram(&self, language: &str) -> bool {
        self.languages
            .iter()
            .any(|l| l.eq_ignore_ascii_case(language))
    }
}

impl Default for DiagramFlagger {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGRAM_LANGUAGES.iter().copied())
    }
}

impl CodeBlockProcessor for DiagramFlagger {
    fn process(
        &mut self,
        language: &str,
        attrs: &BTreeMap<String, String>,
        source: &str,
        index: usize,
    ) -> ProcessResult {
        if !self.is_diagram(language) {
            return ProcessResult::PassThrough;
        }

        let language = language.to_ascii_lowercase();
        if source.trim().is_empty() {
            self.warnings
                .push(format!("empty {language} diagram (code block {index})"));
        }

        let lang = escape_html(&language);
        let html = format!(
            r#"<pre class="diagram" data-diagram="{lang}"><code class="language-{lang}">{}</code></pre>"#,
            escape_html(source)
        );

        self.extracted.push(ExtractedCodeBlock {
            index,
            language,
            source: source.to_owned(),
            attrs: attrs.clone(),
        });

        ProcessResult::Inline(html)
    }

    fn extracted(&self) -> &[ExtractedCodeBlock] {
        &self.extracted
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
