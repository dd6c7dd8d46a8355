//! Code block processor hook.
//!
//! Special fences (diagrams today) are handled by processors registered on the
//! renderer instead of being hard-wired into it. Processors are consulted in
//! registration order; the first one that does not answer
//! [`ProcessResult::PassThrough`] decides what the block becomes.

use std::collections::BTreeMap;

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the block with this HTML right away.
    Inline(String),

    /// Render as an ordinary code block.
    PassThrough,
}

/// A code block a processor claimed, kept for the caller after rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedCodeBlock {
    /// Zero-based index of this code block in the document.
    pub index: usize,
    /// Language identifier from the fence (e.g., "mermaid").
    pub language: String,
    /// Raw source content of the code block.
    pub source: String,
    /// Attributes parsed from the fence (`theme=dark` → {"theme": "dark"}).
    pub attrs: BTreeMap<String, String>,
}

/// Trait for processing special code blocks.
pub trait CodeBlockProcessor {
    /// Process a code block and return what it should become.
    ///
    /// # Arguments
    ///
    /// * `language` - Language identifier from fence info string
    /// * `attrs` - Attributes parsed from fence (key=value pairs)
    /// * `source` - Raw content of the code block
    /// * `index` - Zero-based position of the block in the document
    fn process(
        &mut self,
        language: &str,
        attrs: &BTreeMap<String, String>,
        source: &str,
        index: usize,
    ) -> ProcessResult;

    /// Blocks this processor claimed during rendering.
    fn extracted(&self) -> &[ExtractedCodeBlock] {
        &[]
    }

    /// Warnings generated during processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Parse fence info string into language and attributes.
///
/// Format: `language [key=value ...]`. Surrounding quotes on values are
/// stripped; tokens without `=` are ignored.
#[must_use]
pub(crate) fn parse_fence_info(info: &str) -> (String, BTreeMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let attrs = parts
        .filter_map(|part| part.split_once('='))
        .map(|(key, value)| {
            let value = value.trim_matches('"').trim_matches('\'');
            (key.to_owned(), value.to_owned())
        })
        .collect();

    (language, attrs)
}
