//! Leading YAML metadata block.
//!
//! A document may open with a `---` line; everything up to the next `---` (or
//! `...`) line is YAML and must be a mapping. Values are flattened to strings
//! in document order.

use serde_yaml::{Mapping, Value};

/// Error returned when a document's frontmatter cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Opening `---` without a closing marker.
    #[error("frontmatter starting at line 1 is never closed")]
    Unterminated,

    /// Block is not valid YAML.
    #[error("invalid frontmatter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Block is valid YAML but not a key/value mapping.
    #[error("frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Ordered key → string mapping read from a document's frontmatter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_mapping(mapping: Mapping) -> Self {
        let entries = mapping
            .into_iter()
            .filter_map(|(key, value)| Some((scalar_to_string(&key)?, value_to_string(value)?)))
            .collect();
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Split `raw` into frontmatter and body.
///
/// Text without an opening `---` line has empty frontmatter and is returned
/// whole as the body.
///
/// # Errors
///
/// Returns [`ParseError`] if the block is unterminated, is not valid YAML, or
/// is not a mapping.
pub fn split_frontmatter(raw: &str) -> Result<(Frontmatter, &str), ParseError> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(after_open) = strip_marker_line(text, "---") else {
        return Ok((Frontmatter::default(), text));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        let marker = line.trim_end_matches(['\r', '\n']);
        if marker == "---" || marker == "..." {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((parse_yaml(yaml)?, body));
        }
        offset += line.len();
    }

    Err(ParseError::Unterminated)
}

/// Strip `marker` when it makes up the whole first line.
fn strip_marker_line<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(marker)?;
    rest.strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .or_else(|| rest.is_empty().then_some(rest))
}

fn parse_yaml(yaml: &str) -> Result<Frontmatter, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => Ok(Frontmatter::from_mapping(mapping)),
        Value::Null => Ok(Frontmatter::default()),
        Value::Sequence(_) => Err(ParseError::NotAMapping("a sequence")),
        Value::Tagged(_) => Err(ParseError::NotAMapping("a tagged value")),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Err(ParseError::NotAMapping("a scalar"))
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Scalars keep their text; nested values are re-serialized as YAML; nulls
/// are dropped.
fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => serde_yaml::to_string(&value)
            .ok()
            .map(|s| s.trim_end().to_owned()),
        scalar => scalar_to_string(&scalar),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = split_frontmatter("# Title\n\nText").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "# Title\n\nText");
    }

    #[test]
    fn test_basic_frontmatter() {
        let (fm, body) = split_frontmatter("---\ntitle: Intro\norder: 2\n---\n# Intro\nHello").unwrap();
        assert_eq!(fm.get("title"), Some("Intro"));
        assert_eq!(fm.get("order"), Some("2"));
        assert_eq!(body, "# Intro\nHello");
    }

    #[test]
    fn test_preserves_key_order() {
        let (fm, _) = split_frontmatter("---\nzeta: 1\nalpha: 2\nmid: 3\n---\n").unwrap();
        let keys: Vec<_> = fm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_dots_close_block() {
        let (fm, body) = split_frontmatter("---\ntitle: A\n...\nBody").unwrap();
        assert_eq!(fm.get("title"), Some("A"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let (fm, body) = split_frontmatter("---\r\ntitle: Win\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(fm.get("title"), Some("Win"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_byte_order_mark_skipped() {
        let (fm, _) = split_frontmatter("\u{feff}---\ntitle: Bom\n---\n").unwrap();
        assert_eq!(fm.get("title"), Some("Bom"));
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = split_frontmatter("---\n---\ntext").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "text");
    }

    #[test]
    fn test_horizontal_rule_later_in_body_is_not_frontmatter() {
        let (fm, body) = split_frontmatter("Intro\n\n---\n\nMore").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "Intro\n\n---\n\nMore");
    }

    #[test]
    fn test_dash_prefix_is_not_a_marker() {
        let (fm, body) = split_frontmatter("----\ntext").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "----\ntext");
    }

    #[test]
    fn test_unterminated() {
        let err = split_frontmatter("---\ntitle: Oops\n# Heading").unwrap_err();
        assert!(matches!(err, ParseError::Unterminated));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = split_frontmatter("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_scalar_is_not_a_mapping() {
        let err = split_frontmatter("---\njust text\n---\nBody").unwrap_err();
        assert!(matches!(err, ParseError::NotAMapping("a scalar")));
    }

    #[test]
    fn test_value_types_flattened() {
        let (fm, _) =
            split_frontmatter("---\ndraft: true\nweight: 1.5\nempty:\ntags:\n  - a\n  - b\n---\n")
                .unwrap();
        assert_eq!(fm.get("draft"), Some("true"));
        assert_eq!(fm.get("weight"), Some("1.5"));
        assert_eq!(fm.get("empty"), None);
        assert_eq!(fm.get("tags"), Some("- a\n- b"));
    }

    #[test]
    fn test_from_iterator() {
        let fm: Frontmatter = [("title", "X")].into_iter().collect();
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get("title"), Some("X"));
    }
}
