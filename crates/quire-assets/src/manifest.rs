//! Route manifest schema.
//!
//! `content/routes.json` is the only contract between the build and the client
//! router: an ordered JSON array of route records.
//!
//! ```json
//! [
//!   {"id": "index", "title": "Home", "category": null, "order": null},
//!   {"id": "", "title": "guide", "category": "guide", "order": null},
//!   {"id": "guide/intro", "title": "Intro", "category": "guide", "order": 1}
//! ]
//! ```

use serde::{Deserialize, Serialize};

/// Directory under the output root holding fragments and the manifest.
pub const CONTENT_DIR: &str = "content";

/// Manifest location relative to the output root.
pub const MANIFEST_PATH: &str = "content/routes.json";

/// One manifest record: a navigable route or a category header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Route id (`guide/intro`); empty for a category header.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

impl RouteDescriptor {
    /// A navigable route.
    #[must_use]
    pub fn route(
        id: impl Into<String>,
        title: impl Into<String>,
        category: Option<String>,
        order: Option<i64>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category,
            order,
        }
    }

    /// A category header (divider) for `category`.
    #[must_use]
    pub fn header(category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            id: String::new(),
            title: category.clone(),
            category: Some(category),
            order: None,
        }
    }

    #[must_use]
    pub fn is_header(&self) -> bool {
        self.id.is_empty()
    }
}

/// Ordered route records as written to [`MANIFEST_PATH`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteManifest {
    routes: Vec<RouteDescriptor>,
}

impl RouteManifest {
    #[must_use]
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Navigable routes, skipping category headers.
    pub fn pages(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter().filter(|r| !r.is_header())
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&RouteDescriptor> {
        self.pages().find(|r| r.id == id)
    }

    /// Check that every navigable route sits under a header for its own
    /// category (or under no header when uncategorized) and that ids are
    /// unique.
    ///
    /// Returns the index of the first offending record.
    pub fn validate(&self) -> Result<(), usize> {
        let mut current: Option<&str> = None;
        let mut seen = std::collections::HashSet::new();
        for (i, route) in self.routes.iter().enumerate() {
            if route.is_header() {
                current = route.category.as_deref();
                continue;
            }
            if route.category.as_deref() != current || !seen.insert(route.id.as_str()) {
                return Err(i);
            }
        }
        Ok(())
    }

    /// Serialize as pretty JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Parse manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid manifest.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> RouteManifest {
        RouteManifest::new(vec![
            RouteDescriptor::route("index", "Home", None, None),
            RouteDescriptor::header("guide"),
            RouteDescriptor::route("guide/intro", "Intro", Some("guide".to_owned()), Some(1)),
        ])
    }

    #[test]
    fn test_json_shape() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"id": "index", "title": "Home", "category": null, "order": null},
                {"id": "", "title": "guide", "category": "guide", "order": null},
                {"id": "guide/intro", "title": "Intro", "category": "guide", "order": 1}
            ])
        );
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_from_json_optional_fields() {
        let manifest = RouteManifest::from_json(r#"[{"id": "a", "title": "A"}]"#).unwrap();
        assert_eq!(manifest.routes()[0].category, None);
        assert_eq!(manifest.routes()[0].order, None);
    }

    #[test]
    fn test_pages_skip_headers() {
        let ids: Vec<_> = sample().pages().map(|r| r.id.clone()).collect();
        assert_eq!(ids, ["index", "guide/intro"]);
    }

    #[test]
    fn test_validate_accepts_grouped() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_member_under_wrong_header() {
        let manifest = RouteManifest::new(vec![
            RouteDescriptor::header("guide"),
            RouteDescriptor::route("api/ref", "Ref", Some("api".to_owned()), None),
        ]);
        assert_eq!(manifest.validate(), Err(1));
    }

    #[test]
    fn test_validate_rejects_uncategorized_after_header() {
        let manifest = RouteManifest::new(vec![
            RouteDescriptor::header("guide"),
            RouteDescriptor::route("index", "Home", None, None),
        ]);
        assert_eq!(manifest.validate(), Err(1));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let manifest = RouteManifest::new(vec![
            RouteDescriptor::route("a", "A", None, None),
            RouteDescriptor::route("a", "A again", None, None),
        ]);
        assert_eq!(manifest.validate(), Err(1));
    }
}
