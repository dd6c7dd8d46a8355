//! Client content router.
//!
//! The browser side of the site is `js/router.js`. This module models the same
//! state machine in Rust: it decides which view is shown, what the sidebar
//! looks like and which fragment to fetch. The script is hand-written; its
//! routing rules are executed by the tests below and compared with this model.
//!
//! Fetching is left to the caller. Every navigation that needs content returns
//! a [`FragmentRequest`] carrying a ticket; results are delivered with
//! [`ContentRouter::complete_fetch`] and only the latest ticket is applied, so
//! the last navigation wins when fetches overlap.

use std::fmt::Write;

use percent_encoding::percent_decode_str;

use crate::manifest::{CONTENT_DIR, RouteDescriptor, RouteManifest};

/// WebSocket endpoint for live reload messages.
pub const LIVE_RELOAD_PATH: &str = "/ws/live-reload";

/// Which top-level view is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    Landing,
    Docs,
}

/// What the content area currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentView {
    /// Landing view; nothing loaded.
    Empty,
    Loading { route: String },
    Loaded { route: String, html: String },
    /// All fragment candidates failed; a panel links back home.
    NotFound { route: String },
    /// The route manifest could not be fetched; a panel offers a retry.
    ManifestUnavailable { reason: String },
}

/// Sidebar entry built from the manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarItem {
    Divider { title: String },
    Link { href: String, title: String, active: bool },
}

/// Primary navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub title: String,
    pub active: bool,
}

/// Fragment fetch the caller should perform.
///
/// Try `candidates` in order and report the first successful body (or `None`
/// when all fail) with the same `ticket`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentRequest {
    pub ticket: u64,
    pub route: String,
    pub candidates: Vec<String>,
}

/// What to do with a clicked link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction {
    /// Handled in place; fetch this fragment if present.
    Navigate(Option<FragmentRequest>),
    /// In-page anchor; scroll to the element with this id.
    ScrollTo(String),
    /// Let the browser follow the link.
    Follow,
}

/// Extract the route from a location hash (`#/guide/intro` → `guide/intro`).
///
/// The route is percent-decoded; a hash that does not decode to UTF-8 is kept
/// as written. A missing or empty hash is the home route `""`.
#[must_use]
pub fn route_from_hash(hash: &str) -> String {
    let route = hash
        .strip_prefix("#/")
        .or_else(|| hash.strip_prefix('#'))
        .unwrap_or(hash);
    match percent_decode_str(route).decode_utf8() {
        Ok(decoded) => decoded.trim_matches('/').to_owned(),
        Err(_) => route.trim_matches('/').to_owned(),
    }
}

/// Hash for a route (`guide/intro` → `#/guide/intro`).
#[must_use]
pub fn route_href(route: &str) -> String {
    format!("#/{route}")
}

/// Fragment URLs to try for `route`, most likely first.
///
/// The alternate form tolerates fragments placed under their category
/// directory, or flat by slug, when the route id does not say so.
#[must_use]
pub fn fragment_candidates(route: &str, category: Option<&str>) -> Vec<String> {
    let primary = format!("{CONTENT_DIR}/{route}.html");
    let alternate = match category {
        Some(category) if !route.starts_with(&format!("{category}/")) => {
            format!("{CONTENT_DIR}/{category}/{route}.html")
        }
        _ => {
            let slug = route.rsplit('/').next().unwrap_or(route);
            format!("{CONTENT_DIR}/{slug}.html")
        }
    };

    if alternate == primary {
        vec![primary]
    } else {
        vec![primary, alternate]
    }
}

/// Replace flagged diagram blocks with diagram containers.
///
/// `<pre class="diagram" data-diagram="mermaid"><code …>src</code></pre>`
/// becomes `<div class="diagram mermaid" data-diagram="mermaid">src</div>`.
/// Returns the new HTML and the number of diagrams found.
#[must_use]
pub fn convert_diagrams(html: &str) -> (String, usize) {
    const OPEN: &str = r#"<pre class="diagram" data-diagram=""#;
    const CLOSE: &str = "</code></pre>";

    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    let mut count = 0;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(lang_end) = after_open.find('"') else {
            break;
        };
        let language = &after_open[..lang_end];
        let Some(code_start) = after_open.find("<code").and_then(|i| {
            after_open[i..].find('>').map(|j| i + j + 1)
        }) else {
            break;
        };
        let Some(code_len) = after_open[code_start..].find(CLOSE) else {
            break;
        };

        out.push_str(&rest[..start]);
        let _ = write!(
            out,
            r#"<div class="diagram {language}" data-diagram="{language}">"#
        );
        out.push_str(&after_open[code_start..code_start + code_len]);
        out.push_str("</div>");
        count += 1;

        rest = &after_open[code_start + code_len + CLOSE.len()..];
    }

    out.push_str(rest);
    (out, count)
}

/// Text of the first `<h1>` in a fragment, tags stripped.
#[must_use]
pub fn first_heading(html: &str) -> Option<String> {
    let start = html.find("<h1")?;
    let body_start = start + html[start..].find('>')? + 1;
    let body_len = html[body_start..].find("</h1>")?;
    let inner = &html[body_start..body_start + body_len];

    let mut text = String::with_capacity(inner.len());
    let mut in_tag = false;
    for c in inner.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

/// Browser-side routing state.
#[derive(Debug)]
pub struct ContentRouter {
    manifest: RouteManifest,
    view: ViewState,
    route: String,
    ticket: u64,
    content: ContentView,
    title: Option<String>,
    diagrams: usize,
    manifest_error: Option<String>,
}

impl ContentRouter {
    /// Start on the location hash `hash`.
    ///
    /// Returns the router and the first fetch, if the hash names a route.
    pub fn new(manifest: RouteManifest, hash: &str) -> (Self, Option<FragmentRequest>) {
        let mut router = Self {
            manifest,
            view: ViewState::Landing,
            route: String::new(),
            ticket: 0,
            content: ContentView::Empty,
            title: None,
            diagrams: 0,
            manifest_error: None,
        };
        let request = router.navigate(hash);
        (router, request)
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn content(&self) -> &ContentView {
        &self.content
    }

    /// Page title: first heading of the loaded fragment, else the manifest title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Number of diagram containers in the loaded fragment.
    pub fn diagram_count(&self) -> usize {
        self.diagrams
    }

    pub fn manifest(&self) -> &RouteManifest {
        &self.manifest
    }

    /// Why the last manifest fetch failed, while no manifest is loaded.
    pub fn manifest_error(&self) -> Option<&str> {
        self.manifest_error.as_deref()
    }

    /// React to a hash change (link click, back/forward, manual edit).
    pub fn navigate(&mut self, hash: &str) -> Option<FragmentRequest> {
        let route = route_from_hash(hash);
        self.ticket += 1;
        self.diagrams = 0;

        if let Some(reason) = &self.manifest_error {
            self.view = ViewState::Docs;
            self.content = ContentView::ManifestUnavailable {
                reason: reason.clone(),
            };
            self.route = route;
            self.title = None;
            return None;
        }

        if route.is_empty() {
            self.view = ViewState::Landing;
            self.route = route;
            self.content = ContentView::Empty;
            self.title = None;
            return None;
        }

        self.view = ViewState::Docs;
        self.title = self.descriptor(&route).map(|d| d.title.clone());
        self.content = ContentView::Loading {
            route: route.clone(),
        };
        self.route = route;
        Some(self.request())
    }

    /// The "get started" call to action: open the first route.
    pub fn get_started(&mut self) -> Option<FragmentRequest> {
        let first = self.manifest.pages().next()?.id.clone();
        self.navigate(&route_href(&first))
    }

    /// Decide how a clicked link inside the page is handled.
    pub fn follow_link(&mut self, href: &str) -> LinkAction {
        match href.strip_prefix('#') {
            Some(anchor) if !anchor.is_empty() && !anchor.starts_with('/') => {
                LinkAction::ScrollTo(anchor.to_owned())
            }
            Some(_) => LinkAction::Navigate(self.navigate(href)),
            None => LinkAction::Follow,
        }
    }

    /// Apply the result of a fetch.
    ///
    /// Returns `false` when the ticket is stale and the result was dropped.
    pub fn complete_fetch(&mut self, ticket: u64, body: Option<String>) -> bool {
        if ticket != self.ticket || self.view != ViewState::Docs || self.manifest_error.is_some()
        {
            return false;
        }

        let route = self.route.clone();
        self.content = match body {
            Some(html) => {
                if let Some(heading) = first_heading(&html) {
                    self.title = Some(heading);
                }
                let (html, diagrams) = convert_diagrams(&html);
                self.diagrams = diagrams;
                ContentView::Loaded { route, html }
            }
            None => ContentView::NotFound { route },
        };
        true
    }

    /// Swap in a rebuilt manifest (live reload) and refetch the open route.
    ///
    /// Also the retry path after [`ContentRouter::manifest_failed`].
    pub fn reload(&mut self, manifest: RouteManifest) -> Option<FragmentRequest> {
        self.manifest = manifest;
        self.manifest_error = None;
        let hash = route_href(&self.route);
        self.navigate(&hash)
    }

    /// Record a failed manifest fetch.
    ///
    /// Navigation is cleared, pending fetches are dropped and every route shows
    /// the unavailable panel until a manifest is delivered with
    /// [`ContentRouter::reload`].
    pub fn manifest_failed(&mut self, reason: impl Into<String>) {
        self.manifest = RouteManifest::default();
        self.manifest_error = Some(reason.into());
        let hash = route_href(&self.route);
        self.navigate(&hash);
    }

    /// Sidebar: a divider per category header, a link per route.
    pub fn sidebar(&self) -> Vec<SidebarItem> {
        self.manifest
            .routes()
            .iter()
            .map(|r| {
                if r.is_header() {
                    SidebarItem::Divider {
                        title: r.title.clone(),
                    }
                } else {
                    SidebarItem::Link {
                        href: route_href(&r.id),
                        title: r.title.clone(),
                        active: self.view == ViewState::Docs && r.id == self.route,
                    }
                }
            })
            .collect()
    }

    /// Primary navigation for the current view.
    ///
    /// Landing shows home and a link to the first route; docs adds one link
    /// per category, pointing at the category's first route.
    pub fn primary_nav(&self) -> Vec<NavLink> {
        let mut links = vec![NavLink {
            href: route_href(""),
            title: "Home".to_owned(),
            active: self.view == ViewState::Landing,
        }];

        match self.view {
            ViewState::Landing => {
                if let Some(first) = self.manifest.pages().next() {
                    links.push(NavLink {
                        href: route_href(&first.id),
                        title: "Docs".to_owned(),
                        active: false,
                    });
                }
            }
            ViewState::Docs => {
                let current = self.descriptor(&self.route).and_then(|d| d.category.as_deref());
                let mut seen = Vec::new();
                for page in self.manifest.pages() {
                    let Some(category) = page.category.as_deref() else {
                        continue;
                    };
                    if seen.contains(&category) {
                        continue;
                    }
                    seen.push(category);
                    links.push(NavLink {
                        href: route_href(&page.id),
                        title: category.to_owned(),
                        active: current == Some(category),
                    });
                }
            }
        }
        links
    }

    fn descriptor(&self, route: &str) -> Option<&RouteDescriptor> {
        self.manifest.find(route)
    }

    fn request(&self) -> FragmentRequest {
        let category = self
            .descriptor(&self.route)
            .and_then(|d| d.category.as_deref());
        FragmentRequest {
            ticket: self.ticket,
            route: self.route.clone(),
            candidates: fragment_candidates(&self.route, category),
        }
    }
}

#[cfg(test)]
mod tests {
    use boa_engine::{Context, Source};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde::de::DeserializeOwned;

    use super::*;
    use crate::templates::router_js;

    /// `js/router.js` loaded into a JS engine with no document.
    struct Script(Context);

    impl Script {
        fn load() -> Self {
            let mut context = Context::default();
            context.eval(Source::from_bytes(&router_js())).unwrap();
            Self(context)
        }

        fn run(&mut self, code: &str) {
            self.0.eval(Source::from_bytes(code)).unwrap();
        }

        fn eval<T: DeserializeOwned>(&mut self, code: &str) -> T {
            let value = self
                .0
                .eval(Source::from_bytes(&format!("JSON.stringify({code})")))
                .unwrap();
            let json = value.to_string(&mut self.0).unwrap().to_std_string_escaped();
            serde_json::from_str(&json).unwrap()
        }
    }

    #[derive(Debug, Deserialize)]
    struct Step {
        ticket: u64,
        route: String,
        fetch: bool,
    }

    fn js(value: &str) -> String {
        serde_json::to_string(value).unwrap()
    }

    fn manifest() -> RouteManifest {
        RouteManifest::new(vec![
            RouteDescriptor::route("a", "A", None, None),
            RouteDescriptor::route("b", "B", None, None),
            RouteDescriptor::header("guide"),
            RouteDescriptor::route("guide/intro", "Intro", Some("guide".to_owned()), None),
        ])
    }

    fn active_links(router: &ContentRouter) -> Vec<String> {
        router
            .sidebar()
            .into_iter()
            .filter_map(|item| match item {
                SidebarItem::Link { href, active: true, .. } => Some(href),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_route_from_hash() {
        assert_eq!(route_from_hash("#/guide/intro"), "guide/intro");
        assert_eq!(route_from_hash("#guide"), "guide");
        assert_eq!(route_from_hash("#/"), "");
        assert_eq!(route_from_hash("#"), "");
        assert_eq!(route_from_hash(""), "");
    }

    #[test]
    fn test_route_from_hash_decodes() {
        assert_eq!(route_from_hash("#/a%20b"), "a b");
        assert_eq!(route_from_hash("#/caf%C3%A9"), "café");
        assert_eq!(route_from_hash("#/%2Fguide%2F"), "guide");
        assert_eq!(route_from_hash("#/bad%FF"), "bad%FF");
    }

    #[test]
    fn test_manifest_failure_shows_panel_until_reload() {
        let (mut router, pending) = ContentRouter::new(manifest(), "#/a");
        router.manifest_failed("HTTP 500");

        let unavailable = ContentView::ManifestUnavailable {
            reason: "HTTP 500".to_owned(),
        };
        assert_eq!(router.content(), &unavailable);
        assert_eq!(router.view(), ViewState::Docs);
        assert_eq!(router.manifest_error(), Some("HTTP 500"));
        assert!(router.sidebar().is_empty());
        assert!(!router.complete_fetch(pending.unwrap().ticket, Some("<p>a</p>".to_owned())));

        assert!(router.navigate("#/").is_none());
        assert_eq!(router.view(), ViewState::Docs);
        assert!(router.navigate("#/b").is_none());
        assert_eq!(router.content(), &unavailable);

        let request = router.reload(manifest()).unwrap();
        assert_eq!(request.route, "b");
        assert!(router.complete_fetch(request.ticket, Some("<p>b</p>".to_owned())));
        assert_eq!(router.manifest_error(), None);
    }

    #[test]
    fn test_initial_landing() {
        let (router, request) = ContentRouter::new(manifest(), "");
        assert_eq!(router.view(), ViewState::Landing);
        assert_eq!(router.content(), &ContentView::Empty);
        assert!(request.is_none());
    }

    #[test]
    fn test_initial_docs() {
        let (router, request) = ContentRouter::new(manifest(), "#/a");
        assert_eq!(router.view(), ViewState::Docs);
        let request = request.unwrap();
        assert_eq!(request.route, "a");
        assert_eq!(request.candidates[0], "content/a.html");
    }

    #[test]
    fn test_hash_change_a_to_b() {
        let (mut router, first) = ContentRouter::new(manifest(), "#/a");
        let first = first.unwrap();
        assert!(router.complete_fetch(first.ticket, Some("<p>alpha</p>".to_owned())));
        assert_eq!(active_links(&router), ["#/a"]);

        let second = router.navigate("#/b").unwrap();
        assert!(router.complete_fetch(second.ticket, Some("<p>bravo</p>".to_owned())));

        assert_eq!(
            router.content(),
            &ContentView::Loaded {
                route: "b".to_owned(),
                html: "<p>bravo</p>".to_owned()
            }
        );
        assert_eq!(active_links(&router), ["#/b"]);
    }

    #[test]
    fn test_last_fetch_wins() {
        let (mut router, _) = ContentRouter::new(manifest(), "");
        let slow = router.navigate("#/a").unwrap();
        let fast = router.navigate("#/b").unwrap();

        assert!(router.complete_fetch(fast.ticket, Some("<p>b</p>".to_owned())));
        assert!(!router.complete_fetch(slow.ticket, Some("<p>a</p>".to_owned())));

        assert!(matches!(router.content(), ContentView::Loaded { route, .. } if route == "b"));
    }

    #[test]
    fn test_back_to_home_discards_pending_fetch() {
        let (mut router, request) = ContentRouter::new(manifest(), "#/a");
        router.navigate("#/");
        assert_eq!(router.view(), ViewState::Landing);
        assert!(!router.complete_fetch(request.unwrap().ticket, Some("x".to_owned())));
        assert_eq!(router.content(), &ContentView::Empty);
    }

    #[test]
    fn test_failed_fetch_shows_not_found() {
        let (mut router, request) = ContentRouter::new(manifest(), "#/missing");
        router.complete_fetch(request.unwrap().ticket, None);
        assert_eq!(
            router.content(),
            &ContentView::NotFound {
                route: "missing".to_owned()
            }
        );
    }

    #[test]
    fn test_get_started_opens_first_route() {
        let (mut router, _) = ContentRouter::new(manifest(), "");
        let request = router.get_started().unwrap();
        assert_eq!(request.route, "a");
        assert_eq!(router.view(), ViewState::Docs);
    }

    #[test]
    fn test_follow_link() {
        let (mut router, _) = ContentRouter::new(manifest(), "");
        assert!(matches!(
            router.follow_link("#/guide/intro"),
            LinkAction::Navigate(Some(_))
        ));
        assert_eq!(router.route(), "guide/intro");
        assert_eq!(router.follow_link("https://example.com"), LinkAction::Follow);
        assert_eq!(
            router.follow_link("#section"),
            LinkAction::ScrollTo("section".to_owned())
        );
    }

    #[test]
    fn test_sidebar_structure() {
        let (router, _) = ContentRouter::new(manifest(), "#/guide/intro");
        assert_eq!(
            router.sidebar(),
            vec![
                SidebarItem::Link {
                    href: "#/a".to_owned(),
                    title: "A".to_owned(),
                    active: false
                },
                SidebarItem::Link {
                    href: "#/b".to_owned(),
                    title: "B".to_owned(),
                    active: false
                },
                SidebarItem::Divider {
                    title: "guide".to_owned()
                },
                SidebarItem::Link {
                    href: "#/guide/intro".to_owned(),
                    title: "Intro".to_owned(),
                    active: true
                },
            ]
        );
    }

    #[test]
    fn test_primary_nav_variants() {
        let (mut router, _) = ContentRouter::new(manifest(), "");
        let titles: Vec<_> = router.primary_nav().into_iter().map(|l| l.title).collect();
        assert_eq!(titles, ["Home", "Docs"]);

        router.navigate("#/guide/intro");
        let nav = router.primary_nav();
        assert_eq!(nav.len(), 2);
        assert_eq!(nav[1].title, "guide");
        assert!(nav[1].active);
    }

    #[test]
    fn test_title_from_fragment_heading() {
        let (mut router, request) = ContentRouter::new(manifest(), "#/a");
        assert_eq!(router.title(), Some("A"));
        router.complete_fetch(
            request.unwrap().ticket,
            Some(r#"<h1 id="x">Alpha &amp; <code>Omega</code></h1>"#.to_owned()),
        );
        assert_eq!(router.title(), Some("Alpha & Omega"));
    }

    #[test]
    fn test_fragment_candidates() {
        assert_eq!(
            fragment_candidates("guide/intro", Some("guide")),
            ["content/guide/intro.html", "content/intro.html"]
        );
        assert_eq!(
            fragment_candidates("intro", Some("guide")),
            ["content/intro.html", "content/guide/intro.html"]
        );
        assert_eq!(fragment_candidates("a", None), ["content/a.html"]);
    }

    #[test]
    fn test_convert_diagrams() {
        let html = r#"<p>x</p><pre class="diagram" data-diagram="mermaid"><code class="language-mermaid">graph TD; A--&gt;B</code></pre>"#;
        let (converted, count) = convert_diagrams(html);
        assert_eq!(count, 1);
        assert_eq!(
            converted,
            r#"<p>x</p><div class="diagram mermaid" data-diagram="mermaid">graph TD; A--&gt;B</div>"#
        );
    }

    #[test]
    fn test_convert_diagrams_leaves_plain_code() {
        let html = r#"<pre><code class="language-rust">fn x() {}</code></pre>"#;
        assert_eq!(convert_diagrams(html), (html.to_owned(), 0));
    }

    #[test]
    fn test_reload_refetches_current_route() {
        let (mut router, _) = ContentRouter::new(manifest(), "#/b");
        let request = router.reload(manifest()).unwrap();
        assert_eq!(request.route, "b");
        assert!(matches!(router.content(), ContentView::Loading { .. }));
    }

    #[test]
    fn test_script_route_from_hash_agrees() {
        let mut script = Script::load();
        let hashes = [
            "",
            "#",
            "#/",
            "#guide",
            "#/guide/intro",
            "#/guide/intro/",
            "#/a%20b",
            "#/caf%C3%A9",
            "#/%2Fguide%2F",
            "#/bad%FF",
            "#/bad%ZZ",
        ];
        for hash in hashes {
            let from_script: String = script.eval(&format!("quire.routeFromHash({})", js(hash)));
            assert_eq!(from_script, route_from_hash(hash), "{hash}");
        }
    }

    #[test]
    fn test_script_fragment_candidates_agree() {
        let mut script = Script::load();
        let cases = [
            ("guide/intro", Some("guide")),
            ("intro", Some("guide")),
            ("guide/deep/page", Some("guide")),
            ("a", None),
            ("guide/intro", None),
        ];
        for (route, category) in cases {
            let category_js = category.map_or_else(|| "null".to_owned(), js);
            let from_script: Vec<String> = script.eval(&format!(
                "quire.fragmentCandidates({}, {category_js})",
                js(route)
            ));
            assert_eq!(from_script, fragment_candidates(route, category), "{route}");
        }
    }

    #[test]
    fn test_script_tickets_agree() {
        let mut script = Script::load();
        script.run(&format!("quire.manifestLoaded({})", manifest().to_json().unwrap()));
        let home: Step = script.eval(r#"quire.beginNavigation("")"#);
        let (mut router, _) = ContentRouter::new(manifest(), "");
        assert!(!home.fetch);

        let slow: Step = script.eval(r##"quire.beginNavigation("#/a")"##);
        let fast: Step = script.eval(r##"quire.beginNavigation("#/b")"##);
        let rust_slow = router.navigate("#/a").unwrap();
        let rust_fast = router.navigate("#/b").unwrap();
        assert_eq!((slow.ticket, slow.route.as_str()), (rust_slow.ticket, "a"));
        assert_eq!((fast.ticket, fast.route.as_str()), (rust_fast.ticket, "b"));
        assert!(slow.fetch && fast.fetch);

        let slow_current: bool = script.eval(&format!("quire.isCurrent({})", slow.ticket));
        let fast_current: bool = script.eval(&format!("quire.isCurrent({})", fast.ticket));
        assert!(!slow_current);
        assert!(fast_current);
        assert!(!router.complete_fetch(rust_slow.ticket, Some("a".to_owned())));

        let back: Step = script.eval(r##"quire.beginNavigation("#/")"##);
        router.navigate("#/");
        assert!(!back.fetch);
        let fast_current: bool = script.eval(&format!("quire.isCurrent({})", fast.ticket));
        assert!(!fast_current);
        assert!(!router.complete_fetch(rust_fast.ticket, Some("b".to_owned())));
    }

    #[test]
    fn test_script_manifest_failure_agrees() {
        let mut script = Script::load();
        script.run(&format!("quire.manifestLoaded({})", manifest().to_json().unwrap()));
        let (mut router, _) = ContentRouter::new(manifest(), "");

        let pending: Step = script.eval(r##"quire.beginNavigation("#/a")"##);
        let rust_pending = router.navigate("#/a").unwrap();
        script.run(r#"quire.manifestFailed("HTTP 404")"#);
        router.manifest_failed("HTTP 404");

        let pending_current: bool = script.eval(&format!("quire.isCurrent({})", pending.ticket));
        assert!(!pending_current);
        assert!(!router.complete_fetch(rust_pending.ticket, Some("a".to_owned())));

        let blocked: Step = script.eval(r##"quire.beginNavigation("#/b")"##);
        assert!(!blocked.fetch);
        assert!(router.navigate("#/b").is_none());
        assert!(matches!(router.content(), ContentView::ManifestUnavailable { .. }));

        script.run(&format!("quire.manifestLoaded({})", manifest().to_json().unwrap()));
        let retried: Step = script.eval(r##"quire.beginNavigation("#/b")"##);
        let rust_retried = router.reload(manifest()).unwrap();
        assert!(retried.fetch);
        assert_eq!(retried.route, rust_retried.route);
    }
}
