//! Embedded templates for generated files and the fallback site shell.
//!
//! Scripts are stored with `__NAME__` placeholders that are filled from the
//! constants the Rust side uses, so the browser and the build agree on paths.

use std::fmt::Write;

use crate::manifest::{CONTENT_DIR, MANIFEST_PATH};
use crate::router::LIVE_RELOAD_PATH;

const STYLE_CSS: &str = include_str!("../templates/style.css");
const MAIN_JS: &str = include_str!("../templates/main.js");
const ROUTER_JS: &str = include_str!("../templates/router.js");

/// Stylesheet written to `css/style.css`.
pub fn style_css() -> String {
    STYLE_CSS.to_owned()
}

/// Bootstrap script written to `js/main.js`.
pub fn main_js() -> String {
    fill(MAIN_JS, &[("__LIVE_RELOAD_PATH__", LIVE_RELOAD_PATH)])
}

/// Content router written to `js/router.js`.
pub fn router_js() -> String {
    fill(
        ROUTER_JS,
        &[
            ("__MANIFEST_PATH__", MANIFEST_PATH),
            ("__CONTENT_DIR__", CONTENT_DIR),
        ],
    )
}

fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_owned(), |text, (key, value)| text.replace(key, value))
}

/// Minimal site shell used when no `index.html` is provided.
pub fn shell_html(title: &str) -> String {
    let title = escape(title);
    let mut html = String::with_capacity(1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("<link rel=\"stylesheet\" href=\"css/style.css\">\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header class=\"site-header\">\n");
    let _ = writeln!(html, "<a class=\"site-title\" href=\"#/\">{title}</a>");
    html.push_str("<nav id=\"primary-nav\"></nav>\n");
    html.push_str("</header>\n");

    html.push_str("<section id=\"landing\">\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    html.push_str("<button class=\"cta\" type=\"button\" data-action=\"get-started\">Get started</button>\n");
    html.push_str("</section>\n");

    html.push_str("<div id=\"docs\" hidden>\n");
    html.push_str("<aside id=\"sidebar\"></aside>\n");
    html.push_str("<main id=\"content\"></main>\n");
    html.push_str("</div>\n");

    html.push_str("<script src=\"js/router.js\"></script>\n");
    html.push_str("<script src=\"js/main.js\"></script>\n");
    html.push_str("</body>\n</html>\n");
    html
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_js_placeholders_filled() {
        let js = router_js();
        assert!(!js.contains("__MANIFEST_PATH__"));
        assert!(!js.contains("__CONTENT_DIR__"));
        assert!(js.contains(r#"var MANIFEST_PATH = "content/routes.json";"#));
        assert!(js.contains(r#"var CONTENT_DIR = "content";"#));
    }

    #[test]
    fn test_main_js_placeholders_filled() {
        let js = main_js();
        assert!(js.contains(r#"var LIVE_RELOAD_PATH = "/ws/live-reload";"#));
    }

    #[test]
    fn test_shell_references_generated_files() {
        let html = shell_html("Docs");
        assert!(html.contains(r#"href="css/style.css""#));
        assert!(html.contains(r#"<script src="js/router.js"></script>"#));
        assert!(html.contains(r#"<script src="js/main.js"></script>"#));
        for id in ["primary-nav", "landing", "docs", "sidebar", "content"] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
    }

    #[test]
    fn test_shell_escapes_title() {
        let html = shell_html("A <b> & \"c\"");
        assert!(html.contains("<title>A &lt;b&gt; &amp; &quot;c&quot;</title>"));
    }

    #[test]
    fn test_style_css_not_empty() {
        assert!(style_css().contains("#sidebar"));
    }
}
