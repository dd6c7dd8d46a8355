//! Static file serving.
//!
//! Resolves request paths against the ordered static roots, with an SPA
//! fallback to `index.html` for extension-less paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::state::AppState;

const INDEX: &str = "index.html";
const HTML: &str = "text/html; charset=utf-8";

/// Hidden names the build writes itself; every other dot segment is refused.
const SERVED_DOTFILES: [&str; 1] = [".nojekyll"];

/// Create router for static file serving with SPA fallback.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new().fallback(serve_static)
}

/// Map a raw request path to a relative file path.
///
/// `/` becomes `index.html`. Invalid UTF-8 is decoded lossily so client
/// routes still reach the SPA fallback. Returns `None` for paths with a `..`
/// or backslash segment, and for hidden segments (`.git`, `.env`) other than
/// the build's own dotfiles.
fn request_path(raw: &str) -> Option<String> {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();

    let mut segments = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains('\\') => return None,
            s if s.starts_with('.') && !SERVED_DOTFILES.contains(&s) => return None,
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        Some(INDEX.to_owned())
    } else {
        Some(segments.join("/"))
    }
}

/// First root holding `rel` as a regular file.
async fn find_file(roots: &[PathBuf], rel: &str) -> Option<PathBuf> {
    for root in roots {
        let candidate = root.join(rel);
        if tokio::fs::metadata(&candidate)
            .await
            .is_ok_and(|m| m.is_file())
        {
            return Some(candidate);
        }
    }
    None
}

fn has_extension(rel: &str) -> bool {
    Path::new(rel).extension().is_some()
}

/// Serve a static file or fall back to `index.html` for client routes.
async fn serve_static(State(state): State<Arc<AppState>>, req: Request<Body>) -> Response {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let Some(rel) = request_path(req.uri().path()) else {
        return not_found();
    };

    if let Some(file) = find_file(&state.roots, &rel).await {
        let content_type = state.media_types.resolve(&rel).to_owned();
        return match tokio::fs::read(&file).await {
            Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
            Err(e) => {
                tracing::error!(path = %file.display(), error = %e, "Failed to read static file");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        };
    }

    if !has_extension(&rel)
        && let Some(index) = find_file(&state.roots, INDEX).await
        && let Ok(bytes) = tokio::fs::read(&index).await
    {
        tracing::debug!(path = %rel, "SPA fallback");
        return ([(header::CONTENT_TYPE, HTML)], bytes).into_response();
    }

    not_found()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Not Found",
    )
        .into_response()
}
