//! Client-side assets for quire sites.
//!
//! - [`Materializer`] fills the output root with the site shell, marker files
//!   and the generated stylesheet and scripts, never replacing what is there.
//! - [`RouteManifest`] is the `content/routes.json` schema shared by the build
//!   and the browser.
//! - [`ContentRouter`] models the hash router in `js/router.js`.

mod manifest;
mod materializer;
mod router;
pub mod templates;

pub use manifest::{CONTENT_DIR, MANIFEST_PATH, RouteDescriptor, RouteManifest};
pub use materializer::{AssetError, MaterializeOptions, MaterializeReport, Materializer};
pub use router::{
    ContentRouter, ContentView, FragmentRequest, LIVE_RELOAD_PATH, LinkAction, NavLink,
    SidebarItem, ViewState, convert_diagrams, first_heading, fragment_candidates, route_from_hash,
    route_href,
};
