//! Live reload for the dev server.
//!
//! A `notify` watcher feeds a debouncer; each settled batch triggers a full
//! rebuild, after which connected WebSocket clients receive one
//! `{"type":"reload","path":...}` message per changed file.

mod debouncer;
mod manager;
mod websocket;

pub use manager::LiveReloadOptions;
pub(crate) use manager::{LiveReloadManager, ReloadEvent};
pub(crate) use websocket::ws_handler;
