//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use quire_assets::LIVE_RELOAD_PATH;
use tower::ServiceBuilder;

use crate::live_reload;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// The WebSocket route exists only when live reload is on; every other path
/// goes to the static handler.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new();

    if state.live_reload.is_some() {
        router = router.route(LIVE_RELOAD_PATH, get(live_reload::ws_handler));
    }

    router
        .merge(static_files::static_router())
        .layer(
            ServiceBuilder::new()
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
