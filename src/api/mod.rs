//! HTTP surface: client page, health check and the WebSocket route.

pub mod handlers;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete application router.
///
/// CORS is fully permissive: any origin, method and header.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::page::routes())
        .merge(handlers::system::routes())
        .route("/ws/{room_id}", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
