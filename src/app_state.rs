//! Shared application state injected into all Axum handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::RoomRegistry;
use crate::service::RelayService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Relay service used by every WebSocket connection.
    pub relay: Arc<RelayService>,
    /// File served as the client page.
    pub client_page_path: Arc<PathBuf>,
}

impl AppState {
    /// Builds the state around a fresh, empty [`RoomRegistry`].
    #[must_use]
    pub fn new(client_page_path: PathBuf, outbound_buffer: usize) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        Self {
            relay: Arc::new(RelayService::new(registry, outbound_buffer)),
            client_page_path: Arc::new(client_page_path),
        }
    }
}
