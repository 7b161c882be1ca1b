//! Client page endpoint.

use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use crate::app_state::AppState;
use crate::error::RelayError;

/// `GET /` serves the map client.
///
/// The file is read on every request, so the page can be edited without
/// restarting the relay.
///
/// # Errors
///
/// Returns [`RelayError::ClientPage`] if the configured file cannot be
/// read.
pub async fn page_handler(State(state): State<AppState>) -> Result<impl IntoResponse, RelayError> {
    let body = tokio::fs::read_to_string(state.client_page_path.as_path())
        .await
        .inspect_err(|e| {
            tracing::warn!(path = %state.client_page_path.display(), error = %e, "client page unavailable");
        })?;
    Ok(Html(body))
}

/// Page route mounted at the root.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(page_handler))
}
