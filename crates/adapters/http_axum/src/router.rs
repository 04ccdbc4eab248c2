//! Axum router assembly.

use axum::Router;
use axum::routing::{any, get};
use tower_http::trace::TraceLayer;

use remotectl_app::ports::{PlugConnector, RedfishConnector};

use crate::api;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<RC, PC>(state: AppState<RC, PC>) -> Router
where
    RC: RedfishConnector + 'static,
    PC: PlugConnector + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/redfish", any(api::redfish::<RC, PC>))
        .route("/plug", any(api::plug::<RC, PC>))
        .route("/", any(api::default_family::<RC, PC>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
