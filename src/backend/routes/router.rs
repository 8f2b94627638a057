/**
 * Router Configuration
 *
 * Combines the health check and the chat API into a single router with
 * request tracing.
 */

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::chat::handlers::healthz;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// - `GET /healthz` - Liveness check, always `OK`
/// - `/api/...` - Chat API (see `api_routes`)
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/healthz", get(healthz));

    configure_api_routes(router)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
