/**
 * API Route Handlers
 *
 * # Routes
 *
 * - `GET /api/messages` - Current timeline
 * - `POST /api/messages` - Post a message, optionally as a reply
 * - `POST /api/reconnect` - Replace the store session
 * - `GET /api/status` - Whether the store holds a live session
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::chat::handlers::{get_status, get_timeline, post_message, reconnect};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/messages", get(get_timeline).post(post_message))
        .route("/api/reconnect", post(reconnect))
        .route("/api/status", get(get_status))
}
