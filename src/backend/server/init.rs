/**
 * Server Initialization
 *
 * 1. Build the message store from configuration and try to connect
 * 2. Wrap it in the chat room service and application state
 * 3. Assemble the router
 *
 * The store is returned alongside the router so the caller can shut the
 * session down once the server stops.
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::shared::{AppConfig, ConfigError};
use crate::store::MessageStore;

/// Create and configure the Axum application
pub async fn create_app(config: &AppConfig) -> Result<(Router<()>, Arc<MessageStore>), ConfigError> {
    tracing::info!("Initializing chatroom server");

    let store = load_store(config).await?;
    let app = create_app_with_store(store.clone());

    tracing::info!("Router configured");
    Ok((app, store))
}

/// Router over an already constructed store
pub fn create_app_with_store(store: Arc<MessageStore>) -> Router<()> {
    create_router(AppState::new(store))
}
