/**
 * Server Configuration
 *
 * Turns the loaded `AppConfig` into a message store. A store that cannot
 * connect at startup is still returned: the server comes up disconnected and
 * viewers can trigger a reconnect later. Only invalid configuration stops
 * startup.
 */

use std::sync::Arc;

use crate::shared::{AppConfig, ConfigError};
use crate::store::{connector_for, MessageStore};

/// Build the message store and attempt the initial connection
pub async fn load_store(config: &AppConfig) -> Result<Arc<MessageStore>, ConfigError> {
    let connector = connector_for(&config.database)?;
    let store = Arc::new(MessageStore::from_boxed(connector));

    match store.connect().await {
        Ok(()) => tracing::info!("Message store ready"),
        Err(e) => {
            tracing::error!("Initial message store connection failed: {}", e);
            tracing::warn!("Starting disconnected. POST /api/reconnect to retry.");
        }
    }

    Ok(store)
}
