/**
 * Chat Room Service
 *
 * The one caller of the message store. It turns viewer actions into store
 * calls and always answers with a complete timeline:
 *
 * - reading the timeline never fails; store failures become a status
 * - posting generates a fresh `msg_<uuid>` id, writes, then re-reads
 * - reconnecting replaces the store session, then re-reads
 */

use std::sync::Arc;

use crate::shared::{MessageId, PostMessageRequest, PostedMessage, RoomStatus, Timeline};
use crate::store::{MessageStore, StoreError};

#[derive(Clone)]
pub struct ChatRoom {
    store: Arc<MessageStore>,
}

impl ChatRoom {
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self { store }
    }

    /// Current timeline with a status describing how it was obtained
    pub async fn timeline(&self) -> Timeline {
        match self.store.list_messages().await {
            Ok(messages) => Timeline::connected(messages),
            Err(StoreError::Unavailable) => {
                tracing::debug!("Timeline requested while disconnected");
                Timeline::empty(RoomStatus::Disconnected)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Timeline load failed");
                Timeline::empty(RoomStatus::LoadFailed)
            }
        }
    }

    /// Post a message under a freshly generated id and return the new timeline
    pub async fn post(&self, request: PostMessageRequest) -> Result<PostedMessage, StoreError> {
        let id = self
            .store
            .create_message(
                MessageId::generate(),
                &request.user,
                &request.text,
                request.reply_to.as_deref(),
            )
            .await?;
        tracing::info!(id = %id, user = %request.user, "Message posted");

        Ok(PostedMessage {
            id,
            timeline: self.timeline().await,
        })
    }

    /// Replace the store session and return the timeline seen through it
    pub async fn reconnect(&self) -> Timeline {
        self.store.reconnect().await;
        self.timeline().await
    }

    pub async fn is_connected(&self) -> bool {
        self.store.is_connected().await
    }
}
