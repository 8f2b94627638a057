/**
 * Timeline Types
 *
 * What a viewer receives after every action: the current connection status
 * and the full recent timeline. Clients replace their display state with each
 * timeline they receive; there is no incremental diffing.
 */
use serde::{Deserialize, Serialize};

use crate::shared::message::{MessageId, MessageRecord};

/// Connection status shown above the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RoomStatus {
    /// Store reachable; `messages` is the number of records returned
    Connected { messages: usize },
    /// Store has no live session; a reconnect is needed
    Disconnected,
    /// Store reported a failure while reading
    LoadFailed,
}

/// Status plus newest-first messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub status: RoomStatus,
    pub messages: Vec<MessageRecord>,
}

impl Timeline {
    pub fn connected(messages: Vec<MessageRecord>) -> Self {
        Self {
            status: RoomStatus::Connected {
                messages: messages.len(),
            },
            messages,
        }
    }

    pub fn empty(status: RoomStatus) -> Self {
        Self {
            status,
            messages: Vec::new(),
        }
    }
}

/// Body of a post request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub user: String,
    pub text: String,
    /// Id of the message being answered; blank means no reply
    #[serde(default)]
    pub reply_to: Option<String>,
}

/// Result of a successful post: the new id and the refreshed timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedMessage {
    pub id: MessageId,
    pub timeline: Timeline,
}

/// Body of the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub connected: bool,
}
