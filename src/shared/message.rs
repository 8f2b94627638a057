/**
 * Message Data Structures
 *
 * This module defines the message types exchanged between the chat room
 * service, the message store and HTTP clients.
 *
 * A message is a node in the chat graph. A reply is a directed edge from the
 * replying message to the message it answers. Reads only ever surface one hop
 * of that edge, so a `MessageRecord` carries at most one `ParentPreview`.
 */
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Prefix applied to generated message ids
pub const MESSAGE_ID_PREFIX: &str = "msg_";

/// Unique, caller-generated identity of a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a fresh namespaced id (`msg_<uuid v4>`)
    pub fn generate() -> Self {
        Self(format!("{}{}", MESSAGE_ID_PREFIX, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A message about to be written to the store
///
/// The timestamp is deliberately absent: it is assigned by the database clock
/// when the node is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Caller-generated id, must be unique
    pub id: MessageId,
    /// Author display name
    pub user: String,
    /// Message body
    pub text: String,
    /// Id of the message being replied to
    pub reply_to: Option<MessageId>,
}

impl NewMessage {
    /// Build a new message
    ///
    /// A blank `reply_to` is treated the same as no reply at all.
    pub fn new(
        id: impl Into<MessageId>,
        user: impl Into<String>,
        text: impl Into<String>,
        reply_to: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
            text: text.into(),
            reply_to: reply_to
                .map(str::trim)
                .filter(|parent| !parent.is_empty())
                .map(MessageId::from),
        }
    }

    /// Check the fields that must be present before any I/O happens
    ///
    /// # Errors
    /// `SharedError::ValidationError` naming the first offending field.
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.id.as_str().is_empty() {
            return Err(SharedError::validation("id", "Message id cannot be empty"));
        }
        if self.user.trim().is_empty() {
            return Err(SharedError::validation("user", "User name cannot be empty"));
        }
        if self.text.trim().is_empty() {
            return Err(SharedError::validation("text", "Message text cannot be empty"));
        }
        Ok(())
    }
}

/// Author and body of the message a record replies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentPreview {
    pub user: String,
    pub text: String,
}

/// One row of the timeline: a message joined with its reply parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,
    pub user: String,
    pub text: String,
    /// Present only when the message replies to a message that still resolves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentPreview>,
}

impl MessageRecord {
    /// Shape a joined row into a record
    ///
    /// The parent columns come from an optional join, so they are either both
    /// set or both null. A half-populated pair is treated as no parent.
    pub fn from_row(
        id: String,
        user: String,
        text: String,
        parent_user: Option<String>,
        parent_text: Option<String>,
    ) -> Self {
        let parent = match (parent_user, parent_text) {
            (Some(user), Some(text)) => Some(ParentPreview { user, text }),
            _ => None,
        };
        Self {
            id: MessageId::from(id),
            user,
            text,
            parent,
        }
    }

    pub fn parent_user(&self) -> Option<&str> {
        self.parent.as_ref().map(|parent| parent.user.as_str())
    }

    pub fn parent_text(&self) -> Option<&str> {
        self.parent.as_ref().map(|parent| parent.text.as_str())
    }

    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }
}
