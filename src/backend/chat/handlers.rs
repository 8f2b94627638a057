//! Chat HTTP Handlers
//!
//! JSON endpoints over the chat room service. Every action answers with the
//! full timeline so clients can replace their view wholesale.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::backend::chat::room::ChatRoom;
use crate::backend::error::{conversion::bad_body, BackendError};
use crate::shared::{PostMessageRequest, PostedMessage, StatusResponse, Timeline};

/// GET /api/messages
pub async fn get_timeline(State(room): State<ChatRoom>) -> Json<Timeline> {
    Json(room.timeline().await)
}

/// POST /api/messages
pub async fn post_message(
    State(room): State<ChatRoom>,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostedMessage>), BackendError> {
    let Json(request) = payload.map_err(bad_body)?;
    let posted = room.post(request).await?;
    Ok((StatusCode::CREATED, Json(posted)))
}

/// POST /api/reconnect
pub async fn reconnect(State(room): State<ChatRoom>) -> Json<Timeline> {
    Json(room.reconnect().await)
}

/// GET /api/status
pub async fn get_status(State(room): State<ChatRoom>) -> Json<StatusResponse> {
    Json(StatusResponse {
        connected: room.is_connected().await,
    })
}

/// GET /healthz
pub async fn healthz() -> &'static str {
    "OK"
}
