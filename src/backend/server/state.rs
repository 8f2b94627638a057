/**
 * Application State Management
 *
 * `AppState` is the state container handed to the router. Handlers extract
 * only the part they need through `FromRef`.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use chatroom::backend::chat::ChatRoom;
 *
 * async fn handler(State(room): State<ChatRoom>) {
 *     let timeline = room.timeline().await;
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::chat::ChatRoom;
use crate::store::MessageStore;

#[derive(Clone)]
pub struct AppState {
    /// Chat room service, shared by every handler
    pub room: ChatRoom,
}

impl AppState {
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self {
            room: ChatRoom::new(store),
        }
    }
}

impl FromRef<AppState> for ChatRoom {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.room.clone()
    }
}
