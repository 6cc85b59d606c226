use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::chat::{EventKind, Membership, MessageHub, Subscriber};
use crate::shared::AppState;
use crate::websockets::messages::{ChatPayload, JoinPayload, LeavePayload, MessageType, WebSocketMessage};

use super::socket::{Connection, MessageHandler};

/// Capacity of each connection's outbound delivery queue. A subscriber that
/// stops draining loses overflow events rather than stalling its rooms.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 64;

#[derive(Clone)]
struct JoinedRoom {
    room_key: String,
    display_name: String,
}

/// Message handler translating inbound WebSocket frames into hub operations.
///
/// One instance per connection; it owns the connection's subscriber handle
/// and remembers which room the connection is in so an abrupt disconnect can
/// be turned into a leave.
pub struct ChatReceiveHandler {
    membership: Arc<Membership>,
    hub: Arc<MessageHub>,
    subscriber: Subscriber,
    joined: Mutex<Option<JoinedRoom>>,
}

impl ChatReceiveHandler {
    pub fn new(membership: Arc<Membership>, hub: Arc<MessageHub>, subscriber: Subscriber) -> Self {
        Self {
            membership,
            hub,
            subscriber,
            joined: Mutex::new(None),
        }
    }

    async fn handle_join(&self, payload: JoinPayload) {
        if payload.room.is_empty() {
            warn!("Ignoring JOIN with empty room");
            return;
        }

        // One room per connection: switching rooms leaves the old one first
        let previous = self.joined.lock().await.clone();
        if let Some(previous) = previous {
            if previous.room_key != payload.room {
                if let Err(e) = self
                    .membership
                    .leave(
                        &previous.room_key,
                        self.subscriber.id(),
                        &previous.display_name,
                    )
                    .await
                {
                    warn!(
                        room = %previous.room_key,
                        error = %e,
                        "Failed to leave previous room"
                    );
                }
            }
        }

        match self
            .membership
            .join(&payload.room, &self.subscriber, &payload.user)
            .await
        {
            Ok(_) => {
                *self.joined.lock().await = Some(JoinedRoom {
                    room_key: payload.room,
                    display_name: payload.user,
                });
            }
            Err(e) => {
                warn!(room = %payload.room, error = %e, "Join failed");
            }
        }
    }

    async fn handle_leave(&self, payload: LeavePayload) {
        if payload.room.is_empty() {
            warn!("Ignoring LEAVE with empty room");
            return;
        }

        if let Err(e) = self
            .membership
            .leave(&payload.room, self.subscriber.id(), &payload.user)
            .await
        {
            warn!(room = %payload.room, error = %e, "Leave failed");
        }

        let mut joined = self.joined.lock().await;
        if joined.as_ref().is_some_and(|j| j.room_key == payload.room) {
            *joined = None;
        }
    }

    async fn handle_chat(&self, payload: ChatPayload) {
        // A chat frame without a room or text is dropped, not an error
        if payload.room.is_empty() || payload.text.is_empty() {
            debug!("Ignoring CHAT with empty room or text");
            return;
        }

        if let Err(e) = self
            .hub
            .publish(&payload.room, EventKind::Chat, &payload.sender, &payload.text)
            .await
        {
            warn!(room = %payload.room, error = %e, "Chat publish failed");
        }
    }

    /// Invoked by the connection layer when the socket drops without an
    /// explicit LEAVE frame
    pub async fn handle_disconnect(&self) {
        let joined = self.joined.lock().await.take();
        if let Some(joined) = joined {
            info!(
                room = %joined.room_key,
                display_name = %joined.display_name,
                "Leaving room on disconnect"
            );
            if let Err(e) = self
                .membership
                .leave(&joined.room_key, self.subscriber.id(), &joined.display_name)
                .await
            {
                warn!(room = %joined.room_key, error = %e, "Leave on disconnect failed");
            }
        }
    }
}

#[async_trait]
impl MessageHandler for ChatReceiveHandler {
    async fn handle_message(&self, message: String) {
        // Parse the frame and dispatch to the matching hub operation
        match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(ws_message) => match ws_message.message_type {
                MessageType::Join => match serde_json::from_value(ws_message.payload) {
                    Ok(payload) => self.handle_join(payload).await,
                    Err(e) => warn!(error = %e, "Malformed JOIN payload"),
                },
                MessageType::Leave => match serde_json::from_value(ws_message.payload) {
                    Ok(payload) => self.handle_leave(payload).await,
                    Err(e) => warn!(error = %e, "Malformed LEAVE payload"),
                },
                MessageType::Chat => match serde_json::from_value(ws_message.payload) {
                    Ok(payload) => self.handle_chat(payload).await,
                    Err(e) => warn!(error = %e, "Malformed CHAT payload"),
                },
            },
            Err(e) => {
                warn!(error = %e, "Failed to parse WebSocket frame");
            }
        }
    }
}

/// WebSocket endpoint for chat participants
///
/// GET /ws, then JOIN/LEAVE/CHAT frames over the socket
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    info!("WebSocket connection requested");

    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let (subscriber, outbound_receiver) = Subscriber::channel(OUTBOUND_QUEUE_CAPACITY);
    let subscriber_id = subscriber.id();

    info!(subscriber_id = %subscriber_id, "WebSocket connection established");

    let message_handler = Arc::new(ChatReceiveHandler::new(
        Arc::clone(&app_state.membership),
        Arc::clone(&app_state.hub),
        subscriber,
    ));

    let connection = Connection::new(
        Box::new(socket),
        outbound_receiver,
        message_handler.clone(),
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(subscriber_id = %subscriber_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                subscriber_id = %subscriber_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    // Cleanup: the collaborator layer turns an abrupt drop into a leave
    message_handler.handle_disconnect().await;

    info!(subscriber_id = %subscriber_id, "WebSocket connection cleaned up");
}
