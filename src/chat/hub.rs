use std::sync::Arc;
use tracing::{debug, instrument};

use super::event::{ChatEvent, EventKind};
use super::registry::RoomRegistry;
use crate::shared::AppError;

/// The broadcast engine: one shared append+deliver path for chat messages,
/// membership notices, and external notifications.
///
/// For a single room, the append-to-history step and the broadcast step of a
/// publish happen as one unit relative to other publishes on that room (the
/// room lock covers both). Publishes to different rooms never contend.
pub struct MessageHub {
    registry: Arc<RoomRegistry>,
}

impl MessageHub {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Publishes an event to a room: appends it to the room's history, then
    /// delivers it to every currently-subscribed connection.
    ///
    /// An empty room key is `InvalidArgument`. An empty text is a silent
    /// no-op: no event is created, nothing is broadcast, and `Ok(None)` is
    /// returned. Per-subscriber delivery failures (slow or dead connections)
    /// are absorbed and never fail the publish.
    #[instrument(skip(self))]
    pub async fn publish(
        &self,
        room_key: &str,
        kind: EventKind,
        sender: &str,
        text: &str,
    ) -> Result<Option<ChatEvent>, AppError> {
        if room_key.is_empty() {
            return Err(AppError::InvalidArgument(
                "room key must not be empty".to_string(),
            ));
        }
        if text.is_empty() {
            debug!(room_key = %room_key, sender = %sender, "Dropping empty message");
            return Ok(None);
        }

        let room = self.registry.get_or_create(room_key).await?;
        let event = ChatEvent::new(kind, sender, text);

        debug!(
            room_key = %room_key,
            event_id = %event.id,
            kind = event.kind_label(),
            subscribers = room.subscriber_count(),
            "Publishing event"
        );
        room.append_and_deliver(event.clone());

        Ok(Some(event))
    }
}
