use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{info, instrument};

use super::event::{ChatEvent, EventKind};
use super::hub::MessageHub;
use crate::shared::AppError;

/// Structured payload for a meeting-request notification.
///
/// The gateway only ever sees this summary shape; the scheduling
/// collaborator keeps the full MeetingRequest to itself.
#[derive(Debug, Clone)]
pub struct MeetingNotice {
    pub advocate_id: String,
    pub client_name: String,
    pub scheduled_at: NaiveDateTime,
    pub purpose: String,
}

impl MeetingNotice {
    /// Formats the notice into the event body text
    pub fn summary(&self) -> String {
        let when = self.scheduled_at.format("%Y-%m-%d %H:%M");
        if self.purpose.is_empty() {
            format!("{} requested a meeting on {}", self.client_name, when)
        } else {
            format!(
                "{} requested a meeting on {}: {}",
                self.client_name, when, self.purpose
            )
        }
    }
}

/// The sole sanctioned path by which external workflows reach the chat core.
///
/// A notification rides the same publish path as chat messages, so it shares
/// the target room's ordering and delivery; it never touches room or
/// connection state directly.
pub struct NotificationGateway {
    hub: Arc<MessageHub>,
}

impl NotificationGateway {
    pub fn new(hub: Arc<MessageHub>) -> Self {
        Self { hub }
    }

    /// Injects a notification event into the room's stream
    #[instrument(skip(self, notice))]
    pub async fn notify(
        &self,
        room_key: &str,
        sender: &str,
        notice: &MeetingNotice,
    ) -> Result<ChatEvent, AppError> {
        let event = self
            .hub
            .publish(
                room_key,
                EventKind::Notification {
                    advocate_id: notice.advocate_id.clone(),
                },
                sender,
                &notice.summary(),
            )
            .await?
            .expect("meeting summary is never empty");

        info!(
            room_key = %room_key,
            advocate_id = %notice.advocate_id,
            event_id = %event.id,
            "Meeting notification injected"
        );
        Ok(event)
    }
}
