use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sender label attached to membership notices.
pub const SYSTEM_SENDER: &str = "System";

/// Discriminator for the three kinds of room activity.
///
/// Notifications carry the identity of the advocate whose room they target,
/// so external consumers can route them without inspecting the body text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EventKind {
    /// A participant's chat message
    Chat,
    /// A membership notice (join/leave)
    System,
    /// An event injected by an external workflow
    Notification { advocate_id: String },
}

/// An immutable, timestamped unit of room activity.
///
/// Events are append-only: once created and appended to a room's history they
/// are never mutated or removed. The identifier is unique for the lifetime of
/// the process; timestamps are UTC and serialize as RFC 3339 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEvent {
    pub id: Uuid,
    pub sender: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl ChatEvent {
    /// Creates a new event with a fresh identifier and the current UTC time
    pub fn new(kind: EventKind, sender: &str, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: sender.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
            kind,
        }
    }

    /// Get a human-readable label for the event kind
    pub fn kind_label(&self) -> &'static str {
        match &self.kind {
            EventKind::Chat => "chat",
            EventKind::System => "system",
            EventKind::Notification { .. } => "notification",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_construction() {
        let event = ChatEvent::new(EventKind::Chat, "Alice", "Hi");

        assert_eq!(event.sender, "Alice");
        assert_eq!(event.text, "Hi");
        assert_eq!(event.kind, EventKind::Chat);
        assert_eq!(event.kind_label(), "chat");
    }

    #[test]
    fn test_event_ids_are_unique() {
        let a = ChatEvent::new(EventKind::Chat, "Alice", "one");
        let b = ChatEvent::new(EventKind::Chat, "Alice", "one");

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_event_serialization_shape() {
        let event = ChatEvent::new(EventKind::System, SYSTEM_SENDER, "Alice has joined the chat.");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["kind"], "system");
        assert_eq!(value["sender"], "System");
        assert_eq!(value["text"], "Alice has joined the chat.");
        assert!(value["id"].is_string());
        // RFC 3339 timestamps carry a date/time separator
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_notification_carries_advocate_id() {
        let event = ChatEvent::new(
            EventKind::Notification {
                advocate_id: "adv1".to_string(),
            },
            "Scheduler",
            "Meeting requested",
        );
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["kind"], "notification");
        assert_eq!(value["advocate_id"], "adv1");
        assert_eq!(event.kind_label(), "notification");
    }

    #[test]
    fn test_event_round_trips_through_json() {
        let event = ChatEvent::new(EventKind::Chat, "Bob", "hello");
        let json = serde_json::to_string(&event).unwrap();
        let back: ChatEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, event.id);
        assert_eq!(back.kind, EventKind::Chat);
        assert_eq!(back.text, "hello");
    }
}
