use std::sync::Arc;
use tracing::{info, instrument};

use super::event::{ChatEvent, EventKind, SYSTEM_SENDER};
use super::hub::MessageHub;
use super::registry::RoomRegistry;
use super::room::Subscriber;
use crate::shared::AppError;
use uuid::Uuid;

/// Tracks which connections are subscribed to which room and emits the
/// join/leave system notices.
///
/// Membership itself has set semantics, but a notice goes out on every call:
/// a repeated join for a connection already in the room re-emits the joined
/// notice. That matches the historical behavior; callers wanting quiet
/// re-joins must guard at their layer.
pub struct Membership {
    registry: Arc<RoomRegistry>,
    hub: Arc<MessageHub>,
}

impl Membership {
    pub fn new(registry: Arc<RoomRegistry>, hub: Arc<MessageHub>) -> Self {
        Self { registry, hub }
    }

    /// Registers the subscriber with the room, then broadcasts a joined
    /// notice to all current subscribers, the new one included.
    #[instrument(skip(self, subscriber))]
    pub async fn join(
        &self,
        room_key: &str,
        subscriber: &Subscriber,
        display_name: &str,
    ) -> Result<ChatEvent, AppError> {
        let room = self.registry.get_or_create(room_key).await?;
        room.add_subscriber(subscriber);

        info!(
            room_key = %room_key,
            subscriber_id = %subscriber.id(),
            display_name = %display_name,
            "Subscriber joined room"
        );

        let body = format!("{} has joined the chat.", display_name);
        let notice = self
            .hub
            .publish(room_key, EventKind::System, SYSTEM_SENDER, &body)
            .await?
            .expect("join notice body is never empty");
        Ok(notice)
    }

    /// Removes the subscriber from the room's delivery set, then broadcasts
    /// a left notice to the remaining subscribers.
    ///
    /// Removal happens before the broadcast, so the leaver never receives its
    /// own notice. Leaving a room the subscriber is not in still emits the
    /// notice; the removal itself is a no-op.
    #[instrument(skip(self))]
    pub async fn leave(
        &self,
        room_key: &str,
        subscriber_id: Uuid,
        display_name: &str,
    ) -> Result<ChatEvent, AppError> {
        let room = self.registry.get_or_create(room_key).await?;
        room.remove_subscriber(subscriber_id);

        info!(
            room_key = %room_key,
            subscriber_id = %subscriber_id,
            display_name = %display_name,
            "Subscriber left room"
        );

        let body = format!("{} has left the chat.", display_name);
        let notice = self
            .hub
            .publish(room_key, EventKind::System, SYSTEM_SENDER, &body)
            .await?
            .expect("leave notice body is never empty");
        Ok(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> (Membership, Arc<MessageHub>, Arc<RoomRegistry>) {
        let registry = Arc::new(RoomRegistry::new());
        let hub = Arc::new(MessageHub::new(Arc::clone(&registry)));
        (
            Membership::new(Arc::clone(&registry), Arc::clone(&hub)),
            hub,
            registry,
        )
    }

    #[tokio::test]
    async fn test_join_emits_notice_to_joiner_too() {
        let (membership, _, _) = core();
        let (subscriber, mut rx) = Subscriber::channel(8);

        let notice = membership
            .join("room_adv1", &subscriber, "Alice")
            .await
            .unwrap();

        assert_eq!(notice.kind, EventKind::System);
        assert_eq!(notice.sender, SYSTEM_SENDER);
        assert_eq!(notice.text, "Alice has joined the chat.");

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.id, notice.id);
    }

    #[tokio::test]
    async fn test_join_then_chat_arrive_in_order() {
        let (membership, hub, _) = core();
        let (subscriber, mut rx) = Subscriber::channel(8);

        membership
            .join("room_adv1", &subscriber, "Alice")
            .await
            .unwrap();
        hub.publish("room_adv1", EventKind::Chat, "Alice", "Hi")
            .await
            .unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.kind, EventKind::System);
        assert_eq!(first.text, "Alice has joined the chat.");

        let second = rx.recv().await.unwrap();
        assert_eq!(second.kind, EventKind::Chat);
        assert_eq!(second.sender, "Alice");
        assert_eq!(second.text, "Hi");
    }

    #[tokio::test]
    async fn test_duplicate_join_keeps_one_membership_but_renotifies() {
        let (membership, _, registry) = core();
        let (subscriber, mut rx) = Subscriber::channel(8);

        membership
            .join("room_adv1", &subscriber, "Alice")
            .await
            .unwrap();
        membership
            .join("room_adv1", &subscriber, "Alice")
            .await
            .unwrap();

        let room = registry.get("room_adv1").await.unwrap();
        assert_eq!(room.subscriber_count(), 1);

        // Both notices were emitted and delivered
        assert_eq!(rx.recv().await.unwrap().text, "Alice has joined the chat.");
        assert_eq!(rx.recv().await.unwrap().text, "Alice has joined the chat.");
        assert_eq!(room.history_len(), 2);
    }

    #[tokio::test]
    async fn test_leaver_does_not_receive_own_leave_notice() {
        let (membership, _, _) = core();
        let (alice, mut alice_rx) = Subscriber::channel(8);
        let (bob, mut bob_rx) = Subscriber::channel(8);

        membership.join("room_adv1", &alice, "Alice").await.unwrap();
        membership.join("room_adv1", &bob, "Bob").await.unwrap();

        // Drain the join notices
        alice_rx.recv().await.unwrap();
        alice_rx.recv().await.unwrap();
        bob_rx.recv().await.unwrap();

        membership
            .leave("room_adv1", alice.id(), "Alice")
            .await
            .unwrap();

        // Bob sees the leave notice, Alice does not
        let notice = bob_rx.recv().await.unwrap();
        assert_eq!(notice.text, "Alice has left the chat.");
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_left_subscriber_misses_subsequent_publishes() {
        let (membership, hub, _) = core();
        let (alice, mut alice_rx) = Subscriber::channel(8);
        let (bob, mut bob_rx) = Subscriber::channel(8);

        membership.join("room_adv1", &alice, "Alice").await.unwrap();
        membership.join("room_adv1", &bob, "Bob").await.unwrap();
        membership
            .leave("room_adv1", alice.id(), "Alice")
            .await
            .unwrap();

        hub.publish("room_adv1", EventKind::Chat, "Bob", "still here")
            .await
            .unwrap();

        // Alice got her join notice and Bob's join notice, nothing after
        assert_eq!(alice_rx.recv().await.unwrap().kind, EventKind::System);
        assert_eq!(alice_rx.recv().await.unwrap().kind, EventKind::System);
        assert!(alice_rx.try_recv().is_err());

        // Bob's last delivery is the chat message
        let mut last = None;
        while let Ok(event) = bob_rx.try_recv() {
            last = Some(event);
        }
        let last = last.unwrap();
        assert_eq!(last.kind, EventKind::Chat);
        assert_eq!(last.text, "still here");
    }

    #[tokio::test]
    async fn test_leave_of_absent_subscriber_still_notifies() {
        let (membership, _, registry) = core();
        let (bystander, mut rx) = Subscriber::channel(8);
        membership
            .join("room_adv1", &bystander, "Bob")
            .await
            .unwrap();
        rx.recv().await.unwrap();

        membership
            .leave("room_adv1", Uuid::new_v4(), "Ghost")
            .await
            .unwrap();

        assert_eq!(rx.recv().await.unwrap().text, "Ghost has left the chat.");
        let room = registry.get("room_adv1").await.unwrap();
        assert_eq!(room.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_room_outlives_its_last_subscriber() {
        let (membership, _, registry) = core();
        let (subscriber, _rx) = Subscriber::channel(8);

        membership
            .join("room_adv1", &subscriber, "Alice")
            .await
            .unwrap();
        membership
            .leave("room_adv1", subscriber.id(), "Alice")
            .await
            .unwrap();

        let room = registry.get("room_adv1").await.unwrap();
        assert!(!room.is_active());
        // Join and leave notices are both retained
        assert_eq!(room.history_len(), 2);
    }
}
