use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};
use uuid::Uuid;

use super::event::ChatEvent;

/// A subscriber's end of the room delivery contract.
///
/// `Subscriber::channel` hands back the handle and the receiver: the handle
/// registers with a room on join and unsubscribes by id on leave, while the
/// receiver is drained by the connection's outbound pump. The queue is
/// bounded; a subscriber that stops draining loses overflow events instead of
/// stalling the room.
pub struct Subscriber {
    id: Uuid,
    sender: mpsc::Sender<ChatEvent>,
}

impl Subscriber {
    /// Creates a subscriber handle and its delivery receiver with the given
    /// outbound queue capacity
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ChatEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            Self {
                id: Uuid::new_v4(),
                sender,
            },
            receiver,
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn delivery_sender(&self) -> mpsc::Sender<ChatEvent> {
        self.sender.clone()
    }
}

struct RoomState {
    history: Vec<ChatEvent>,
    subscribers: HashMap<Uuid, mpsc::Sender<ChatEvent>>,
}

/// A named channel grouping one advocate and its clients.
///
/// The (history, subscriber set) pair is the unit of mutual exclusion: every
/// mutation goes through one lock, so an append and its broadcast form a
/// single logical unit relative to other publishes on the same room.
/// Different rooms share nothing and proceed in parallel.
pub struct Room {
    key: String,
    state: Mutex<RoomState>,
}

impl Room {
    pub(crate) fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            state: Mutex::new(RoomState {
                history: Vec::new(),
                subscribers: HashMap::new(),
            }),
        }
    }

    /// The opaque room key this room was registered under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Registers a subscriber for delivery. Set semantics: re-adding an
    /// existing subscriber is a no-op for membership.
    pub fn add_subscriber(&self, subscriber: &Subscriber) {
        let mut state = self.state.lock().unwrap();
        state
            .subscribers
            .entry(subscriber.id())
            .or_insert_with(|| subscriber.delivery_sender());
        debug!(
            room_key = %self.key,
            subscriber_id = %subscriber.id(),
            subscriber_count = state.subscribers.len(),
            "Subscriber registered"
        );
    }

    /// Removes a subscriber from the delivery set. Returns whether it was
    /// present; removing an absent subscriber is a no-op, not an error.
    pub fn remove_subscriber(&self, subscriber_id: Uuid) -> bool {
        let mut state = self.state.lock().unwrap();
        let removed = state.subscribers.remove(&subscriber_id).is_some();
        debug!(
            room_key = %self.key,
            subscriber_id = %subscriber_id,
            removed,
            subscriber_count = state.subscribers.len(),
            "Subscriber removed"
        );
        removed
    }

    /// Current number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().unwrap().subscribers.len()
    }

    /// A room is active while it has at least one subscriber
    pub fn is_active(&self) -> bool {
        self.subscriber_count() > 0
    }

    /// Number of events recorded so far
    pub fn history_len(&self) -> usize {
        self.state.lock().unwrap().history.len()
    }

    /// Snapshot copy of the room's history at call time
    pub fn history_snapshot(&self) -> Vec<ChatEvent> {
        self.state.lock().unwrap().history.clone()
    }

    /// Appends the event to history and delivers it to every current
    /// subscriber, as one unit under the room lock.
    ///
    /// Delivery is fire and forget per subscriber: a full outbound queue
    /// drops the event for that subscriber only, and a closed queue prunes
    /// the subscriber. Neither outcome affects the other subscribers or the
    /// append itself.
    pub(crate) fn append_and_deliver(&self, event: ChatEvent) {
        let mut state = self.state.lock().unwrap();
        state.history.push(event.clone());

        let mut closed = Vec::new();
        for (subscriber_id, sender) in &state.subscribers {
            match sender.try_send(event.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(
                        room_key = %self.key,
                        subscriber_id = %subscriber_id,
                        event_id = %event.id,
                        "Outbound queue full, dropping event for slow subscriber"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    closed.push(*subscriber_id);
                }
            }
        }

        for subscriber_id in closed {
            state.subscribers.remove(&subscriber_id);
            debug!(
                room_key = %self.key,
                subscriber_id = %subscriber_id,
                "Pruned closed subscriber"
            );
        }
    }
}
