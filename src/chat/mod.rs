// Room-based real-time message hub
//
// This module is the chat core: rooms, membership, the broadcast engine, and
// the gateway external workflows use to inject events.

// Public API - what other modules can use
pub use event::{ChatEvent, EventKind, SYSTEM_SENDER};
pub use gateway::{MeetingNotice, NotificationGateway};
pub use handlers::room_history;
pub use hub::MessageHub;
pub use membership::Membership;
pub use registry::RoomRegistry;
pub use room::{Room, Subscriber};

// Internal modules
mod event;
mod gateway;
mod handlers;
mod hub;
mod membership;
mod registry;
mod room;

/// Derives the chat room key for an advocate.
///
/// The hub treats room keys as opaque; this is the one place the
/// advocate-to-room convention lives, shared by the connection layer's
/// callers and the scheduling collaborator.
pub fn room_for_advocate(advocate_id: &str) -> String {
    format!("room_{}", advocate_id)
}
