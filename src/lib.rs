// Library crate for the advocate chat server
// This file exposes the public API for integration tests

pub mod advocate;
pub mod chat;
pub mod meeting;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use chat::{
    room_for_advocate, ChatEvent, EventKind, Membership, MessageHub, NotificationGateway,
    RoomRegistry, Subscriber,
};
pub use shared::{AppError, AppState};
pub use websockets::{ChatReceiveHandler, MessageHandler, MessageType, WebSocketMessage};
