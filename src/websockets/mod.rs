// Public API
pub use handler::{websocket_handler, ChatReceiveHandler, OUTBOUND_QUEUE_CAPACITY};
pub use messages::{ChatPayload, JoinPayload, LeavePayload, MessageType, WebSocketMessage};
pub use socket::{Connection, MessageHandler, SocketWrapper};

// Internal modules
mod handler;
mod messages;
mod socket;
