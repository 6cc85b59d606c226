use serde::{Deserialize, Serialize};

/// Message types for client-to-server WebSocket frames
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Join,
    Leave,
    Chat,
}

/// Base structure for inbound WebSocket frames
///
/// Outbound frames are serialized `ChatEvent`s and never take this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub payload: serde_json::Value,
}

fn default_user() -> String {
    "Anonymous".to_string()
}

fn default_sender() -> String {
    "Unknown".to_string()
}

/// Payload of a JOIN frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinPayload {
    #[serde(default)]
    pub room: String,
    #[serde(default = "default_user")]
    pub user: String,
}

/// Payload of a LEAVE frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeavePayload {
    #[serde(default)]
    pub room: String,
    #[serde(default = "default_user")]
    pub user: String,
}

/// Payload of a CHAT frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub room: String,
    #[serde(default = "default_sender")]
    pub sender: String,
    #[serde(default)]
    pub text: String,
}
