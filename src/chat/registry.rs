use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::event::ChatEvent;
use super::room::Room;
use crate::shared::AppError;

/// Registry mapping opaque room keys to live rooms.
///
/// Rooms are created lazily on first use and live for the rest of the
/// process: an empty room keeps its history. The key-to-room map has its own
/// lock, separate from each room's lock, so traffic in unrelated rooms never
/// serializes here beyond the brief map access.
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, Arc<Room>>>,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the room registered under `room_key`, creating it if absent.
    ///
    /// Idempotent: concurrent callers with the same key observe one shared
    /// room instance.
    pub async fn get_or_create(&self, room_key: &str) -> Result<Arc<Room>, AppError> {
        if room_key.is_empty() {
            return Err(AppError::InvalidArgument(
                "room key must not be empty".to_string(),
            ));
        }

        {
            let rooms = self.rooms.read().await;
            if let Some(room) = rooms.get(room_key) {
                return Ok(Arc::clone(room));
            }
        }

        // Re-check under the write lock so a concurrent registration wins
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .entry(room_key.to_string())
            .or_insert_with(|| {
                debug!(room_key = %room_key, "Creating room");
                Arc::new(Room::new(room_key))
            });
        Ok(Arc::clone(room))
    }

    /// Returns the room registered under `room_key`, if any
    pub async fn get(&self, room_key: &str) -> Option<Arc<Room>> {
        let rooms = self.rooms.read().await;
        rooms.get(room_key).cloned()
    }

    /// Snapshot copy of a room's history at call time.
    ///
    /// Read-only: an unknown room yields an empty history without being
    /// created.
    pub async fn history(&self, room_key: &str) -> Result<Vec<ChatEvent>, AppError> {
        if room_key.is_empty() {
            return Err(AppError::InvalidArgument(
                "room key must not be empty".to_string(),
            ));
        }

        let rooms = self.rooms.read().await;
        match rooms.get(room_key) {
            Some(room) => Ok(room.history_snapshot()),
            None => Ok(Vec::new()),
        }
    }

    /// Number of rooms currently registered
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
