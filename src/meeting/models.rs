use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a meeting request. Only `requested` is reachable
/// today; further states belong to a follow-up workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Requested,
}

/// A client's request to meet an advocate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub id: Uuid,
    pub advocate_id: String,
    pub client_name: String,
    pub scheduled_at: NaiveDateTime,
    pub purpose: String,
    pub status: MeetingStatus,
}

impl MeetingRequest {
    /// Creates a new request in the `requested` state with a fresh id
    pub fn new(
        advocate_id: String,
        client_name: String,
        scheduled_at: NaiveDateTime,
        purpose: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            advocate_id,
            client_name,
            scheduled_at,
            purpose,
            status: MeetingStatus::Requested,
        }
    }
}
