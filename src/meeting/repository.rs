use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument};

use super::models::MeetingRequest;
use crate::shared::AppError;

/// Trait for meeting request storage
#[async_trait]
pub trait MeetingRepository {
    async fn add_meeting(&self, meeting: &MeetingRequest) -> Result<(), AppError>;
    async fn meetings_for_advocate(
        &self,
        advocate_id: &str,
    ) -> Result<Vec<MeetingRequest>, AppError>;
}

/// In-memory implementation of MeetingRepository
pub struct InMemoryMeetingRepository {
    // advocate_id -> requests in arrival order
    meetings: Mutex<HashMap<String, Vec<MeetingRequest>>>,
}

impl Default for InMemoryMeetingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMeetingRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            meetings: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MeetingRepository for InMemoryMeetingRepository {
    #[instrument(skip(self, meeting))]
    async fn add_meeting(&self, meeting: &MeetingRequest) -> Result<(), AppError> {
        let mut meetings = self.meetings.lock().unwrap();
        meetings
            .entry(meeting.advocate_id.clone())
            .or_default()
            .push(meeting.clone());

        debug!(
            meeting_id = %meeting.id,
            advocate_id = %meeting.advocate_id,
            "Meeting request stored"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn meetings_for_advocate(
        &self,
        advocate_id: &str,
    ) -> Result<Vec<MeetingRequest>, AppError> {
        let meetings = self.meetings.lock().unwrap();
        Ok(meetings.get(advocate_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn meeting(advocate_id: &str, client: &str) -> MeetingRequest {
        MeetingRequest::new(
            advocate_id.to_string(),
            client.to_string(),
            NaiveDateTime::parse_from_str("2025-03-14 10:30", "%Y-%m-%d %H:%M").unwrap(),
            String::new(),
        )
    }

    #[tokio::test]
    async fn test_add_and_list_meetings() {
        let repo = InMemoryMeetingRepository::new();

        repo.add_meeting(&meeting("adv1", "Client A")).await.unwrap();
        repo.add_meeting(&meeting("adv1", "Client B")).await.unwrap();
        repo.add_meeting(&meeting("adv2", "Client C")).await.unwrap();

        let adv1_meetings = repo.meetings_for_advocate("adv1").await.unwrap();
        assert_eq!(adv1_meetings.len(), 2);
        assert_eq!(adv1_meetings[0].client_name, "Client A");
        assert_eq!(adv1_meetings[1].client_name, "Client B");

        let adv2_meetings = repo.meetings_for_advocate("adv2").await.unwrap();
        assert_eq!(adv2_meetings.len(), 1);
    }

    #[tokio::test]
    async fn test_meetings_for_unknown_advocate_is_empty() {
        let repo = InMemoryMeetingRepository::new();

        let meetings = repo.meetings_for_advocate("adv99").await.unwrap();
        assert!(meetings.is_empty());
    }
}
