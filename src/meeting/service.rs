use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::MeetingRequest, repository::MeetingRepository, types::ScheduleMeetingRequest};
use crate::advocate::repository::AdvocateRepository;
use crate::chat::{room_for_advocate, MeetingNotice, NotificationGateway};
use crate::shared::AppError;

/// Sender label attached to injected meeting notifications
const SCHEDULER_SENDER: &str = "Scheduler";

/// Service for handling meeting scheduling business logic.
///
/// Validates at the boundary, stores the request, then injects a
/// notification into the advocate's room through the gateway. The chat core
/// is only ever reached via the gateway.
pub struct MeetingService {
    repository: Arc<dyn MeetingRepository + Send + Sync>,
    advocates: Arc<dyn AdvocateRepository + Send + Sync>,
    gateway: Arc<NotificationGateway>,
}

impl MeetingService {
    pub fn new(
        repository: Arc<dyn MeetingRepository + Send + Sync>,
        advocates: Arc<dyn AdvocateRepository + Send + Sync>,
        gateway: Arc<NotificationGateway>,
    ) -> Self {
        Self {
            repository,
            advocates,
            gateway,
        }
    }

    /// Schedules a meeting request and notifies the advocate's room
    #[instrument(skip(self, request))]
    pub async fn schedule(
        &self,
        request: ScheduleMeetingRequest,
    ) -> Result<MeetingRequest, AppError> {
        if request.advocate_id.is_empty()
            || request.client_name.is_empty()
            || request.date.is_empty()
            || request.time.is_empty()
        {
            return Err(AppError::InvalidArgument("missing fields".to_string()));
        }

        self.advocates
            .get_advocate(&request.advocate_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Advocate not found".to_string()))?;

        let scheduled_at = NaiveDateTime::parse_from_str(
            &format!("{} {}", request.date, request.time),
            "%Y-%m-%d %H:%M",
        )
        .map_err(|_| AppError::InvalidArgument("invalid datetime format".to_string()))?;

        let meeting = MeetingRequest::new(
            request.advocate_id,
            request.client_name,
            scheduled_at,
            request.purpose,
        );
        self.repository.add_meeting(&meeting).await?;

        let room_key = room_for_advocate(&meeting.advocate_id);
        self.gateway
            .notify(
                &room_key,
                SCHEDULER_SENDER,
                &MeetingNotice {
                    advocate_id: meeting.advocate_id.clone(),
                    client_name: meeting.client_name.clone(),
                    scheduled_at: meeting.scheduled_at,
                    purpose: meeting.purpose.clone(),
                },
            )
            .await?;

        info!(
            meeting_id = %meeting.id,
            advocate_id = %meeting.advocate_id,
            room_key = %room_key,
            "Meeting scheduled"
        );
        Ok(meeting)
    }

    /// Lists the meeting requests recorded for an advocate
    #[instrument(skip(self))]
    pub async fn meetings_for_advocate(
        &self,
        advocate_id: &str,
    ) -> Result<Vec<MeetingRequest>, AppError> {
        self.repository.meetings_for_advocate(advocate_id).await
    }
}
