use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::MeetingRequest, service::MeetingService, types::ScheduleMeetingRequest};
use crate::shared::{AppError, AppState};

/// HTTP handler for scheduling a meeting
///
/// POST /api/meetings
/// Validates the request, stores it, and injects a notification into the
/// advocate's room.
#[instrument(name = "schedule_meeting", skip(state, request))]
pub async fn schedule_meeting(
    State(state): State<AppState>,
    Json(request): Json<ScheduleMeetingRequest>,
) -> Result<Json<MeetingRequest>, AppError> {
    info!(
        advocate_id = %request.advocate_id,
        client_name = %request.client_name,
        "Scheduling meeting"
    );

    // Use injected repositories from app state
    let service = MeetingService::new(
        Arc::clone(&state.meeting_repository),
        Arc::clone(&state.advocate_repository),
        Arc::clone(&state.gateway),
    );
    let meeting = service.schedule(request).await?;

    info!(
        meeting_id = %meeting.id,
        advocate_id = %meeting.advocate_id,
        "Meeting scheduled successfully"
    );

    Ok(Json(meeting))
}

/// HTTP handler for listing an advocate's meeting requests
///
/// GET /api/advocates/:advocate_id/meetings
#[instrument(name = "list_meetings", skip(state))]
pub async fn list_meetings(
    State(state): State<AppState>,
    Path(advocate_id): Path<String>,
) -> Result<Json<Vec<MeetingRequest>>, AppError> {
    let service = MeetingService::new(
        Arc::clone(&state.meeting_repository),
        Arc::clone(&state.advocate_repository),
        Arc::clone(&state.gateway),
    );
    let meetings = service.meetings_for_advocate(&advocate_id).await?;

    Ok(Json(meetings))
}
