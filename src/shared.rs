use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::advocate::repository::AdvocateRepository;
use crate::chat::{Membership, MessageHub, NotificationGateway, RoomRegistry};
use crate::meeting::repository::MeetingRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub advocate_repository: Arc<dyn AdvocateRepository + Send + Sync>,
    pub meeting_repository: Arc<dyn MeetingRepository + Send + Sync>,
    pub registry: Arc<RoomRegistry>,
    pub hub: Arc<MessageHub>,
    pub membership: Arc<Membership>,
    pub gateway: Arc<NotificationGateway>,
}

impl AppState {
    pub fn new(
        advocate_repository: Arc<dyn AdvocateRepository + Send + Sync>,
        meeting_repository: Arc<dyn MeetingRepository + Send + Sync>,
    ) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let hub = Arc::new(MessageHub::new(Arc::clone(&registry)));
        let membership = Arc::new(Membership::new(Arc::clone(&registry), Arc::clone(&hub)));
        let gateway = Arc::new(NotificationGateway::new(Arc::clone(&hub)));

        Self {
            advocate_repository,
            meeting_repository,
            registry,
            hub,
            membership,
            gateway,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
