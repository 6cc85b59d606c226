// Public API - what other modules can use
pub use handlers::{list_meetings, schedule_meeting};
pub use service::MeetingService;
pub use types::ScheduleMeetingRequest;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
mod types;
