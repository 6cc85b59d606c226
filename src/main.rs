mod advocate;
mod chat;
mod meeting;
mod shared;
mod websockets;

use advocate::repository::InMemoryAdvocateRepository;
use axum::{
    routing::{get, post},
    Json, Router,
};
use meeting::repository::InMemoryMeetingRepository;
use serde_json::json;
use shared::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advochat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting advocate chat server");

    // Create shared application state with dependency injection
    let advocate_repository = Arc::new(InMemoryAdvocateRepository::with_demo_directory());
    let meeting_repository = Arc::new(InMemoryMeetingRepository::new());

    let app_state = AppState::new(advocate_repository, meeting_repository);

    // build our application
    let app = Router::new()
        .route("/health", get(|| async { Json(json!({ "ok": true })) }))
        .route("/api/advocates", get(advocate::list_advocates))
        .route("/api/advocates/:advocate_id", get(advocate::get_advocate))
        .route(
            "/api/advocates/:advocate_id/meetings",
            get(meeting::list_meetings),
        )
        .route("/api/meetings", post(meeting::schedule_meeting))
        .route("/api/rooms/:room_id/history", get(chat::room_history))
        .route("/ws", get(websockets::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
