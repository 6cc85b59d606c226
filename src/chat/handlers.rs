use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, instrument};

use super::event::ChatEvent;
use crate::shared::{AppError, AppState};

/// HTTP handler for fetching a room's event backlog
///
/// GET /api/rooms/:room_id/history
/// Returns the room's events in append order; unknown rooms yield an empty
/// list without being created.
#[instrument(name = "room_history", skip(state))]
pub async fn room_history(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<ChatEvent>>, AppError> {
    let history = state.registry.history(&room_id).await?;

    debug!(
        room_id = %room_id,
        event_count = history.len(),
        "Room history fetched"
    );

    Ok(Json(history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::event::EventKind;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/api/rooms/:room_id/history", axum::routing::get(room_history))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_history_endpoint_returns_events_in_order() {
        let state = AppStateBuilder::new().build();
        state
            .hub
            .publish("room_adv1", EventKind::Chat, "Alice", "first")
            .await
            .unwrap();
        state
            .hub
            .publish("room_adv1", EventKind::Chat, "Bob", "second")
            .await
            .unwrap();

        let request = Request::builder()
            .method("GET")
            .uri("/api/rooms/room_adv1/history")
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let events: Vec<ChatEvent> = serde_json::from_slice(&body).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].text, "first");
        assert_eq!(events[1].text, "second");
    }

    #[tokio::test]
    async fn test_history_endpoint_for_unknown_room_is_empty() {
        let state = AppStateBuilder::new().build();

        let request = Request::builder()
            .method("GET")
            .uri("/api/rooms/room_nobody/history")
            .body(Body::empty())
            .unwrap();

        let response = app(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let events: Vec<ChatEvent> = serde_json::from_slice(&body).unwrap();

        assert!(events.is_empty());
        // The read must not have created the room
        assert_eq!(state.registry.room_count().await, 0);
    }
}
