use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::models::Advocate;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing the advocate directory
///
/// GET /api/advocates
#[instrument(name = "list_advocates", skip(state))]
pub async fn list_advocates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Advocate>>, AppError> {
    let advocates = state.advocate_repository.list_advocates().await?;

    info!(advocate_count = advocates.len(), "Advocates listed");

    Ok(Json(advocates))
}

/// HTTP handler for fetching one advocate
///
/// GET /api/advocates/:advocate_id
/// Returns 404 for an unknown advocate identity
#[instrument(name = "get_advocate", skip(state))]
pub async fn get_advocate(
    State(state): State<AppState>,
    Path(advocate_id): Path<String>,
) -> Result<Json<Advocate>, AppError> {
    let advocate = state
        .advocate_repository
        .get_advocate(&advocate_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Advocate not found".to_string()))?;

    Ok(Json(advocate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        Router::new()
            .route("/api/advocates", axum::routing::get(list_advocates))
            .route("/api/advocates/:advocate_id", axum::routing::get(get_advocate))
            .with_state(AppStateBuilder::new().build())
    }

    #[tokio::test]
    async fn test_list_advocates_handler() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/advocates")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let advocates: Vec<Advocate> = serde_json::from_slice(&body).unwrap();

        assert_eq!(advocates.len(), 3);
        assert!(advocates.iter().any(|a| a.id == "adv1"));
    }

    #[tokio::test]
    async fn test_get_advocate_handler() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/advocates/adv3")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let advocate: Advocate = serde_json::from_slice(&body).unwrap();

        assert_eq!(advocate.name, "Advocate C");
    }

    #[tokio::test]
    async fn test_get_unknown_advocate_is_404() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/advocates/adv99")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
