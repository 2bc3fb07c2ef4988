use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_backend: &'static str,
    pub draw_source: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        ai_backend: state.advisor.backend_name(),
        draw_source: state.advisor.repository_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::Advisor;
    use crate::agents::backend::MockBackend;
    use crate::api::build_router;
    use crate::fetch::InMemoryRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let advisor = Advisor::new(
            Arc::new(InMemoryRepository::new(Vec::new())),
            Arc::new(MockBackend::new("{}")),
        );
        let app = build_router(AppState {
            advisor: Arc::new(advisor),
            default_window: 10,
            cors_origin: "http://localhost:3000".to_string(),
        });

        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["ai_backend"], "mock");
        assert_eq!(json["draw_source"], "memory");
    }
}
