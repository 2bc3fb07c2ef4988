//! REST API endpoints.
//!
//! Axum-based HTTP API exposing draw statistics and AI-assisted
//! number recommendations.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::advisor::AdvisorError;
use crate::calculate::AnalysisError;
use crate::config::MAX_WINDOW;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::Analysis(AnalysisError::InsufficientData) => {
                warn!("No draws available for analysis");
                ApiError::ServiceUnavailable("no draw data available".to_string())
            }
            AdvisorError::Agent(e) => {
                error!("Recommendation failed: {}", e);
                ApiError::BadGateway(e.to_string())
            }
            other => {
                error!("Analysis failed: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

/// Resolve the requested window size against the configured default.
pub fn resolve_count(requested: Option<u32>, default: u32) -> Result<u32, ApiError> {
    let count = requested.unwrap_or(default);
    if !(1..=MAX_WINDOW).contains(&count) {
        return Err(ApiError::BadRequest(format!(
            "count must be between 1 and {}",
            MAX_WINDOW
        )));
    }
    Ok(count)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/lotto/analyze", get(routes::lotto::analyze))
        .route("/lotto/stats", get(routes::lotto::stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;

    #[test]
    fn test_resolve_count_default() {
        assert_eq!(resolve_count(None, 10).unwrap(), 10);
        assert_eq!(resolve_count(Some(25), 10).unwrap(), 25);
    }

    #[test]
    fn test_resolve_count_bounds() {
        assert!(matches!(
            resolve_count(Some(0), 10),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            resolve_count(Some(MAX_WINDOW + 1), 10),
            Err(ApiError::BadRequest(_))
        ));
        assert_eq!(resolve_count(Some(MAX_WINDOW), 10).unwrap(), MAX_WINDOW);
    }

    #[test]
    fn test_advisor_error_mapping() {
        let err: ApiError = AdvisorError::Analysis(AnalysisError::InsufficientData).into();
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));

        let err: ApiError =
            AdvisorError::Agent(crate::agents::AgentError::ResponseParseError("x".into())).into();
        assert!(matches!(err, ApiError::BadGateway(_)));

        let err: ApiError = AdvisorError::Fetch(FetchError::NotDrawn(5)).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_error_status_codes() {
        let resp = ApiError::BadRequest("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::ServiceUnavailable("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let resp = ApiError::BadGateway("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
