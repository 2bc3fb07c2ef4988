use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::api::state::AppState;
use crate::api::{resolve_count, ApiError};
use crate::models::{AnalysisResponse, StatisticsReport};

#[derive(Debug, Deserialize)]
pub struct WindowParams {
    pub count: Option<u32>,
}

pub async fn analyze(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let count = resolve_count(params.count, state.default_window)?;
    info!("Analysis requested for last {} draws", count);

    let response = state.advisor.advise(count).await?;
    Ok(Json(response))
}

pub async fn stats(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> Result<Json<StatisticsReport>, ApiError> {
    let count = resolve_count(params.count, state.default_window)?;

    let report = state.advisor.statistics(count).await?;
    Ok(Json(report))
}
