use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::analytics::engine::{compute_analytics, AnalyticsSummary};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/analytics
pub async fn handle_get_analytics(
    State(state): State<AppState>,
    params: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    let summary = compute_analytics(state.records.as_ref(), params.user_id, Utc::now()).await?;
    Ok(Json(summary))
}
