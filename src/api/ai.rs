use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use crate::error::AppError;
use crate::services::QueryOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AiQueryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

pub async fn process_query(
    State(state): State<AppState>,
    payload: Result<Json<AiQueryRequest>, JsonRejection>,
) -> Result<Json<QueryOutcome>, AppError> {
    let query = payload
        .ok()
        .and_then(|Json(req)| req.query)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query is required".to_string()))?;

    let outcome = state.query_service().run(&query).await?;
    Ok(Json(outcome))
}
