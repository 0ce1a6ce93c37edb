use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::extract::{AppJson, AppPath};
use crate::error::AppError;
use crate::models::{NewTaskRequest, Task, UpdateTaskRequest};
use crate::state::AppState;

// Ids that cannot name a row are reported like any other missing task.
fn task_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::NotFound)
}

pub async fn create_task(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = state.tasks.create(req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = state.tasks.find_all().await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<Task>, AppError> {
    let task = state.tasks.find_by_id(task_id(&id)?).await?.ok_or(AppError::NotFound)?;
    Ok(Json(task))
}

// The body is inspected only after the lookup so a missing task wins over a bad payload.
pub async fn update_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    payload: Result<AppJson<UpdateTaskRequest>, AppError>,
) -> Result<Json<Task>, AppError> {
    let mut task = state.tasks.find_by_id(task_id(&id)?).await?.ok_or(AppError::NotFound)?;
    let AppJson(req) = payload?;

    task.apply(req)?;
    let task = state.tasks.update(&task).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<StatusCode, AppError> {
    let task = state.tasks.find_by_id(task_id(&id)?).await?.ok_or(AppError::NotFound)?;
    state.tasks.delete(&task).await?;
    Ok(StatusCode::NO_CONTENT)
}
