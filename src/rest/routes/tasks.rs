// rest/routes/tasks.rs — task JSON API routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::store::Task;
use crate::AppContext;

type ApiError = (StatusCode, Json<Value>);

fn task_not_found(id: u64) -> ApiError {
    error!(task_id = id, "task not found");
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Task not found" })),
    )
}

/// A non-integer id segment never matches a task route; it gets the same
/// generic body an unmatched path does.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| {
        error!(id = %raw, "task id is not an integer");
        (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
    })
}

pub async fn list_tasks(State(ctx): State<Arc<AppContext>>) -> Json<Vec<Task>> {
    info!("fetching all tasks (API)");
    Json(ctx.store.list().await)
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    info!(task_id = id, "fetching task (API)");
    match ctx.store.find(id).await {
        Ok(task) => Ok(Json(task)),
        Err(_) => Err(task_not_found(id)),
    }
}

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    body: Option<Json<CreateTaskRequest>>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    info!("creating a new task (API)");
    // An absent body counts the same as a missing title.
    let title = body
        .and_then(|Json(b)| b.title)
        .filter(|t| !t.trim().is_empty());
    let Some(title) = title else {
        error!("task creation rejected: title is required");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Title is required" })),
        ));
    };
    let task = ctx.store.create(title).await;
    Ok((StatusCode::CREATED, Json(task)))
}

#[derive(Deserialize, Default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub done: Option<bool>,
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    body: Option<Json<UpdateTaskRequest>>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    info!(task_id = id, "updating task (API)");
    // No body is an empty update: every unsupplied field keeps its value.
    let UpdateTaskRequest { title, done } = body.map(|Json(b)| b).unwrap_or_default();
    match ctx.store.update(id, title, done).await {
        Ok(task) => Ok(Json(task)),
        Err(_) => Err(task_not_found(id)),
    }
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    info!(task_id = id, "deleting task (API)");
    match ctx.store.remove(id).await {
        Ok(()) => Ok(Json(json!({ "message": "Task deleted successfully" }))),
        Err(_) => Err(task_not_found(id)),
    }
}
