//! Route handlers. Each one is a thin shell over [`TodoService`] or
//! [`IntentResolver`]; all failures leave as [`AppError`].
//!
//! [`TodoService`]: crate::service::TodoService
//! [`IntentResolver`]: crate::intent::resolver::IntentResolver

use anyhow::anyhow;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use super::SharedState;
use crate::error::{AppError, AppResult};
use crate::intent::Intent;
use crate::intent::resolver::Outcome;
use crate::todo::{Todo, TodoPatch};

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub task: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AiRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|e| AppError::validation(format!("invalid request body: {}", e.body_text())))
}

fn todo_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::validation(format!("invalid todo id: {}", e.body_text())))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn create_todo(
    State(state): State<SharedState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let request = body(payload)?;
    let todo = state
        .todos
        .create(request.task.as_deref().unwrap_or_default())
        .await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn list_todos(State(state): State<SharedState>) -> AppResult<Json<Vec<Todo>>> {
    Ok(Json(state.todos.list().await?))
}

pub async fn update_todo(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> AppResult<Json<Vec<Todo>>> {
    let id = todo_id(path)?;
    let patch = body(payload)?;
    Ok(Json(state.todos.update(id, patch).await?))
}

pub async fn delete_todo(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Vec<Todo>>> {
    let id = todo_id(path)?;
    Ok(Json(state.todos.delete(id).await?))
}

pub async fn ai(
    State(state): State<SharedState>,
    payload: Result<Json<AiRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Outcome>)> {
    let request = body(payload)?;
    let prompt = request.prompt.as_deref().unwrap_or_default();
    if prompt.trim().is_empty() {
        return Err(AppError::validation("prompt is required"));
    }
    let resolver = state.resolver.as_ref().ok_or_else(|| {
        AppError::Upstream(anyhow!("no text-generation API key configured"))
    })?;

    let outcome = resolver.resolve(prompt).await?;
    let status = match outcome.intent() {
        Intent::Create => StatusCode::CREATED,
        Intent::Read | Intent::Update | Intent::Delete => StatusCode::OK,
    };
    Ok((status, Json(outcome)))
}
