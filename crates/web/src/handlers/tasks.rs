use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use domain::TodoId;
use serde::Deserialize;
use serde_json::json;

use super::{render, run_blocking};
use crate::error::WebError;
use crate::render::Page;
use crate::AppState;

pub const TASKS_PATH: &str = "/tasks/";

const LIST_FAILED: &str = "There was an issue loading your tasks";
const ADD_FAILED: &str = "There was an issue adding your task";
const DELETE_FAILED: &str = "There was a problem deleting that task";
const UPDATE_FAILED: &str = "There was an issue updating your task";

/// POST /tasks/ と POST /tasks/update/{id} のフォーム
/// キーが欠けていても空文字として検証に回す
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    pub content: String,
}

/// GET /tasks/
pub async fn list(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let tasks = state.tasks.clone();
    let todos = run_blocking(move || tasks.list().map_err(|e| WebError::task(e, LIST_FAILED))).await?;
    render(&state, Page::Tasks, &json!({ "tasks": todos }))
}

/// POST /tasks/
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, WebError> {
    let tasks = state.tasks.clone();
    let _ = run_blocking(move || {
        tasks
            .create(&form.content)
            .map_err(|e| WebError::task(e, ADD_FAILED))
    })
    .await?;
    Ok(Redirect::to(TASKS_PATH))
}

/// GET /tasks/delete/{id}
pub async fn delete(
    Path(id): Path<TodoId>,
    State(state): State<AppState>,
) -> Result<Redirect, WebError> {
    let tasks = state.tasks.clone();
    run_blocking(move || tasks.delete(id).map_err(|e| WebError::task(e, DELETE_FAILED))).await?;
    Ok(Redirect::to(TASKS_PATH))
}

/// GET /tasks/update/{id}
pub async fn edit(
    Path(id): Path<TodoId>,
    State(state): State<AppState>,
) -> Result<Html<String>, WebError> {
    let tasks = state.tasks.clone();
    let task = run_blocking(move || tasks.get(id).map_err(|e| WebError::task(e, LIST_FAILED))).await?;
    render(&state, Page::TaskEdit, &json!({ "task": task }))
}

/// POST /tasks/update/{id}
pub async fn update(
    Path(id): Path<TodoId>,
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, WebError> {
    let tasks = state.tasks.clone();
    let _ = run_blocking(move || {
        tasks
            .update(id, &form.content)
            .map_err(|e| WebError::task(e, UPDATE_FAILED))
    })
    .await?;
    Ok(Redirect::to(TASKS_PATH))
}
