use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use jarvis::TodoOp;
use serde::Serialize;

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

pub async fn get_tasks(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.dispatcher.capabilities().todo.tasks().await?))
}

pub async fn clear_tasks(State(state): State<AppState>) -> Result<Json<ActionResult>, ApiError> {
    state.dispatcher.capabilities().todo.todo(TodoOp::Clear).await?;
    Ok(Json(ActionResult {
        success: true,
        message: "To-do list cleared.".to_string(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todo", get(get_tasks))
        .route("/todo/clear", post(clear_tasks))
}
