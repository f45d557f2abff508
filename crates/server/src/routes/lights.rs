use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use jarvis::KeyValueStoreExt;
use serde::{Deserialize, Serialize};

use super::todo::ActionResult;
use crate::{error::ApiError, AppState};

/// Store key for the lights the dashboard shows
pub const VISIBLE_LIGHTS_KEY: &str = "visible_lights";

#[derive(Debug, Serialize)]
pub struct LightsOverview {
    pub all_lights: Vec<String>,
    pub visible_lights: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LightsConfigRequest {
    pub visible_lights: Option<Vec<String>>,
}

pub async fn get_lights(State(state): State<AppState>) -> Result<Json<LightsOverview>, ApiError> {
    let all_lights = state.dispatcher.capabilities().lights.light_names().await?;

    // A missing or unreadable selection just means nothing is pinned yet
    let visible_lights = state
        .store
        .get_as::<Vec<String>>(VISIBLE_LIGHTS_KEY)
        .unwrap_or_else(|e| {
            tracing::warn!("Ignoring stored light selection: {}", e);
            None
        })
        .unwrap_or_default();

    Ok(Json(LightsOverview {
        all_lights,
        visible_lights,
    }))
}

pub async fn update_lights_config(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ActionResult>, ApiError> {
    let visible_lights = serde_json::from_slice::<LightsConfigRequest>(&body)
        .ok()
        .and_then(|request| request.visible_lights)
        .ok_or_else(|| ApiError::BadRequest("No visible_lights list provided".into()))?;

    state
        .store
        .set_as(VISIBLE_LIGHTS_KEY, &visible_lights)
        .map_err(|e| ApiError::InternalError(format!("Failed to save light selection: {}", e)))?;

    Ok(Json(ActionResult {
        success: true,
        message: "Configuration saved.".to_string(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lights", get(get_lights))
        .route("/lights/config", post(update_lights_config))
}
