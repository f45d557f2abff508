use axum::{body::Bytes, extract::State, Json};
use jarvis::Response;
use serde::Deserialize;

use crate::{error::ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub command: Option<String>,
}

/// Read the command from a JSON body, treating anything unusable as absent
pub fn command_from_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<CommandRequest>(body)
        .ok()?
        .command
        .filter(|command| !command.trim().is_empty())
}

pub async fn handle_command(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Response>, ApiError> {
    let command = command_from_body(&body)
        .ok_or_else(|| ApiError::BadRequest("No command provided".into()))?;

    tracing::info!("Command: {}", command);
    Ok(Json(state.dispatcher.interpret(&command).await))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_body() {
        assert_eq!(
            command_from_body(br#"{"command": "cpu usage"}"#).as_deref(),
            Some("cpu usage")
        );
        assert_eq!(command_from_body(br#"{"command": "   "}"#), None);
        assert_eq!(command_from_body(br#"{"text": "cpu usage"}"#), None);
        assert_eq!(command_from_body(b"not json"), None);
        assert_eq!(command_from_body(b""), None);
    }
}
