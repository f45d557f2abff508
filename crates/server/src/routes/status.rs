use axum::{extract::State, Json};
use jarvis::{CapabilityResult, MetricKind};
use serde::Serialize;

use crate::AppState;

/// Dashboard snapshot; a failed reading shows its error text instead
#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub cpu: String,
    pub ram: String,
    pub temp: String,
    pub weather: String,
}

fn reading(result: CapabilityResult<String>) -> String {
    result.unwrap_or_else(|e| e.to_string())
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let caps = state.dispatcher.capabilities();
    let (cpu, ram, temp, weather) = tokio::join!(
        caps.metrics.metric(MetricKind::Cpu),
        caps.metrics.metric(MetricKind::Ram),
        caps.metrics.metric(MetricKind::Temperature),
        caps.weather.weather(),
    );

    Json(SystemStatus {
        cpu: reading(cpu),
        ram: reading(ram),
        temp: reading(temp),
        weather: reading(weather),
    })
}
