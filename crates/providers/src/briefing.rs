//! Daily briefing: time, weather and open tasks in one answer

use std::sync::Arc;

use async_trait::async_trait;
use jarvis::{
    Briefing, CapabilityError, CapabilityResult, MetricKind, SystemMetrics, TodoList, TodoOp,
    WeatherReport,
};

pub struct DailyBriefing {
    metrics: Arc<dyn SystemMetrics>,
    weather: Arc<dyn WeatherReport>,
    todo: Arc<dyn TodoList>,
}

impl DailyBriefing {
    pub fn new(
        metrics: Arc<dyn SystemMetrics>,
        weather: Arc<dyn WeatherReport>,
        todo: Arc<dyn TodoList>,
    ) -> Self {
        Self {
            metrics,
            weather,
            todo,
        }
    }
}

#[async_trait]
impl Briefing for DailyBriefing {
    /// Parts that fail are left out; only a briefing with nothing in it fails
    async fn briefing(&self) -> CapabilityResult<String> {
        let (time, weather, tasks) = tokio::join!(
            self.metrics.metric(MetricKind::Time),
            self.weather.weather(),
            self.todo.todo(TodoOp::List),
        );

        let parts: Vec<String> = [("time", time), ("weather", weather), ("to-do", tasks)]
            .into_iter()
            .filter_map(|(part, result)| match result {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!("Briefing skipped {}: {}", part, e);
                    None
                }
            })
            .collect();

        if parts.is_empty() {
            return Err(CapabilityError::failed("Nothing to report"));
        }
        Ok(format!("Here is your briefing. {}", parts.join(" ")))
    }
}
