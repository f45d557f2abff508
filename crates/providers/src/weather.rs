//! Current weather from OpenWeatherMap

use async_trait::async_trait;
use jarvis::{config::WeatherConfig, CapabilityError, CapabilityResult, WeatherReport};
use serde_json::Value;

const WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

pub struct OpenWeather {
    client: reqwest::Client,
    config: WeatherConfig,
    endpoint: String,
}

impl OpenWeather {
    pub fn new(config: WeatherConfig) -> Self {
        Self::with_endpoint(config, WEATHER_ENDPOINT)
    }

    pub fn with_endpoint(config: WeatherConfig, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            endpoint: endpoint.into(),
        }
    }
}

fn unit_symbol(units: &str) -> &'static str {
    match units {
        "imperial" => "°F",
        "standard" => "K",
        _ => "°C",
    }
}

/// Spoken sentence from an OpenWeatherMap `weather` response
pub fn format_weather(body: &Value, city: &str, units: &str) -> Option<String> {
    let temperature = body["main"]["temp"].as_f64()?;
    let description = body["weather"][0]["description"].as_str().unwrap_or("clear skies");
    let name = body["name"].as_str().filter(|n| !n.is_empty()).unwrap_or(city);

    Some(format!(
        "It's currently {:.0}{} with {} in {}.",
        temperature,
        unit_symbol(units),
        description,
        name
    ))
}

#[async_trait]
impl WeatherReport for OpenWeather {
    async fn weather(&self) -> CapabilityResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| CapabilityError::NotConfigured("The weather service".into()))?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", self.config.city.as_str()),
                ("appid", api_key),
                ("units", self.config.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CapabilityError::unreachable("the weather service", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API returned {}: {}", status, body);
            return Err(CapabilityError::failed(format!(
                "I couldn't get the weather for {}.",
                self.config.city
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CapabilityError::unreachable("the weather service", e))?;

        format_weather(&body, &self.config.city, &self.config.units).ok_or_else(|| {
            CapabilityError::failed(format!("I couldn't get the weather for {}.", self.config.city))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_weather() {
        let body = json!({
            "name": "Utrecht",
            "main": { "temp": 14.6 },
            "weather": [{ "description": "light rain" }]
        });
        assert_eq!(
            format_weather(&body, "Amsterdam", "metric").as_deref(),
            Some("It's currently 15°C with light rain in Utrecht.")
        );
    }

    #[test]
    fn test_format_weather_falls_back_to_config_city() {
        let body = json!({ "main": { "temp": 60.2 }, "weather": [] });
        assert_eq!(
            format_weather(&body, "Boston", "imperial").as_deref(),
            Some("It's currently 60°F with clear skies in Boston.")
        );
    }

    #[test]
    fn test_format_weather_needs_temperature() {
        assert_eq!(format_weather(&json!({}), "Amsterdam", "metric"), None);
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let weather = OpenWeather::new(WeatherConfig::default());
        assert!(matches!(
            weather.weather().await,
            Err(CapabilityError::NotConfigured(_))
        ));
    }
}
