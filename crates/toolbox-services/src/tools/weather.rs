//! Current weather tool (OpenWeatherMap)
//!
//! `get_weather(city, country?)` → one block with the current conditions
//! in metric units.

use std::sync::Arc;

use serde::Deserialize;
use toolbox::command::{CommandRegistry, CommandSpec, FieldKind, FieldSpec};
use toolbox::error::{Result, ToolError};
use toolbox::network::JsonSource;

// =============================================================================
// Internal API response types (serde)
// =============================================================================

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    name: String,
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

fn render(current: &OwmCurrent) -> Result<String> {
    let condition = current
        .weather
        .first()
        .ok_or_else(|| ToolError::Decode("missing weather conditions".to_string()))?;
    Ok(format!(
        "Weather in {}:\n\
         - Temperature: {}°C\n\
         - Feels like: {}°C\n\
         - Humidity: {}%\n\
         - Weather: {}\n\
         - Wind speed: {} m/s",
        current.name,
        current.main.temp,
        current.main.feels_like,
        current.main.humidity,
        condition.description,
        current.wind.speed,
    ))
}

// =============================================================================
// OpenWeather client
// =============================================================================

/// Current-weather lookups against OpenWeatherMap
pub struct OpenWeather {
    source: Arc<dyn JsonSource>,
    api_key: Option<String>,
    url: String,
}

impl OpenWeather {
    pub fn new(source: Arc<dyn JsonSource>, api_key: Option<String>, url: impl Into<String>) -> Self {
        Self {
            source,
            api_key,
            url: url.into(),
        }
    }

    /// Fetch and render current conditions for `city` (optionally `city,country`)
    pub fn current(&self, city: &str, country: Option<&str>) -> Result<String> {
        let Some(ref api_key) = self.api_key else {
            return Err(ToolError::Config(
                "OpenWeather API key not found. Please set OPENWEATHER_API_KEY environment variable."
                    .to_string(),
            ));
        };

        let location = match country {
            Some(c) if !c.is_empty() => format!("{city},{c}"),
            _ => city.to_string(),
        };

        let value = self
            .source
            .get_json(
                &self.url,
                &[
                    ("q", location),
                    ("appid", api_key.clone()),
                    ("units", "metric".to_string()),
                ],
            )
            .map_err(|e| match e {
                ToolError::UpstreamStatus { status: 404, .. } => ToolError::not_found("Location", city),
                other => other,
            })?;

        let current: OwmCurrent =
            serde_json::from_value(value).map_err(|e| ToolError::Decode(e.to_string()))?;
        render(&current)
    }
}

pub fn register(registry: &mut CommandRegistry, weather: OpenWeather) {
    registry.register(
        CommandSpec::new(
            "get_weather",
            "Get current weather information for a location",
            move |args| {
                let city = args.str("city").unwrap_or_default();
                Ok(weather.current(city, args.str("country"))?.into())
            },
        )
        .failure_context("Error fetching weather data")
        .field(
            FieldSpec::required("city", FieldKind::String)
                .describe("The city name to get weather for"),
        )
        .field(
            FieldSpec::optional("country", FieldKind::String)
                .describe("The country code (optional)"),
        ),
    );
}

// =============================================================================
// Tests
// =============================================================================
