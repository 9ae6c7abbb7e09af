//! Forecast tool (WeatherAPI)
//!
//! `get_forecast(location, days?, lang?, unit?)` → a header block, a
//! current-conditions block and a day-by-day forecast block.

use std::sync::Arc;

use serde::Deserialize;
use toolbox::command::{CommandRegistry, CommandSpec, FieldKind, FieldSpec, ValidatedArgs};
use toolbox::error::{Result, ToolError};
use toolbox::network::JsonSource;

use crate::config::forecast::{DEFAULT_DAYS, MAX_DAYS};

/// Temperature unit selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub const ALL: [Unit; 2] = [Unit::Celsius, Unit::Fahrenheit];

    pub const fn slug(self) -> &'static str {
        match self {
            Unit::Celsius => "c",
            Unit::Fahrenheit => "f",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.slug() == slug)
    }

    fn temp_suffix(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }

    fn speed_suffix(self) -> &'static str {
        match self {
            Unit::Celsius => "km/h",
            Unit::Fahrenheit => "mph",
        }
    }
}

const UNIT_SLUGS: &[&str] = &[Unit::Celsius.slug(), Unit::Fahrenheit.slug()];

// =============================================================================
// Internal API response types (serde)
// =============================================================================

#[derive(Debug, Deserialize)]
struct WaForecast {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecastDays,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    temp_f: f64,
    feelslike_c: f64,
    feelslike_f: f64,
    humidity: f64,
    wind_kph: f64,
    wind_mph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDays {
    #[serde(default)]
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    maxtemp_f: f64,
    mintemp_c: f64,
    mintemp_f: f64,
    #[serde(default)]
    daily_chance_of_rain: f64,
    condition: WaCondition,
}

fn render(forecast: &WaForecast, unit: Unit) -> Vec<String> {
    let t = unit.temp_suffix();
    let loc = &forecast.location;

    let place: Vec<&str> = [loc.name.as_str(), loc.region.as_str(), loc.country.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    let mut header = format!("Weather for {}", place.join(", "));
    if !loc.localtime.is_empty() {
        header.push_str(&format!(" (local time {})", loc.localtime));
    }

    let cur = &forecast.current;
    let (temp, feels, wind) = match unit {
        Unit::Celsius => (cur.temp_c, cur.feelslike_c, cur.wind_kph),
        Unit::Fahrenheit => (cur.temp_f, cur.feelslike_f, cur.wind_mph),
    };
    let current = format!(
        "Current conditions:\n\
         - Temperature: {temp}{t}\n\
         - Feels like: {feels}{t}\n\
         - Humidity: {}%\n\
         - Condition: {}\n\
         - Wind: {wind} {}",
        cur.humidity,
        cur.condition.text,
        unit.speed_suffix(),
    );

    let days = &forecast.forecast.forecastday;
    let mut outlook = format!("{}-day forecast:", days.len());
    for d in days {
        let (lo, hi) = match unit {
            Unit::Celsius => (d.day.mintemp_c, d.day.maxtemp_c),
            Unit::Fahrenheit => (d.day.mintemp_f, d.day.maxtemp_f),
        };
        outlook.push_str(&format!(
            "\n- {}: {}, {lo}{t} to {hi}{t}, {}% chance of rain",
            d.date, d.day.condition.text, d.day.daily_chance_of_rain
        ));
    }

    vec![header, current, outlook]
}

/// WeatherAPI reports unknown locations as HTTP 400 with error code 1006
fn is_unknown_location(detail: Option<&str>) -> bool {
    detail.is_some_and(|d| d.to_ascii_lowercase().contains("no matching location"))
}

// =============================================================================
// WeatherAPI client
// =============================================================================

/// Multi-day forecasts against WeatherAPI
pub struct WeatherApi {
    source: Arc<dyn JsonSource>,
    api_key: Option<String>,
    url: String,
}

/// Validated forecast query
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery<'a> {
    pub location: &'a str,
    pub days: u8,
    pub lang: Option<&'a str>,
    pub unit: Unit,
}

impl<'a> ForecastQuery<'a> {
    fn from_args(args: &'a ValidatedArgs) -> Self {
        Self {
            location: args.str("location").unwrap_or_default(),
            // range-checked by the input shape; fractions truncate
            days: args
                .number("days")
                .map(|d| d as u8)
                .unwrap_or(DEFAULT_DAYS)
                .clamp(1, MAX_DAYS),
            lang: args.str("lang").filter(|l| !l.is_empty()),
            unit: args
                .str("unit")
                .and_then(Unit::from_slug)
                .unwrap_or(Unit::Celsius),
        }
    }
}

impl WeatherApi {
    pub fn new(source: Arc<dyn JsonSource>, api_key: Option<String>, url: impl Into<String>) -> Self {
        Self {
            source,
            api_key,
            url: url.into(),
        }
    }

    pub fn forecast(&self, query: &ForecastQuery<'_>) -> Result<Vec<String>> {
        let Some(ref api_key) = self.api_key else {
            return Err(ToolError::Config(
                "WeatherAPI key not found. Please set WEATHERAPI_KEY environment variable."
                    .to_string(),
            ));
        };

        let mut params = vec![
            ("key", api_key.clone()),
            ("q", query.location.to_string()),
            ("days", query.days.to_string()),
            ("aqi", "no".to_string()),
            ("alerts", "no".to_string()),
        ];
        if let Some(lang) = query.lang {
            params.push(("lang", lang.to_string()));
        }

        let value = self
            .source
            .get_json(&self.url, &params)
            .map_err(|e| match e {
                ToolError::UpstreamStatus { ref detail, .. }
                    if is_unknown_location(detail.as_deref()) =>
                {
                    ToolError::not_found("Location", query.location)
                }
                other => other,
            })?;

        let forecast: WaForecast =
            serde_json::from_value(value).map_err(|e| ToolError::Decode(e.to_string()))?;
        Ok(render(&forecast, query.unit))
    }
}

pub fn register(registry: &mut CommandRegistry, api: WeatherApi) {
    registry.register(
        CommandSpec::new(
            "get_forecast",
            "Get current conditions and a multi-day forecast for a location",
            move |args| Ok(api.forecast(&ForecastQuery::from_args(args))?.into()),
        )
        .failure_context("Error fetching weather data")
        .field(
            FieldSpec::required("location", FieldKind::String)
                .describe("City name, postcode, IP address or \"lat,lon\""),
        )
        .field(
            FieldSpec::optional("days", FieldKind::Number)
                .with_default(DEFAULT_DAYS)
                .with_range(1.0, f64::from(MAX_DAYS))
                .describe("Number of forecast days"),
        )
        .field(
            FieldSpec::optional("lang", FieldKind::String)
                .describe("Language code for condition text, e.g. \"zh\""),
        )
        .field(
            FieldSpec::optional("unit", FieldKind::Enum(UNIT_SLUGS))
                .with_default(Unit::Celsius.slug())
                .describe("Temperature unit: c or f"),
        ),
    );
}

// =============================================================================
// Tests
// =============================================================================
