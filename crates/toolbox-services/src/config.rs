//! Configuration for toolbox services

use std::time::Duration;

use toolbox::config::network::REQUEST_TIMEOUT_SECS;

/// Upstream endpoints
pub mod endpoints {
    /// OpenWeatherMap current weather
    pub const OPENWEATHER_CURRENT: &str = "https://api.openweathermap.org/data/2.5/weather";

    /// WeatherAPI forecast
    pub const WEATHERAPI_FORECAST: &str = "https://api.weatherapi.com/v1/forecast.json";

    /// Local hot-list aggregator
    pub const DAILY_HOT_BASE_URL: &str = "http://localhost:6688";
}

/// Forecast tool limits
pub mod forecast {
    /// Days returned when the caller does not ask for a count
    pub const DEFAULT_DAYS: u8 = 3;

    /// Largest day count accepted
    pub const MAX_DAYS: u8 = 10;
}

/// Runtime settings resolved from the command line and environment
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub openweather_api_key: Option<String>,
    pub openweather_url: String,
    pub weatherapi_key: Option<String>,
    pub weatherapi_url: String,
    pub daily_hot_base_url: String,
    pub http_timeout: Duration,
}

impl ServiceConfig {
    /// Treat blank credentials as absent
    pub fn with_keys(mut self, openweather: Option<String>, weatherapi: Option<String>) -> Self {
        self.openweather_api_key = openweather.and_then(non_empty);
        self.weatherapi_key = weatherapi.and_then(non_empty);
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            openweather_url: endpoints::OPENWEATHER_CURRENT.to_string(),
            weatherapi_key: None,
            weatherapi_url: endpoints::WEATHERAPI_FORECAST.to_string(),
            daily_hot_base_url: endpoints::DAILY_HOT_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
