//! Toolbox binary entry point.
//!
//! Usage: toolbox [--service greeting|weather|daily-hot]
//!
//! Speaks line-delimited JSON-RPC on stdin/stdout; logs go to stderr.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use toolbox_services::config::ServiceConfig;
use toolbox_services::logging::init_logging;
use toolbox_services::services::{build_server, ServiceKind};
use tracing::{error, info};

/// Toolbox: schema-validated tools over stdio.
#[derive(Parser, Debug)]
#[command(name = "toolbox", version)]
#[command(about = "Serve greeting, weather or daily-hot tools over stdio")]
struct Args {
    /// Tool set to serve.
    #[arg(long, value_enum, env = "TOOLBOX_SERVICE", default_value_t = ServiceKind::Greeting)]
    service: ServiceKind,

    /// OpenWeatherMap API key for get_weather.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    openweather_api_key: Option<String>,

    /// WeatherAPI key for get_forecast.
    #[arg(long, env = "WEATHERAPI_KEY", hide_env_values = true)]
    weatherapi_key: Option<String>,

    /// Hot-list aggregator base URL.
    #[arg(long, env = "DAILY_HOT_BASE_URL")]
    daily_hot_base_url: Option<String>,

    /// Outbound HTTP request timeout in seconds.
    #[arg(long, env = "TOOLBOX_HTTP_TIMEOUT_SECS")]
    http_timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn service_config(&self) -> ServiceConfig {
        let mut config = ServiceConfig::default()
            .with_keys(self.openweather_api_key.clone(), self.weatherapi_key.clone());
        if let Some(ref url) = self.daily_hot_base_url {
            config.daily_hot_base_url = url.clone();
        }
        if let Some(secs) = self.http_timeout_secs.filter(|s| *s > 0) {
            config.http_timeout = Duration::from_secs(secs);
        }
        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = args.service_config();
    info!(
        service = %args.service,
        timeout_secs = config.http_timeout.as_secs(),
        "toolbox starting"
    );

    let server = match build_server(args.service, &config) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "failed to start service");
            return ExitCode::FAILURE;
        }
    };

    info!(service = %args.service, "running on stdio");
    match server.run_stdio() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "stdio transport failed");
            ExitCode::FAILURE
        }
    }
}
