//! Service assembly
//!
//! Maps a service name to the tools and resources it serves and wires
//! them into an `McpServer`.

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use toolbox::command::CommandRegistry;
use toolbox::mcp::McpServer;
use toolbox::network::{HttpClient, JsonSource};
use toolbox::pipeline::Pipeline;
use toolbox::resource::ResourceRegistry;

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::resources::info;
use crate::tools::{calculator, daily_hot, forecast, greeting, weather};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Which tool set a process serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceKind {
    /// greeting, echo and calculate, plus info resources
    Greeting,
    /// get_weather and get_forecast
    Weather,
    /// get_daily_hot
    DailyHot,
}

impl ServiceKind {
    pub const fn server_name(self) -> &'static str {
        match self {
            ServiceKind::Greeting => "greeting",
            ServiceKind::Weather => "weather",
            ServiceKind::DailyHot => "daily-hot",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.server_name())
    }
}

/// Build a server for `kind` using the real HTTP client
pub fn build_server(kind: ServiceKind, config: &ServiceConfig) -> Result<McpServer> {
    let client: Arc<dyn JsonSource> = Arc::new(HttpClient::with_timeout(config.http_timeout)?);
    Ok(build_server_with(kind, config, client))
}

/// Build a server for `kind` with an explicit upstream client
pub fn build_server_with(
    kind: ServiceKind,
    config: &ServiceConfig,
    client: Arc<dyn JsonSource>,
) -> McpServer {
    let name = kind.server_name();
    let mut registry = CommandRegistry::new();
    let mut resources = ResourceRegistry::new();

    match kind {
        ServiceKind::Greeting => {
            greeting::register(&mut registry);
            calculator::register(&mut registry);
            info::register(&mut resources, name, VERSION);
        }
        ServiceKind::Weather => {
            if config.openweather_api_key.is_none() {
                tracing::warn!("OPENWEATHER_API_KEY not set; get_weather will report a configuration error");
            }
            if config.weatherapi_key.is_none() {
                tracing::warn!("WEATHERAPI_KEY not set; get_forecast will report a configuration error");
            }
            weather::register(
                &mut registry,
                weather::OpenWeather::new(
                    client.clone(),
                    config.openweather_api_key.clone(),
                    config.openweather_url.clone(),
                ),
            );
            forecast::register(
                &mut registry,
                forecast::WeatherApi::new(
                    client,
                    config.weatherapi_key.clone(),
                    config.weatherapi_url.clone(),
                ),
            );
        }
        ServiceKind::DailyHot => {
            daily_hot::register(
                &mut registry,
                daily_hot::DailyHot::new(client, config.daily_hot_base_url.clone()),
            );
        }
    }

    tracing::info!(
        server = name,
        tools = ?registry.names(),
        resources = resources.len(),
        "service assembled"
    );
    McpServer::new(name, VERSION, Pipeline::new(registry)).with_resources(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::FakeSource;
    use serde_json::{json, Value};

    fn server(kind: ServiceKind) -> McpServer {
        let source = Arc::new(FakeSource::returning(json!({})));
        build_server_with(kind, &ServiceConfig::default(), source)
    }

    fn exchange(server: &McpServer, input: &str) -> Vec<Value> {
        let mut out = Vec::new();
        server.serve(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_tool_sets() {
        assert_eq!(
            server(ServiceKind::Greeting).pipeline().registry().names(),
            ["greeting", "echo", "calculate"]
        );
        assert_eq!(
            server(ServiceKind::Weather).pipeline().registry().names(),
            ["get_weather", "get_forecast"]
        );
        assert_eq!(
            server(ServiceKind::DailyHot).pipeline().registry().names(),
            ["get_daily_hot"]
        );
    }

    #[test]
    fn test_build_server_with_real_client() {
        let config = ServiceConfig::default();
        let server = build_server(ServiceKind::DailyHot, &config).unwrap();
        assert_eq!(server.pipeline().registry().names(), ["get_daily_hot"]);
    }

    #[test]
    fn test_server_names() {
        assert_eq!(server(ServiceKind::DailyHot).name(), "daily-hot");
        assert_eq!(ServiceKind::Greeting.to_string(), "greeting");
    }

    #[test]
    fn test_greeting_service_end_to_end() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"calculate","arguments":{"operation":"multiply","a":3,"b":4}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"resources/read","params":{"uri":"user://admin/info"}}"#,
        );
        let replies = exchange(&server(ServiceKind::Greeting), input);
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["result"]["serverInfo"]["name"], "greeting");
        assert_eq!(
            replies[1]["result"],
            json!({ "content": [{ "type": "text", "text": "3 × 4 = 12" }] })
        );
        let text = replies[2]["result"]["contents"][0]["text"].as_str().unwrap();
        let user: Value = serde_json::from_str(text).unwrap();
        assert_eq!(user["accessLevel"], "administrator");
    }

    #[test]
    fn test_weather_without_keys_reports_configuration() {
        let replies = exchange(
            &server(ServiceKind::Weather),
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"get_forecast","arguments":{"location":"Oslo"}}}"#,
        );
        assert_eq!(replies[0]["result"]["isError"], true);
        assert_eq!(
            replies[0]["result"]["content"][0]["text"],
            "Error: WeatherAPI key not found. Please set WEATHERAPI_KEY environment variable."
        );
    }

    #[test]
    fn test_daily_hot_schema_lists_sources() {
        let replies = exchange(
            &server(ServiceKind::DailyHot),
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
        );
        let schema = &replies[0]["result"]["tools"][0]["inputSchema"];
        assert_eq!(schema["properties"]["type"]["enum"].as_array().unwrap().len(), 33);
        assert_eq!(schema["properties"]["cache"]["default"], true);
        assert_eq!(schema["required"], json!(["type"]));
    }
}
