//! Error types for the toolbox core
//!
//! Centralized error handling using thiserror. Handler failures are
//! folded into a [`ResponseEnvelope`] by [`classify`]; nothing here ever
//! escapes a tool invocation as a panic.

use serde_json::Value;
use thiserror::Error;

use crate::command::FieldKind;
use crate::envelope::ResponseEnvelope;

/// Failure raised by a tool handler
#[derive(Error, Debug)]
pub enum ToolError {
    /// Upstream was reachable but answered with a non-2xx status
    #[error("{}", upstream_status_message(.status, .detail))]
    UpstreamStatus { status: u16, detail: Option<String> },

    /// No response was received from the upstream
    #[error("{}", friendly_network_error(.0))]
    Transport(#[from] reqwest::Error),

    /// The upstream could not resolve the handler's input
    #[error("{subject} not found: {input}")]
    NotFound { subject: &'static str, input: String },

    /// A required external credential or setting is missing
    #[error("{0}")]
    Config(String),

    /// The upstream payload did not have the expected shape
    #[error("Invalid response from server: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl ToolError {
    pub fn not_found(subject: &'static str, input: impl Into<String>) -> Self {
        ToolError::NotFound {
            subject,
            input: input.into(),
        }
    }
}

/// Result type alias for tool handlers and upstream calls
pub type Result<T> = std::result::Result<T, ToolError>;

/// Argument validation failure
///
/// The `Display` output is the exact message placed in the error envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid value for field '{field}': expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: String,
    },

    #[error("Invalid arguments: expected an object")]
    NotAnObject,
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, kind: &FieldKind) -> Self {
        ValidationError::InvalidField {
            field,
            expected: kind.to_string(),
        }
    }
}

/// Registry construction failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("resource '{0}' is already registered")]
    DuplicateResource(String),
}

/// Turn a handler failure into a single-block error envelope.
///
/// Upstream status first, then transport, then the domain not-found
/// condition, then everything else. `context` prefixes every message
/// except not-found and configuration errors, which already name what
/// went wrong.
pub fn classify(err: &ToolError, context: &str) -> ResponseEnvelope {
    let message = match err {
        ToolError::UpstreamStatus { .. } | ToolError::Transport(_) => {
            format!("{context}: {err}")
        }
        ToolError::NotFound { .. } => err.to_string(),
        ToolError::Config(msg) => format!("Error: {msg}"),
        ToolError::Decode(_) => format!("{context}: {err}"),
        ToolError::Other(msg) if msg.trim().is_empty() => format!("{context}: Unknown error"),
        ToolError::Other(msg) => format!("{context}: {msg}"),
    };
    ResponseEnvelope::error(message)
}

fn upstream_status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.trim().is_empty() => d.to_string(),
        _ => format!("request failed with status {status}"),
    }
}

/// Pull a human-readable error description out of an upstream error body.
///
/// Providers disagree on where they put it: `{"error":{"message":..}}`,
/// `{"message":..}`, `{"status":..}` or a bare `{"error":".."}`.
pub fn upstream_detail(body: &Value) -> Option<String> {
    let candidates = [
        body.get("error").and_then(|e| e.get("message")),
        body.get("message"),
        body.get("status"),
        body.get("error"),
    ];
    candidates.into_iter().flatten().find_map(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_builder() {
        if let Some(url) = e.url() {
            return format!("Invalid URL: {url}");
        }
        return "Invalid URL".to_string();
    }
    if e.is_timeout() {
        return "Connection timed out".to_string();
    }
    if e.is_connect() {
        if let Some(url) = e.url() {
            return format!("Could not connect to {}", url.host_str().unwrap_or("server"));
        }
        return "Could not connect to server".to_string();
    }
    if e.is_decode() {
        return "Invalid response from server".to_string();
    }
    format!("Network error: {e}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_of(env: &ResponseEnvelope) -> &str {
        &env.blocks[0].text
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::UnknownCommand("nope".into()).to_string(),
            "Unknown command 'nope'"
        );
        assert_eq!(
            ValidationError::MissingField("city").to_string(),
            "Missing required field 'city'"
        );
        assert_eq!(
            ValidationError::invalid("a", &FieldKind::Number).to_string(),
            "Invalid value for field 'a': expected number"
        );
    }

    #[test]
    fn test_classify_upstream_status_with_detail() {
        let err = ToolError::UpstreamStatus {
            status: 500,
            detail: Some("upstream exploded".into()),
        };
        let env = classify(&err, "Error fetching daily news data");
        assert!(env.is_error);
        assert_eq!(env.blocks.len(), 1);
        assert_eq!(text_of(&env), "Error fetching daily news data: upstream exploded");
    }

    #[test]
    fn test_classify_upstream_status_without_detail() {
        let err = ToolError::UpstreamStatus {
            status: 503,
            detail: None,
        };
        let env = classify(&err, "ctx");
        assert_eq!(text_of(&env), "ctx: request failed with status 503");
    }

    #[test]
    fn test_classify_not_found_names_input() {
        let env = classify(&ToolError::not_found("Location", "Atlantis"), "ctx");
        assert!(env.is_error);
        assert_eq!(text_of(&env), "Location not found: Atlantis");
    }

    #[test]
    fn test_classify_config_error() {
        let env = classify(&ToolError::Config("API key not found.".into()), "ctx");
        assert_eq!(text_of(&env), "Error: API key not found.");
    }

    #[test]
    fn test_classify_other_empty_is_unknown() {
        let env = classify(&ToolError::Other(String::new()), "ctx");
        assert_eq!(text_of(&env), "ctx: Unknown error");
    }

    #[test]
    fn test_classify_other_keeps_description() {
        let env = classify(&ToolError::Other("bad things".into()), "ctx");
        assert_eq!(text_of(&env), "ctx: bad things");
    }

    #[test]
    fn test_upstream_detail_prefers_nested_error_message() {
        let body = json!({ "error": { "code": 1006, "message": "No matching location found." } });
        assert_eq!(
            upstream_detail(&body).as_deref(),
            Some("No matching location found.")
        );
    }

    #[test]
    fn test_upstream_detail_message_then_status() {
        assert_eq!(
            upstream_detail(&json!({ "cod": "404", "message": "city not found" })).as_deref(),
            Some("city not found")
        );
        assert_eq!(
            upstream_detail(&json!({ "status": 500 })).as_deref(),
            Some("500")
        );
        assert_eq!(
            upstream_detail(&json!({ "error": "forbidden" })).as_deref(),
            Some("forbidden")
        );
        assert_eq!(upstream_detail(&json!({ "data": [] })), None);
    }
}
