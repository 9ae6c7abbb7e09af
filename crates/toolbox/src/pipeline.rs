//! Invocation pipeline
//!
//! Resolve → validate → invoke → normalize. Every path ends in a
//! well-formed [`ResponseEnvelope`]; handler failures never cross this
//! boundary.

use serde_json::Value;

use crate::command::CommandRegistry;
use crate::envelope::ResponseEnvelope;
use crate::error::{classify, ValidationError};

/// Single choke point for tool invocations against one registry
#[derive(Debug)]
pub struct Pipeline {
    registry: CommandRegistry,
}

impl Pipeline {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Invoke `name` with untyped arguments
    pub fn invoke(&self, name: &str, raw_args: &Value) -> ResponseEnvelope {
        let Some(spec) = self.registry.resolve(name) else {
            tracing::warn!(command = name, "unknown command");
            let err = ValidationError::UnknownCommand(name.to_string());
            return ResponseEnvelope::error(err.to_string());
        };

        let args = match spec.input_shape.validate(raw_args) {
            Ok(args) => args,
            Err(e) => {
                tracing::warn!(command = name, error = %e, "argument validation failed");
                return ResponseEnvelope::error(e.to_string());
            }
        };

        tracing::debug!(command = name, "invoking handler");
        match spec.call(&args) {
            Ok(output) => {
                let envelope = ResponseEnvelope::from(output);
                if envelope.is_error {
                    tracing::warn!(
                        command = name,
                        message = envelope.first_text().unwrap_or_default(),
                        "handler reported an error"
                    );
                }
                envelope
            }
            Err(e) => {
                let envelope = classify(&e, &spec.context());
                tracing::warn!(command = name, error = ?e, "handler failed");
                envelope
            }
        }
    }
}
