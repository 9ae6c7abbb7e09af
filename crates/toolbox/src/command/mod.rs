//! Command registry
//!
//! A table from command name to declared input shape and handler. Built
//! once at startup by repeated `register` calls, read-only afterwards.

pub mod shape;

pub use shape::{FieldKind, FieldSpec, InputShape, ValidatedArgs};

use std::fmt;

use crate::envelope::HandlerOutput;
use crate::error::{RegistryError, ToolError};

/// What a handler returns: lines or a pre-built envelope, or a failure
/// for the pipeline to classify
pub type HandlerResult = std::result::Result<HandlerOutput, ToolError>;

type Handler = dyn Fn(&ValidatedArgs) -> HandlerResult + Send + Sync;

/// One registered command
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_shape: InputShape,
    failure_context: Option<&'static str>,
    handler: Box<Handler>,
}

impl CommandSpec {
    pub fn new<F>(name: &'static str, description: &'static str, handler: F) -> Self
    where
        F: Fn(&ValidatedArgs) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            name,
            description,
            input_shape: InputShape::new(),
            failure_context: None,
            handler: Box::new(handler),
        }
    }

    /// Append a field to the input shape (declaration order is validation order)
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.input_shape.push(field);
        self
    }

    /// Prefix used when an unhandled handler failure is rendered,
    /// e.g. `"Error fetching weather data"`
    pub fn failure_context(mut self, context: &'static str) -> Self {
        self.failure_context = Some(context);
        self
    }

    pub fn context(&self) -> String {
        match self.failure_context {
            Some(ctx) => ctx.to_string(),
            None => format!("Error executing '{}'", self.name),
        }
    }

    /// Run the handler. Callers are expected to have validated `args`
    /// against `input_shape`.
    pub fn call(&self, args: &ValidatedArgs) -> HandlerResult {
        (self.handler)(args)
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_shape", &self.input_shape)
            .finish_non_exhaustive()
    }
}

/// Registry of the commands one service instance supports
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// # Panics
    ///
    /// If a command with the same name is already registered. That is a
    /// wiring mistake at startup, not something a caller can recover from.
    pub fn register(&mut self, spec: CommandSpec) {
        if let Err(e) = self.try_register(spec) {
            panic!("{e}");
        }
    }

    /// Register a command, reporting a name clash instead of panicking
    pub fn try_register(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        if self.resolve(spec.name).is_some() {
            return Err(RegistryError::DuplicateCommand(spec.name.to_string()));
        }
        tracing::debug!(command = spec.name, "registered command");
        self.commands.push(spec);
        Ok(())
    }

    /// Look up a command by name
    pub fn resolve(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// All commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    /// List all command names
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name).collect()
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry has no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(name: &'static str) -> CommandSpec {
        CommandSpec::new(name, "does nothing", |_| Ok(HandlerOutput::Lines(Vec::new())))
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_and_resolve() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("echo"));
        registry.register(noop("greeting"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("echo").map(|c| c.name), Some("echo"));
        assert!(registry.resolve("missing").is_none());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("echo").field(FieldSpec::required("message", FieldKind::String)));
        let first = registry.resolve("echo").unwrap();
        let second = registry.resolve("echo").unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.input_shape, second.input_shape);
    }

    #[test]
    fn test_names_in_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("b"));
        registry.register(noop("a"));
        assert_eq!(registry.names(), vec!["b", "a"]);
    }

    #[test]
    fn test_try_register_rejects_duplicate() {
        let mut registry = CommandRegistry::new();
        registry.try_register(noop("echo")).unwrap();
        let err = registry.try_register(noop("echo")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCommand("echo".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    #[should_panic(expected = "command 'echo' is already registered")]
    fn test_register_duplicate_panics() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("echo"));
        registry.register(noop("echo"));
    }

    #[test]
    fn test_default_failure_context() {
        assert_eq!(noop("echo").context(), "Error executing 'echo'");
        assert_eq!(
            noop("w").failure_context("Error fetching weather data").context(),
            "Error fetching weather data"
        );
    }
}
