//! Greeting and echo tools

use toolbox::command::{CommandRegistry, CommandSpec, FieldKind, FieldSpec};

pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandSpec::new("greeting", "Generate a personalized greeting", |args| {
            let name = args.str("name").unwrap_or_default();
            let greeting = if args.boolean("formal").unwrap_or(false) {
                "Good day"
            } else {
                "Hello"
            };
            Ok(format!("{greeting}, {name}!").into())
        })
        .field(FieldSpec::required("name", FieldKind::String).describe("The name to greet"))
        .field(
            FieldSpec::optional("formal", FieldKind::Boolean)
                .with_default(false)
                .describe("Whether to use formal greeting"),
        ),
    );

    registry.register(
        CommandSpec::new("echo", "Echo the provided message", |args| {
            Ok(format!("Echo: {}", args.str("message").unwrap_or_default()).into())
        })
        .field(FieldSpec::required("message", FieldKind::String).describe("The message to echo")),
    );
}
