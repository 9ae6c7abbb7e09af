//! Toolbox: schema-validated tools over a line-oriented stdio channel
//!
//! Command registry, argument validation, invocation pipeline and the
//! uniform response envelope. Concrete tools live in `toolbox-services`.
//!
//! ## Quick start
//!
//! ```no_run
//! use toolbox::command::{CommandRegistry, CommandSpec, FieldKind, FieldSpec};
//! use toolbox::pipeline::Pipeline;
//!
//! let mut registry = CommandRegistry::new();
//! registry.register(
//!     CommandSpec::new("echo", "Echo a message", |args| {
//!         Ok(vec![format!("Echo: {}", args.str("message").unwrap_or_default())].into())
//!     })
//!     .field(FieldSpec::required("message", FieldKind::String)),
//! );
//! let pipeline = Pipeline::new(registry);
//! let reply = pipeline.invoke("echo", &serde_json::json!({ "message": "hi" }));
//! assert!(!reply.is_error);
//! ```

pub mod command;
pub mod config;
pub mod envelope;
pub mod error;
pub mod mcp;
pub mod network;
pub mod pipeline;
pub mod resource;
