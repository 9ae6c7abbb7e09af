//! Logging initialization
//!
//! Stdout carries protocol traffic, so every log line goes to stderr.
//! `RUST_LOG` overrides the level passed on the command line.

use tracing_subscriber::EnvFilter;

pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
