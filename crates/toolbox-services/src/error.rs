//! Error types for toolbox services
//!
//! Startup errors. Per-request failures never reach this
//! type; the pipeline folds them into error envelopes.

use thiserror::Error;
use toolbox::error::ToolError;

/// Service error type
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// Result type alias for toolbox services
pub type Result<T> = std::result::Result<T, ServiceError>;
