//! Error type for the tools.

use armory_core::error::PricingError;
use thiserror::Error;

/// Error type for tool operations.
#[derive(Error, Debug)]
pub enum ToolError {
    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse RON: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Failed to render JSON.
    #[error("Failed to render JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Pricing engine rejected the input.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;
