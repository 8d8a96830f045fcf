//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during tool operations.
///
/// Storage failures never leave the tools domain as faults: each tool
/// converts them into its `{status:"error"}` envelope. This type exists for
/// the conversion itself and for dispatch failures (unknown tool name).
#[derive(Debug, Error)]
pub enum ToolError {
    /// The storage layer rejected a statement or the connection failed.
    /// Displays the raw driver message, which becomes the envelope message.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}
